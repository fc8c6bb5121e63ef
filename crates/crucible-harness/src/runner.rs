//! Test runner - execute validated units

use crate::report::{CaseReport, RunReport};
use crate::unit::Unit;
use rayon::prelude::*;
use std::panic;
use std::time::Instant;

/// Executes cases sequentially by default; parallel execution is opt-in
/// and keeps per-case isolation because every case constructs its own
/// fixture through setup.
pub struct Runner {
    parallel: bool,
    fail_fast: bool,
    filter: Option<String>,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Runner {
            parallel: false,
            fail_fast: false,
            filter: None,
        }
    }

    /// Run cases on a rayon pool instead of sequentially.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stop scheduling new cases after the first failure or error.
    /// Only meaningful for sequential runs.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Only run cases whose name contains the pattern.
    pub fn with_filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// The cases this runner would execute, in execution order.
    ///
    /// Enumeration is registration order, then declaration order, so
    /// repeated runs over the same registry are identical.
    pub fn plan<'u>(&self, units: &'u [Box<dyn Unit>]) -> Vec<(&'u dyn Unit, usize)> {
        let mut selected = Vec::new();
        for unit in units {
            for index in 0..unit.case_count() {
                if self.matches(unit.case_name(index)) {
                    selected.push((unit.as_ref(), index));
                }
            }
        }
        selected
    }

    fn matches(&self, case_name: &str) -> bool {
        self.filter
            .as_deref()
            .map_or(true, |pattern| case_name.contains(pattern))
    }

    /// Run all selected cases and aggregate a fresh report.
    pub fn run(&self, units: &[Box<dyn Unit>]) -> RunReport {
        let started = Instant::now();
        let plan = self.plan(units);

        // Captured panics end up in the report; left alone, the default
        // hook would also spray them over stderr mid-run.
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));

        let cases = if self.parallel {
            plan.par_iter()
                .map(|&(unit, index)| run_case(unit, index))
                .collect()
        } else {
            self.run_sequential(&plan)
        };

        panic::set_hook(previous_hook);

        RunReport {
            cases,
            duration: started.elapsed(),
        }
    }

    fn run_sequential(&self, plan: &[(&dyn Unit, usize)]) -> Vec<CaseReport> {
        let mut reports = Vec::with_capacity(plan.len());
        for &(unit, index) in plan {
            let report = run_case(unit, index);
            let stop = self.fail_fast && !report.clean();
            reports.push(report);
            if stop {
                break;
            }
        }
        reports
    }
}

fn run_case(unit: &dyn Unit, index: usize) -> CaseReport {
    let started = Instant::now();
    let result = unit.run_case(index);
    CaseReport {
        unit: unit.name().to_string(),
        case: unit.case_name(index).to_string(),
        outcome: result.outcome,
        teardown_error: result.teardown_error,
        duration: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::Registry;
    use crate::report::Outcome;
    use crate::unit::TestUnit;
    use pretty_assertions::assert_eq;

    fn discovered(registry: Registry) -> Vec<Box<dyn Unit>> {
        let (units, errors) = registry.discover();
        assert!(errors.is_empty());
        units
    }

    #[test]
    fn test_single_passing_case() {
        let units = discovered(
            Registry::new().register(TestUnit::new("unit").case("test_ok", |_| {})),
        );

        let report = Runner::new().run(&units);

        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.errored(), 0);
        assert!(report.success());
    }

    #[test]
    fn test_single_failing_case() {
        let units = discovered(Registry::new().register(
            TestUnit::new("unit").case("test_fails", |_| crate::failure::fail("expected true")),
        ));

        let report = Runner::new().run(&units);

        assert_eq!(report.passed(), 0);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.errored(), 0);
        assert!(!report.success());
        assert_eq!(
            report.cases[0].outcome.message(),
            Some("expected true")
        );
    }

    #[test]
    fn test_setup_panic_counts_as_error() {
        let unit = TestUnit::with_setup("unit", || -> () { panic!("no fixture") })
            .case("test_never_runs", |_| {});
        let units = discovered(Registry::new().register(unit));

        let report = Runner::new().run(&units);

        assert_eq!(report.passed(), 0);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.errored(), 1);
        assert!(!report.success());
    }

    #[test]
    fn test_zero_case_unit_contributes_nothing() {
        let units = discovered(Registry::new().register(TestUnit::new("empty")));

        let report = Runner::new().run(&units);

        assert_eq!(report.total(), 0);
        assert!(report.success());
    }

    #[test]
    fn test_failure_does_not_stop_later_cases() {
        let unit = TestUnit::new("unit")
            .case("test_fails", |_| crate::failure::fail("expected true"))
            .case("test_still_runs", |_| {});
        let units = discovered(Registry::new().register(unit));

        let report = Runner::new().run(&units);

        assert_eq!(report.total(), 2);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_fail_fast_stops_after_first_bad_case() {
        let unit = TestUnit::new("unit")
            .case("test_fails", |_| crate::failure::fail("expected true"))
            .case("test_never_scheduled", |_| {});
        let units = discovered(Registry::new().register(unit));

        let report = Runner::new().with_fail_fast(true).run(&units);

        assert_eq!(report.total(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_filter_selects_by_case_name() {
        let unit = TestUnit::new("unit")
            .case("test_addition", |_| {})
            .case("test_subtraction", |_| {});
        let units = discovered(Registry::new().register(unit));

        let runner = Runner::new().with_filter("add");
        let plan = runner.plan(&units);
        assert_eq!(plan.len(), 1);

        let report = runner.run(&units);
        assert_eq!(report.total(), 1);
        assert_eq!(report.cases[0].case, "test_addition");
    }

    #[test]
    fn test_plan_is_stable_across_runs() {
        let make_units = || {
            discovered(
                Registry::new()
                    .register(
                        TestUnit::new("alpha")
                            .case("test_one", |_| {})
                            .case("test_two", |_| {}),
                    )
                    .register(TestUnit::new("beta").case("test_three", |_| {})),
            )
        };

        let runner = Runner::new();
        let order = |units: &[Box<dyn Unit>]| -> Vec<String> {
            runner
                .plan(units)
                .iter()
                .map(|(unit, index)| format!("{}::{}", unit.name(), unit.case_name(*index)))
                .collect()
        };

        let first = make_units();
        let second = make_units();
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn test_idempotent_counts_across_runs() {
        let make_units = || {
            discovered(
                Registry::new().register(
                    TestUnit::new("unit")
                        .case("test_ok", |_| {})
                        .case("test_fails", |_| crate::failure::fail("expected true")),
                ),
            )
        };

        let first = Runner::new().run(&make_units());
        let second = Runner::new().run(&make_units());

        assert_eq!(first.passed(), second.passed());
        assert_eq!(first.failed(), second.failed());
        assert_eq!(first.errored(), second.errored());
    }

    #[test]
    fn test_parallel_run_keeps_fixture_isolation() {
        let unit = TestUnit::with_setup("unit", || vec![0_u8; 8])
            .case("test_a", |fx| {
                fx.push(1);
                crate::expect_eq!(fx.len(), 9);
            })
            .case("test_b", |fx| crate::expect_eq!(fx.len(), 8))
            .case("test_c", |fx| crate::expect_eq!(fx.len(), 8));
        let units = discovered(Registry::new().register(unit));

        let report = Runner::new().with_parallel(true).run(&units);

        assert_eq!(report.total(), 3);
        assert_eq!(report.passed(), 3);
        assert!(report.success());
    }

    #[test]
    fn test_teardown_error_surfaces_in_report() {
        let unit = TestUnit::new("unit")
            .teardown(|_| panic!("teardown boom"))
            .case("test_ok", |_| {});
        let units = discovered(Registry::new().register(unit));

        let report = Runner::new().run(&units);

        assert_eq!(report.passed(), 1);
        assert_eq!(report.teardown_errors(), 1);
        assert!(!report.success());
        assert_eq!(
            report.cases[0].teardown_error,
            Some("teardown boom".to_string())
        );
    }
}
