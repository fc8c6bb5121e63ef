//! Test reporter - render run results

use crate::discovery::DiscoveryError;
use crate::report::{CaseReport, Outcome, RunReport};
use colored::*;
use std::io::{self, Write};

/// Human-readable reporting: one line per executed case, a summary line
/// with the passed/failed/errored counts and total, then details for
/// anything that went wrong.
pub struct Reporter {
    /// Compact dot-per-case output instead of one line per case.
    quiet: bool,
    no_color: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Reporter {
            quiet,
            no_color: false,
        }
    }

    /// Disable colored output.
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    pub fn report(&self, report: &RunReport, discovery_errors: &[DiscoveryError]) {
        if self.no_color {
            colored::control::set_override(false);
        }

        for case in &report.cases {
            self.print_case(case);
        }

        // Dots need a trailing newline before the summary.
        if self.quiet && !report.cases.is_empty() {
            println!();
        }

        println!();
        self.print_summary(report);
        self.print_problems(report);
        self.print_discovery_errors(discovery_errors);

        if self.no_color {
            colored::control::unset_override();
        }
    }

    fn print_case(&self, case: &CaseReport) {
        if self.quiet {
            let mark = match &case.outcome {
                Outcome::Passed => ".".green(),
                Outcome::Failed { .. } => "F".red().bold(),
                Outcome::Errored { .. } => "E".yellow().bold(),
            };
            print!("{}", mark);
            let _ = io::stdout().flush();
            return;
        }

        let tag = match &case.outcome {
            Outcome::Passed => "PASS".green().bold(),
            Outcome::Failed { .. } => "FAIL".red().bold(),
            Outcome::Errored { .. } => "ERROR".yellow().bold(),
        };
        println!(
            "{} {}::{} ({:.2?})",
            tag, case.unit, case.case, case.duration
        );
    }

    fn print_summary(&self, report: &RunReport) {
        println!("{}", "─".repeat(50));

        let status = if report.success() {
            "PASSED".green().bold()
        } else {
            "FAILED".red().bold()
        };

        let failed = report.failed();
        let errored = report.errored();
        println!(
            "Result: {} | {} passed, {} failed, {} errored, {} total",
            status,
            report.passed().to_string().green().bold(),
            if failed > 0 {
                failed.to_string().red().bold()
            } else {
                failed.to_string().normal()
            },
            if errored > 0 {
                errored.to_string().yellow().bold()
            } else {
                errored.to_string().normal()
            },
            report.total().to_string().bold(),
        );

        let teardown_errors = report.teardown_errors();
        if teardown_errors > 0 {
            println!(
                "{} teardown {} recorded",
                teardown_errors.to_string().yellow().bold(),
                if teardown_errors == 1 { "error" } else { "errors" },
            );
        }

        println!("Time: {:.2?}", report.duration);
    }

    /// Details for failed and errored cases and teardown panics.
    fn print_problems(&self, report: &RunReport) {
        let problems: Vec<_> = report
            .cases
            .iter()
            .filter(|case| !case.clean())
            .collect();

        if problems.is_empty() {
            return;
        }

        println!();
        println!("{}", "Problems:".red().bold());
        println!();

        for case in problems {
            println!("  {} {}::{}", "●".red(), case.unit, case.case.bold());

            if let Some(message) = case.outcome.message() {
                let kind = if case.outcome.is_failed() {
                    "failure"
                } else {
                    "error"
                };
                println!("    {}:", kind);
                for line in message.lines() {
                    println!("      {}", line.dimmed());
                }
            }
            if let Some(message) = &case.teardown_error {
                println!("    teardown error:");
                for line in message.lines() {
                    println!("      {}", line.dimmed());
                }
            }
            println!();
        }
    }

    fn print_discovery_errors(&self, errors: &[DiscoveryError]) {
        if errors.is_empty() {
            return;
        }

        println!();
        println!("{}", "Configuration errors:".yellow().bold());
        for error in errors {
            println!("  {} {}", "●".yellow(), error);
        }
        println!();
    }
}

/// JSON rendering of a run, mirroring the human-readable report.
pub fn render_json(report: &RunReport, discovery_errors: &[DiscoveryError]) -> serde_json::Value {
    let cases: Vec<_> = report
        .cases
        .iter()
        .map(|case| {
            serde_json::json!({
                "unit": case.unit,
                "case": case.case,
                "outcome": case.outcome.label(),
                "message": case.outcome.message(),
                "teardown_error": case.teardown_error,
                "duration_ms": case.duration.as_millis(),
            })
        })
        .collect();

    serde_json::json!({
        "passed": report.passed(),
        "failed": report.failed(),
        "errored": report.errored(),
        "teardown_errors": report.teardown_errors(),
        "total": report.total(),
        "success": report.success(),
        "duration_ms": report.duration.as_millis(),
        "cases": cases,
        "discovery_errors": discovery_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn make_case(name: &str, outcome: Outcome) -> CaseReport {
        CaseReport {
            unit: "unit".to_string(),
            case: name.to_string(),
            outcome,
            teardown_error: None,
            duration: Duration::from_millis(10),
        }
    }

    fn make_report(cases: Vec<CaseReport>) -> RunReport {
        RunReport {
            cases,
            duration: Duration::from_millis(25),
        }
    }

    #[test]
    fn test_reporter_all_pass() {
        let report = make_report(vec![
            make_case("test_one", Outcome::Passed),
            make_case("test_two", Outcome::Passed),
        ]);

        let reporter = Reporter::new(false).with_no_color(true);
        // Just verify it doesn't panic
        reporter.report(&report, &[]);
    }

    #[test]
    fn test_reporter_with_problems() {
        let mut errored = make_case(
            "test_teardown",
            Outcome::Errored {
                message: "boom".to_string(),
            },
        );
        errored.teardown_error = Some("teardown boom".to_string());

        let report = make_report(vec![
            make_case("test_pass", Outcome::Passed),
            make_case(
                "test_fail",
                Outcome::Failed {
                    message: "expected true".to_string(),
                },
            ),
            errored,
        ]);

        let reporter = Reporter::new(false).with_no_color(true);
        reporter.report(&report, &[]);
    }

    #[test]
    fn test_reporter_quiet_mode() {
        let report = make_report(vec![make_case("test_one", Outcome::Passed)]);

        let reporter = Reporter::new(true).with_no_color(true);
        reporter.report(&report, &[]);
    }

    #[test]
    fn test_reporter_discovery_errors() {
        let report = make_report(Vec::new());
        let errors = vec![DiscoveryError::DuplicateUnit {
            unit: "unit".to_string(),
        }];

        let reporter = Reporter::new(false).with_no_color(true);
        reporter.report(&report, &errors);
    }

    #[test]
    fn test_json_shape() {
        let report = make_report(vec![
            make_case("test_pass", Outcome::Passed),
            make_case(
                "test_fail",
                Outcome::Failed {
                    message: "expected true".to_string(),
                },
            ),
        ]);

        let value = render_json(&report, &[]);

        assert_eq!(value["passed"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["errored"], 0);
        assert_eq!(value["total"], 2);
        assert_eq!(value["success"], false);
        assert_eq!(value["cases"][1]["outcome"], "failed");
        assert_eq!(value["cases"][1]["message"], "expected true");
    }

    #[test]
    fn test_json_reports_discovery_errors() {
        let report = make_report(Vec::new());
        let errors = vec![DiscoveryError::UnnamedUnit];

        let value = render_json(&report, &errors);

        assert_eq!(value["total"], 0);
        assert_eq!(value["success"], true);
        assert_eq!(
            value["discovery_errors"][0],
            "unit registered with an empty name"
        );
    }
}
