//! Test units - named groups of cases sharing setup and teardown
//!
//! A [`TestUnit`] is generic over the fixture type its setup produces;
//! the runner consumes units through the object-safe [`Unit`] trait so
//! differently-typed units can live in one registry.

use crate::failure;
use crate::report::Outcome;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

type SetupFn<F> = Box<dyn Fn() -> F + Send + Sync>;
type HookFn<F> = Box<dyn Fn(&mut F) + Send + Sync>;

/// A named verification procedure within a unit.
pub struct TestCase<F> {
    name: String,
    body: HookFn<F>,
}

/// A named collection of cases with optional setup and teardown.
///
/// Setup runs exactly once immediately before every case body and
/// constructs that case's own fixture; teardown runs exactly once
/// immediately after, even when the body panicked. Definitions are
/// static: nothing here is mutated by running.
pub struct TestUnit<F = ()> {
    name: String,
    setup: SetupFn<F>,
    teardown: Option<HookFn<F>>,
    cases: Vec<TestCase<F>>,
}

impl TestUnit<()> {
    /// Unit without a fixture.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_setup(name, || ())
    }
}

impl<F> TestUnit<F> {
    /// Unit whose setup constructs a fresh fixture before every case.
    pub fn with_setup(
        name: impl Into<String>,
        setup: impl Fn() -> F + Send + Sync + 'static,
    ) -> Self {
        TestUnit {
            name: name.into(),
            setup: Box::new(setup),
            teardown: None,
            cases: Vec::new(),
        }
    }

    /// Hook run after every case, including failed and errored ones.
    pub fn teardown(mut self, hook: impl Fn(&mut F) + Send + Sync + 'static) -> Self {
        self.teardown = Some(Box::new(hook));
        self
    }

    /// Register a case. Declaration order is execution order.
    pub fn case(
        mut self,
        name: impl Into<String>,
        body: impl Fn(&mut F) + Send + Sync + 'static,
    ) -> Self {
        self.cases.push(TestCase {
            name: name.into(),
            body: Box::new(body),
        });
        self
    }
}

/// Result of one case's full lifecycle.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub outcome: Outcome,
    /// Panic raised by teardown, kept apart from the case's own outcome.
    pub teardown_error: Option<String>,
}

/// Object-safe view of a test unit, erasing the fixture type.
///
/// Cases are addressed by their position in `0..case_count()`.
/// `case_name` and `run_case` panic on an out-of-range index.
pub trait Unit: Send + Sync {
    fn name(&self) -> &str;
    fn case_count(&self) -> usize;
    fn case_name(&self, index: usize) -> &str;
    /// Run one case through its full setup/body/teardown lifecycle.
    fn run_case(&self, index: usize) -> CaseOutcome;
}

impl<F> Unit for TestUnit<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn case_count(&self) -> usize {
        self.cases.len()
    }

    fn case_name(&self, index: usize) -> &str {
        &self.cases[index].name
    }

    fn run_case(&self, index: usize) -> CaseOutcome {
        let case = &self.cases[index];

        // A setup panic errors the current case only: its body and
        // teardown are skipped, the next case still runs.
        let mut fixture = match catch_unwind(AssertUnwindSafe(|| (self.setup)())) {
            Ok(fixture) => fixture,
            Err(payload) => {
                return CaseOutcome {
                    outcome: Outcome::Errored {
                        message: format!(
                            "setup panicked: {}",
                            failure::panic_message(payload.as_ref())
                        ),
                    },
                    teardown_error: None,
                }
            }
        };

        let outcome = match catch_unwind(AssertUnwindSafe(|| (case.body)(&mut fixture))) {
            Ok(()) => Outcome::Passed,
            Err(payload) => classify(payload),
        };

        // Teardown runs regardless of the body's outcome; a panic here
        // is an additional error that never rewrites `outcome`.
        let teardown_error = self.teardown.as_ref().and_then(|hook| {
            catch_unwind(AssertUnwindSafe(|| hook(&mut fixture)))
                .err()
                .map(|payload| failure::panic_message(payload.as_ref()))
        });

        CaseOutcome {
            outcome,
            teardown_error,
        }
    }
}

/// The assertion-failed signal is a failure; every other payload is an
/// error.
fn classify(payload: Box<dyn Any + Send>) -> Outcome {
    let message = failure::panic_message(payload.as_ref());
    if failure::is_failure(payload.as_ref()) {
        Outcome::Failed { message }
    } else {
        Outcome::Errored { message }
    }
}
