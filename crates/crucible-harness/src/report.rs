//! Run reports - aggregate outcomes for one runner invocation

use std::time::Duration;

/// Terminal outcome of a single executed case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The body returned normally.
    Passed,
    /// The body raised the assertion-failed signal.
    Failed { message: String },
    /// Setup or the body raised any other signal.
    Errored { message: String },
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Outcome::Errored { .. })
    }

    /// The failure or error message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Passed => None,
            Outcome::Failed { message } | Outcome::Errored { message } => Some(message),
        }
    }

    /// Short lower-case label, used by the JSON report.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed { .. } => "failed",
            Outcome::Errored { .. } => "errored",
        }
    }
}

/// Report for one executed case.
#[derive(Debug, Clone)]
pub struct CaseReport {
    /// Name of the unit the case belongs to.
    pub unit: String,
    /// Name of the case within its unit.
    pub case: String,
    pub outcome: Outcome,
    /// Panic raised by teardown. Recorded without changing `outcome`.
    pub teardown_error: Option<String>,
    pub duration: Duration,
}

impl CaseReport {
    /// True when the case passed and its teardown did not panic.
    pub fn clean(&self) -> bool {
        self.outcome.is_passed() && self.teardown_error.is_none()
    }
}

/// Aggregate result of one runner invocation.
///
/// Created fresh per run; unit and case definitions themselves are
/// never mutated.
#[derive(Debug, Default)]
pub struct RunReport {
    pub cases: Vec<CaseReport>,
    pub duration: Duration,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_failed()).count()
    }

    pub fn errored(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_errored()).count()
    }

    /// Teardown panics, counted apart from the per-case outcomes.
    pub fn teardown_errors(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| c.teardown_error.is_some())
            .count()
    }

    pub fn total(&self) -> usize {
        self.cases.len()
    }

    /// True iff nothing failed and nothing errored, teardowns included.
    pub fn success(&self) -> bool {
        self.failed() == 0 && self.errored() == 0 && self.teardown_errors() == 0
    }
}
