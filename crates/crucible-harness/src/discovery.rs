//! Static registry validation
//!
//! Units are registered explicitly; "discovery" here means validating
//! the registry rather than scanning anything. A unit that fails
//! validation is dropped with a [`DiscoveryError`] and the remaining
//! units still run.

use crate::unit::Unit;
use std::collections::HashSet;
use thiserror::Error;

/// A unit that could not be accepted into the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("duplicate unit name `{unit}`")]
    DuplicateUnit { unit: String },

    #[error("unit `{unit}` declares case `{case}` more than once")]
    DuplicateCase { unit: String, case: String },

    #[error("unit registered with an empty name")]
    UnnamedUnit,

    #[error("unit `{unit}` declares a case with an empty name")]
    UnnamedCase { unit: String },
}

/// The statically registered set of test units.
#[derive(Default)]
pub struct Registry {
    units: Vec<Box<dyn Unit>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry { units: Vec::new() }
    }

    /// Register a unit. Registration order is execution order.
    pub fn register(mut self, unit: impl Unit + 'static) -> Self {
        self.units.push(Box::new(unit));
        self
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Validate the registry, separating runnable units from
    /// configuration errors. Rejecting one unit never aborts the rest.
    pub fn discover(self) -> (Vec<Box<dyn Unit>>, Vec<DiscoveryError>) {
        let mut seen = HashSet::new();
        let mut accepted = Vec::new();
        let mut errors = Vec::new();

        for unit in self.units {
            match validate(unit.as_ref(), &mut seen) {
                Ok(()) => accepted.push(unit),
                Err(error) => errors.push(error),
            }
        }

        (accepted, errors)
    }
}

fn validate(unit: &dyn Unit, seen: &mut HashSet<String>) -> Result<(), DiscoveryError> {
    if unit.name().is_empty() {
        return Err(DiscoveryError::UnnamedUnit);
    }
    if !seen.insert(unit.name().to_string()) {
        return Err(DiscoveryError::DuplicateUnit {
            unit: unit.name().to_string(),
        });
    }

    let mut case_names = HashSet::new();
    for index in 0..unit.case_count() {
        let case = unit.case_name(index);
        if case.is_empty() {
            return Err(DiscoveryError::UnnamedCase {
                unit: unit.name().to_string(),
            });
        }
        if !case_names.insert(case.to_string()) {
            return Err(DiscoveryError::DuplicateCase {
                unit: unit.name().to_string(),
                case: case.to_string(),
            });
        }
    }

    Ok(())
}
