//! The distinguished assertion-failed signal
//!
//! A case body signals an unmet expectation by panicking with a
//! [`Failure`] payload. The runner downcasts captured payloads to tell
//! an expectation failure apart from any other panic, which is
//! classified as an error instead.

use std::any::Any;

/// Panic payload raised by [`fail`] and the `expect!` family of macros.
#[derive(Debug, Clone)]
pub struct Failure {
    message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Failure {
            message: message.into(),
        }
    }

    /// Human-readable description of the unmet expectation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Signal that an expected condition did not hold.
pub fn fail(message: impl Into<String>) -> ! {
    std::panic::panic_any(Failure::new(message));
}

/// Fail the current case unless the condition holds.
///
/// With a single argument the condition's source text becomes the
/// failure message; extra arguments format a custom message.
#[macro_export]
macro_rules! expect {
    ($cond:expr) => {
        if !$cond {
            $crate::failure::fail(concat!("expectation failed: ", stringify!($cond)));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::failure::fail(format!($($arg)+));
        }
    };
}

/// Fail the current case unless the two expressions compare equal.
#[macro_export]
macro_rules! expect_eq {
    ($left:expr, $right:expr) => {{
        let (left, right) = (&$left, &$right);
        if left != right {
            $crate::failure::fail(format!(
                "expectation failed: `{:?}` != `{:?}`",
                left, right
            ));
        }
    }};
}

/// True when the payload is the distinguished assertion-failed signal.
pub(crate) fn is_failure(payload: &(dyn Any + Send)) -> bool {
    payload.downcast_ref::<Failure>().is_some()
}

/// Render a captured panic payload as a message.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(failure) = payload.downcast_ref::<Failure>() {
        failure.message().to_string()
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
