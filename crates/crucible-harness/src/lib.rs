//! Crucible - a minimal static test harness
//!
//! Test units are explicit, statically registered descriptors: a named
//! group of cases sharing an optional setup and teardown hook. There is
//! no reflection-based discovery; whatever is put into the [`Registry`]
//! is what runs.
//!
//! ```
//! use crucible_harness::{Registry, Runner, TestUnit};
//!
//! let unit = TestUnit::with_setup("numbers", || vec![1, 2, 3])
//!     .teardown(|fx| fx.clear())
//!     .case("test_len", |fx| crucible_harness::expect_eq!(fx.len(), 3));
//!
//! let (units, errors) = Registry::new().register(unit).discover();
//! assert!(errors.is_empty());
//!
//! let report = Runner::new().run(&units);
//! assert!(report.success());
//! ```

pub mod args;
pub mod discovery;
pub mod entry;
pub mod failure;
pub mod report;
pub mod reporter;
pub mod runner;
pub mod unit;

pub use args::Arguments;
pub use discovery::{DiscoveryError, Registry};
pub use failure::{fail, Failure};
pub use report::{CaseReport, Outcome, RunReport};
pub use reporter::Reporter;
pub use runner::Runner;
pub use unit::{TestUnit, Unit};
