//! crucible - run the statically registered test units
//!
//! Invoking the binary directly executes the runner against every unit
//! in [`units::registry`], prints one line per case plus a summary, and
//! exits 0 on overall success.

use clap::Parser;
use crucible_harness::{entry, Arguments};
use std::process::ExitCode;

mod units;

fn main() -> ExitCode {
    let args = Arguments::parse();
    entry::run(&args, units::registry())
}
