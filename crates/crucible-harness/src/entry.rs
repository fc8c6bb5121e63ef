//! Process entry - wire discovery, execution, and reporting together

use crate::args::Arguments;
use crate::discovery::Registry;
use crate::reporter::{self, Reporter};
use crate::runner::Runner;
use std::process::ExitCode;

/// All cases passed (or nothing ran).
pub const EXIT_SUCCESS: u8 = 0;
/// Failures or errors were recorded.
pub const EXIT_FAILURES: u8 = 1;
/// The registry itself was invalid.
pub const EXIT_DISCOVERY: u8 = 2;

/// Execute the registry according to the parsed arguments.
pub fn run(args: &Arguments, registry: Registry) -> ExitCode {
    ExitCode::from(execute(args, registry))
}

/// The exit-code computation behind [`run`], kept separate so the
/// mapping is assertable.
pub fn execute(args: &Arguments, registry: Registry) -> u8 {
    if args.no_color {
        colored::control::set_override(false);
    }

    let (units, discovery_errors) = registry.discover();

    // clap rejects --parallel together with --fail-fast: fail-fast
    // needs the sequential schedule to have a meaningful "first"
    // failure.
    let mut runner = Runner::new()
        .with_parallel(args.parallel)
        .with_fail_fast(args.fail_fast);
    if let Some(pattern) = &args.pattern {
        runner = runner.with_filter(pattern.clone());
    }

    if args.list {
        for (unit, index) in runner.plan(&units) {
            println!("{}::{}", unit.name(), unit.case_name(index));
        }
        for error in &discovery_errors {
            eprintln!("configuration error: {}", error);
        }
        return if discovery_errors.is_empty() {
            EXIT_SUCCESS
        } else {
            EXIT_DISCOVERY
        };
    }

    let report = runner.run(&units);

    if args.json {
        println!("{}", reporter::render_json(&report, &discovery_errors));
    } else {
        Reporter::new(args.quiet)
            .with_no_color(args.no_color)
            .report(&report, &discovery_errors);
    }

    if !discovery_errors.is_empty() {
        EXIT_DISCOVERY
    } else if report.success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURES
    }
}
