//! Command-line surface for harness binaries

use clap::Parser;

/// Run the statically registered test units.
///
/// Every case runs its unit's setup first and teardown after, whatever
/// the body's outcome. The process exits 0 when everything passed,
/// 1 when failures or errors were recorded, and 2 when the registry
/// itself was invalid.
///
/// EXAMPLES:
///     crucible                 Run everything
///     crucible addition        Run cases whose name contains "addition"
///     crucible --parallel      Run cases on a thread pool
///     crucible --list          Show what would run
#[derive(Debug, Parser)]
#[command(version)]
pub struct Arguments {
    /// Only run cases whose name contains this pattern
    pub pattern: Option<String>,

    /// Run cases on a thread pool instead of sequentially
    #[arg(long, conflicts_with = "fail_fast")]
    pub parallel: bool,

    /// Stop scheduling new cases after the first failure or error
    #[arg(long)]
    pub fail_fast: bool,

    /// Compact dot-per-case output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// List the cases that would run, without running them
    #[arg(long)]
    pub list: bool,

    /// Disable colored output
    ///
    /// By convention `NO_COLOR` is set to any non-empty value, so the
    /// env binding needs the falsey parser rather than the strict bool
    /// one.
    #[arg(
        long,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Emit the run report as JSON
    #[arg(long)]
    pub json: bool,
}
