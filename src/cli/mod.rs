// CLI module
// Command-line interface, argument parsing and command dispatch

mod args;
mod dispatch;

pub use args::{CliArgs, Command};
pub use dispatch::run;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or
/// --help), clap displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
