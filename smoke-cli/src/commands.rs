use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a sequence against a target server.
    Run {
        /// Sequence document (YAML or JSON). Omit with --builtin.
        path: Option<PathBuf>,
        /// Run the builtin relaym smoke scenario instead of a file.
        #[arg(long, conflicts_with = "path")]
        builtin: bool,
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Parse and validate a sequence document.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show step order and dependencies without executing anything.
    Plan {
        path: Option<PathBuf>,
        #[arg(long, conflicts_with = "path")]
        builtin: bool,
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the builtin smoke sequence document.
    Scenario {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
