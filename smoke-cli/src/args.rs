use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct TargetArgs {
    /// Base URL of the target server, e.g. http://relaym.local:8080
    #[arg(long)]
    pub base_url: String,
    /// Value sent as the X-CSRF-TOKEN header on every request.
    #[arg(long)]
    pub csrf_token: String,
    /// Value of the `session` cookie from an interactive login.
    #[arg(long)]
    pub cookie: String,
}

#[derive(Debug, Args, Clone)]
pub struct ScenarioArgs {
    /// Which playback-state path the server speaks.
    #[arg(long, value_enum, default_value_t = PlaybackPathArg::Playback)]
    pub playback_path: PlaybackPathArg,
    /// Settle time after play/pause transitions in the builtin scenario.
    #[arg(long, default_value_t = 5000)]
    pub settle_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlaybackPathArg {
    Playback,
    State,
}

impl From<PlaybackPathArg> for smoke_exec::PlaybackPath {
    fn from(v: PlaybackPathArg) -> Self {
        match v {
            PlaybackPathArg::Playback => smoke_exec::PlaybackPath::Playback,
            PlaybackPathArg::State => smoke_exec::PlaybackPath::State,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Run every step even after a failure (default is fail-fast).
    #[arg(long)]
    pub continue_on_error: bool,
    /// Extra delay inserted before each step after the first, in ms.
    #[arg(long)]
    pub step_delay_ms: Option<u64>,
    /// Per-request timeout in ms.
    #[arg(long, default_value_t = 30000)]
    pub timeout: u64,
    /// JSON file with run inputs (session name, track uri, ...).
    #[arg(long)]
    pub inputs: Option<PathBuf>,
    /// Override a single input, e.g. --set track_uri=spotify:track:xyz
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set_inputs: Vec<String>,
    /// Emit step events as JSON lines while the run progresses.
    #[arg(long)]
    pub events: bool,
}
