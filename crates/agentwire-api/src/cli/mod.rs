//! CLI command definitions for the `awire` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod replay;
pub mod sanitize;
pub mod truncate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use agentwire_types::config::{GlobalConfig, RuntimeKind};

/// Stream agent runtime events to chat clients as plain-text frames.
#[derive(Parser)]
#[command(name = "awire", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true, env = "AGENTWIRE_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),

    /// Run the transducer over a JSONL event transcript and print the wire output.
    Replay {
        /// Transcript file, one runtime event per line.
        file: PathBuf,

        /// Log the model input window of every model-start event.
        #[arg(long)]
        trace_model_input: bool,

        /// Thread token used in log records.
        #[arg(long, default_value = "replay")]
        thread_id: String,
    },

    /// Sanitize a raw tool output read from a file or stdin.
    Sanitize {
        /// Input file (stdin when omitted).
        file: Option<PathBuf>,

        /// Delimiter tag prefix (defaults to the configured tag).
        #[arg(long)]
        tag: Option<String>,
    },

    /// Truncate a JSON message array without splitting tool-call groups.
    Truncate {
        /// JSON file holding an array of messages.
        file: PathBuf,

        /// Maximum number of messages to keep (defaults to the configured bound).
        #[arg(long)]
        max: Option<usize>,

        /// Prepend this system prompt, as sent to the model.
        #[arg(long)]
        system: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Runtime selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuntimeArg {
    Echo,
    Replay,
}

impl From<RuntimeArg> for RuntimeKind {
    fn from(arg: RuntimeArg) -> Self {
        match arg {
            RuntimeArg::Echo => RuntimeKind::Echo,
            RuntimeArg::Replay => RuntimeKind::Replay,
        }
    }
}

/// Flags of `awire serve`. Each one overrides the matching config value.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, env = "AGENTWIRE_HOST")]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(short, long, env = "AGENTWIRE_PORT")]
    pub port: Option<u16>,

    /// Agent runtime backing the chat endpoint.
    #[arg(long, value_enum, env = "AGENTWIRE_RUNTIME")]
    pub runtime: Option<RuntimeArg>,

    /// Transcript replayed by the replay runtime.
    #[arg(long, env = "AGENTWIRE_TRANSCRIPT")]
    pub transcript: Option<PathBuf>,

    /// Maximum history messages sent to the reasoning step.
    #[arg(long)]
    pub max_history: Option<usize>,

    /// Log the model input window of every model-start event.
    #[arg(long)]
    pub trace_model_input: bool,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut GlobalConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(runtime) = self.runtime {
            config.runtime.kind = runtime.into();
        }
        if let Some(transcript) = &self.transcript {
            config.runtime.transcript = Some(transcript.clone());
        }
        if let Some(max_history) = self.max_history {
            config.stream.max_history = max_history;
        }
        if self.trace_model_input {
            config.stream.trace_model_input = true;
        }
    }
}
