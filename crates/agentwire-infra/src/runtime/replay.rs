//! Replay runtime: plays back a recorded JSONL event transcript.
//!
//! Every turn replays the same file from the top, one `RuntimeEvent` per
//! line. Blank lines are skipped; malformed lines are logged and skipped so a
//! partially corrupt capture still replays.

use std::path::{Path, PathBuf};
use std::time::Duration;

use agentwire_core::runtime::{AgentRuntime, BoxEventStream, TurnRequest};
use agentwire_types::error::RuntimeError;
use agentwire_types::event::RuntimeEvent;

pub struct ReplayRuntime {
    transcript: PathBuf,
    event_delay: Duration,
}

impl ReplayRuntime {
    pub fn new(transcript: impl Into<PathBuf>) -> Self {
        Self {
            transcript: transcript.into(),
            event_delay: Duration::ZERO,
        }
    }

    /// Pause between replayed events.
    pub fn with_event_delay(mut self, delay: Duration) -> Self {
        self.event_delay = delay;
        self
    }

    pub fn transcript(&self) -> &Path {
        &self.transcript
    }
}

/// Decode transcript text, skipping blank and malformed lines.
pub fn parse_transcript(content: &str, path: &Path) -> Vec<RuntimeEvent> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| match RuntimeEvent::from_json_line(line) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    line = idx + 1,
                    error = %err,
                    "Skipping transcript line"
                );
                None
            }
        })
        .collect()
}

impl AgentRuntime for ReplayRuntime {
    fn name(&self) -> &str {
        "replay"
    }

    fn check(&self) -> Result<(), RuntimeError> {
        if self.transcript.is_file() {
            Ok(())
        } else {
            Err(RuntimeError::Unavailable(format!(
                "transcript {} not found",
                self.transcript.display()
            )))
        }
    }

    fn stream_turn(&self, request: TurnRequest) -> BoxEventStream {
        let path = self.transcript.clone();
        let delay = self.event_delay;

        Box::pin(async_stream::try_stream! {
            tracing::debug!(
                thread_id = %request.thread_id,
                path = %path.display(),
                "Replaying transcript"
            );

            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| RuntimeError::Transcript {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;

            for event in parse_transcript(&content, &path) {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                yield event;
            }
        })
    }
}
