//! Per-session transducer state.
//!
//! A `StreamSession` is created when a stream starts and owned exclusively by
//! that stream's processing loop. It holds the dedup sets for tool starts,
//! tool ends and model starts, plus the terminal-answer latch. Sessions are
//! never shared or reused.

use std::collections::HashSet;

use agentwire_types::event::RuntimeEvent;
use agentwire_types::frame::Frame;
use agentwire_types::message::Message;

use crate::sanitize::Sanitizer;

use super::trace::log_model_input;

/// Completion signal of the message that ends a turn.
const STOP_REASON: &str = "stop";

/// Settings for one transducer session.
#[derive(Debug, Clone, Default)]
pub struct TransducerOptions {
    /// Conversation token, used only as a log field.
    pub thread_id: String,
    /// Log the input window of each distinct `model-start` event.
    pub trace_model_input: bool,
    /// Sanitizer applied to every tool output.
    pub sanitizer: Sanitizer,
}

impl TransducerOptions {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            ..Self::default()
        }
    }

    pub fn with_trace_model_input(mut self, enabled: bool) -> Self {
        self.trace_model_input = enabled;
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }
}

/// Frame counts for one session, logged when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub text_deltas: usize,
    pub tool_calls: usize,
    pub tool_results: usize,
    pub ignored_events: usize,
}

/// Synchronous transducer state machine for one stream.
#[derive(Debug)]
pub struct StreamSession {
    options: TransducerOptions,
    tool_calls_seen: HashSet<String>,
    tool_results_seen: HashSet<String>,
    model_starts_seen: HashSet<String>,
    terminal_answer: Option<String>,
    stats: SessionStats,
}

impl StreamSession {
    pub fn new(options: TransducerOptions) -> Self {
        Self {
            options,
            tool_calls_seen: HashSet::new(),
            tool_results_seen: HashSet::new(),
            model_starts_seen: HashSet::new(),
            terminal_answer: None,
            stats: SessionStats::default(),
        }
    }

    /// Process one event, returning the frame it produces, if any.
    pub fn handle(&mut self, event: RuntimeEvent) -> Option<Frame> {
        match event {
            RuntimeEvent::Token { text, .. } => {
                if text.is_empty() {
                    return None;
                }
                self.stats.text_deltas += 1;
                Some(Frame::TextDelta { content: text })
            }

            RuntimeEvent::ToolStart {
                run_id,
                name,
                input,
            } => {
                if !self.tool_calls_seen.insert(run_id) {
                    tracing::trace!(tool = %name, "Suppressing replayed tool-start");
                    return None;
                }
                self.stats.tool_calls += 1;
                Some(Frame::ToolCall { name, args: input })
            }

            RuntimeEvent::ToolEnd {
                run_id,
                name,
                output,
            } => {
                if !self.tool_results_seen.insert(run_id) {
                    tracing::trace!(tool = %name, "Suppressing replayed tool-end");
                    return None;
                }
                self.stats.tool_results += 1;
                let output = self.options.sanitizer.sanitize(&output.to_text());
                Some(Frame::ToolResult { name, output })
            }

            RuntimeEvent::ModelStart { run_id, input, .. } => {
                if self.options.trace_model_input && self.model_starts_seen.insert(run_id.clone()) {
                    log_model_input(&self.options.thread_id, &run_id, &input);
                }
                None
            }

            RuntimeEvent::ChainEnd { nested, output, .. } => {
                // First terminal answer wins; later chain ends are not inspected.
                if self.terminal_answer.is_none() && !nested && !output.is_empty() {
                    self.terminal_answer = extract_terminal_answer(&output);
                }
                None
            }

            RuntimeEvent::Unknown => {
                self.stats.ignored_events += 1;
                None
            }
        }
    }

    /// True once a terminal answer has been latched.
    pub fn has_terminal_answer(&self) -> bool {
        self.terminal_answer.is_some()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// End of stream: the `Final` frame, if a terminal answer was found.
    ///
    /// Yields the frame at most once.
    pub fn finish(&mut self) -> Option<Frame> {
        let frame = self
            .terminal_answer
            .take()
            .map(|content| Frame::Final { content });

        tracing::debug!(
            thread_id = %self.options.thread_id,
            text_deltas = self.stats.text_deltas,
            tool_calls = self.stats.tool_calls,
            tool_results = self.stats.tool_results,
            ignored_events = self.stats.ignored_events,
            has_final = frame.is_some(),
            "Stream session finished"
        );

        frame
    }
}

/// Scan `messages` newest-first for the `ai` message that ended the turn.
///
/// The content must be non-blank and the completion signal exactly "stop".
/// The content is returned untrimmed.
pub fn extract_terminal_answer(messages: &[Message]) -> Option<String> {
    messages.iter().rev().find_map(|msg| match msg {
        Message::Ai {
            content,
            finish_reason: Some(reason),
            ..
        } if reason == STOP_REASON && !content.trim().is_empty() => Some(content.clone()),
        _ => None,
    })
}
