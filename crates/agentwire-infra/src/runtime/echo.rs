//! Echo runtime: answers every turn by repeating the user's message.
//!
//! Useful for exercising the full HTTP path without a model behind it. The
//! runtime keeps a short per-thread history so the model-input window it
//! reports looks like a real agent's. Stored histories are truncated to
//! `max_history` and the least recently used threads are evicted past
//! `max_threads`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use uuid::Uuid;

use agentwire_core::history::{prepare_model_input, truncate_history};
use agentwire_core::runtime::{AgentRuntime, BoxEventStream, TurnRequest};
use agentwire_types::error::RuntimeError;
use agentwire_types::event::RuntimeEvent;
use agentwire_types::message::Message;

const ECHO_SYSTEM_PROMPT: &str = "Repeat the user's message back to them.";
const MODEL_NAME: &str = "echo";

/// Threads remembered before the least recently used one is dropped.
pub const DEFAULT_MAX_THREADS: usize = 1024;

struct EchoThread {
    history: Vec<Message>,
    last_turn: u64,
}

pub struct EchoRuntime {
    max_history: usize,
    max_threads: usize,
    threads: Arc<DashMap<String, EchoThread>>,
    turns: AtomicU64,
}

impl EchoRuntime {
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history,
            max_threads: DEFAULT_MAX_THREADS,
            threads: Arc::new(DashMap::new()),
            turns: AtomicU64::new(0),
        }
    }

    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads.max(1);
        self
    }

    /// Stored conversation of `thread_id` (empty for unknown threads).
    pub fn history(&self, thread_id: &str) -> Vec<Message> {
        self.threads
            .get(thread_id)
            .map(|t| t.history.clone())
            .unwrap_or_default()
    }

    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }
}

/// Store `history` for `thread_id`, evicting least recently used threads
/// until at most `max_threads` remain.
fn remember(
    threads: &DashMap<String, EchoThread>,
    thread_id: String,
    history: Vec<Message>,
    turn: u64,
    max_threads: usize,
) {
    threads.insert(
        thread_id,
        EchoThread {
            history,
            last_turn: turn,
        },
    );

    while threads.len() > max_threads {
        let oldest = threads
            .iter()
            .min_by_key(|t| t.value().last_turn)
            .map(|t| t.key().clone());
        let Some(oldest) = oldest else { break };
        threads.remove(&oldest);
        tracing::debug!(thread_id = %oldest, "Evicted echo thread");
    }
}

impl AgentRuntime for EchoRuntime {
    fn name(&self) -> &str {
        MODEL_NAME
    }

    fn stream_turn(&self, request: TurnRequest) -> BoxEventStream {
        let threads = Arc::clone(&self.threads);
        let max_history = self.max_history;
        let max_threads = self.max_threads;
        let turn = self.turns.fetch_add(1, Ordering::Relaxed);

        Box::pin(async_stream::stream! {
            let mut history = threads
                .get(&request.thread_id)
                .map(|t| t.history.clone())
                .unwrap_or_default();
            history.push(Message::human(request.user_input.clone()));

            let model_run = Uuid::now_v7().to_string();
            yield Ok::<_, RuntimeError>(RuntimeEvent::ModelStart {
                run_id: model_run.clone(),
                name: MODEL_NAME.to_string(),
                input: prepare_model_input(ECHO_SYSTEM_PROMPT, &history, max_history),
            });

            let words: Vec<&str> = request.user_input.split_whitespace().collect();
            for word in &words {
                yield Ok(RuntimeEvent::Token {
                    run_id: model_run.clone(),
                    name: MODEL_NAME.to_string(),
                    text: (*word).to_string(),
                });
            }

            history.push(Message::ai_stop(words.join(" ")));
            let kept = truncate_history(&history, max_history);
            remember(&threads, request.thread_id.clone(), kept, turn, max_threads);

            yield Ok(RuntimeEvent::ChainEnd {
                run_id: Uuid::now_v7().to_string(),
                name: String::new(),
                nested: false,
                output: history,
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentwire_types::message::Role;
    use futures_util::StreamExt;

    async fn run_turn(runtime: &EchoRuntime, thread: &str, input: &str) -> Vec<RuntimeEvent> {
        runtime
            .stream_turn(TurnRequest::new(thread, input))
            .map(|e| e.unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_echo_emits_model_start_tokens_and_answer() {
        let runtime = EchoRuntime::new(40);
        let events = run_turn(&runtime, "t1", "hello  there").await;

        let kinds: Vec<&str> = events.iter().map(RuntimeEvent::kind).collect();
        assert_eq!(kinds, vec!["model-start", "token", "token", "chain-end"]);

        match &events[0] {
            RuntimeEvent::ModelStart { input, .. } => {
                assert_eq!(input.len(), 2);
                assert_eq!(input[0].role(), Role::System);
                assert_eq!(input[1].content(), "hello  there");
            }
            other => panic!("expected model-start, got {other:?}"),
        }

        match events.last() {
            Some(RuntimeEvent::ChainEnd { nested, output, .. }) => {
                assert!(!nested);
                assert_eq!(output.last().and_then(Message::finish_reason), Some("stop"));
                assert_eq!(output.last().map(Message::content), Some("hello there"));
            }
            other => panic!("expected chain-end, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_history_is_kept_per_thread_and_bounded() {
        let runtime = EchoRuntime::new(3);
        run_turn(&runtime, "t1", "one").await;
        run_turn(&runtime, "t1", "two").await;
        run_turn(&runtime, "t2", "other").await;

        assert_eq!(runtime.history("t1").len(), 3);
        assert_eq!(runtime.history("t2").len(), 2);
        assert!(runtime.history("missing").is_empty());

        let events = run_turn(&runtime, "t1", "three").await;
        match &events[0] {
            RuntimeEvent::ModelStart { input, .. } => {
                // system prompt plus the last three messages
                assert_eq!(input.len(), 4);
                assert_eq!(input[3].content(), "three");
            }
            other => panic!("expected model-start, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stored_history_and_thread_count_stay_bounded() {
        let runtime = EchoRuntime::new(2).with_max_threads(10);
        for i in 0..100 {
            run_turn(&runtime, &format!("fresh-{i}"), "hi").await;
        }
        for _ in 0..50 {
            run_turn(&runtime, "t0", "again").await;
        }

        assert!(runtime.thread_count() <= 10);
        assert_eq!(runtime.history("t0").len(), 2);
        // The most recently used thread survives eviction.
        assert_eq!(runtime.history("t0")[1].content(), "again");
        assert!(runtime.history("fresh-0").is_empty());
    }
}
