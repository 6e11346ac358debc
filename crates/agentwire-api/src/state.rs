//! Application state shared by the HTTP handlers.
//!
//! AppState pins the runtime chosen from config, the sanitizer built from the
//! configured delimiter tag, and the registry of in-flight chat streams.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use agentwire_core::runtime::AgentRuntime;
use agentwire_core::sanitize::Sanitizer;
use agentwire_infra::runtime::build_runtime;
use agentwire_types::config::GlobalConfig;

/// One chat stream currently writing to a client.
#[derive(Debug, Clone)]
pub struct ActiveStream {
    pub thread_id: String,
    pub cancel: CancellationToken,
    pub started_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<dyn AgentRuntime>,
    pub config: Arc<GlobalConfig>,
    pub sanitizer: Sanitizer,
    pub active_streams: Arc<DashMap<Uuid, ActiveStream>>,
}

impl AppState {
    /// Build state from config, selecting the runtime it names.
    ///
    /// Relative transcript paths resolve against `data_dir`.
    pub fn init(config: GlobalConfig, data_dir: &Path) -> anyhow::Result<Self> {
        let runtime = build_runtime(&config, data_dir)?;
        Self::with_runtime(config, runtime)
    }

    /// Build state around an explicit runtime.
    pub fn with_runtime(
        config: GlobalConfig,
        runtime: Arc<dyn AgentRuntime>,
    ) -> anyhow::Result<Self> {
        let sanitizer = Sanitizer::new(&config.stream.tool_output_tag)?;
        tracing::info!(
            runtime = runtime.name(),
            tool_output_tag = sanitizer.tag(),
            max_history = config.stream.max_history,
            "Application state ready"
        );

        Ok(Self {
            runtime,
            config: Arc::new(config),
            sanitizer,
            active_streams: Arc::new(DashMap::new()),
        })
    }

    /// Register a new in-flight stream for `thread_id`.
    ///
    /// The returned guard removes the entry when dropped.
    pub fn register_stream(&self, thread_id: &str) -> (StreamGuard, CancellationToken) {
        let id = Uuid::now_v7();
        let cancel = CancellationToken::new();
        self.active_streams.insert(
            id,
            ActiveStream {
                thread_id: thread_id.to_string(),
                cancel: cancel.clone(),
                started_at: Utc::now(),
            },
        );
        let guard = StreamGuard {
            id,
            streams: Arc::clone(&self.active_streams),
        };
        (guard, cancel)
    }

    /// Cancel every in-flight stream of `thread_id`. Returns how many were
    /// still running.
    pub fn cancel_thread_streams(&self, thread_id: &str) -> usize {
        let mut cancelled = 0;
        for entry in self.active_streams.iter() {
            let stream = entry.value();
            if stream.thread_id == thread_id && !stream.cancel.is_cancelled() {
                stream.cancel.cancel();
                cancelled += 1;
            }
        }
        cancelled
    }

    pub fn active_stream_count(&self) -> usize {
        self.active_streams.len()
    }
}

/// Removes a stream from the registry when the response body is dropped.
pub struct StreamGuard {
    id: Uuid,
    streams: Arc<DashMap<Uuid, ActiveStream>>,
}

impl StreamGuard {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        if let Some((_, stream)) = self.streams.remove(&self.id) {
            let elapsed = Utc::now() - stream.started_at;
            tracing::debug!(
                stream_id = %self.id,
                thread_id = %stream.thread_id,
                elapsed_ms = elapsed.num_milliseconds(),
                "Stream released"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentwire_infra::runtime::EchoRuntime;

    fn state() -> AppState {
        AppState::with_runtime(GlobalConfig::default(), Arc::new(EchoRuntime::new(40))).unwrap()
    }

    #[test]
    fn test_guard_drop_releases_stream() {
        let state = state();
        let (guard, _cancel) = state.register_stream("t1");
        assert_eq!(state.active_stream_count(), 1);
        drop(guard);
        assert_eq!(state.active_stream_count(), 0);
    }

    #[test]
    fn test_cancel_only_touches_matching_thread() {
        let state = state();
        let (_g1, c1) = state.register_stream("t1");
        let (_g2, c2) = state.register_stream("t1");
        let (_g3, c3) = state.register_stream("t2");

        assert_eq!(state.cancel_thread_streams("t1"), 2);
        assert!(c1.is_cancelled() && c2.is_cancelled());
        assert!(!c3.is_cancelled());

        // Already-cancelled streams are not counted again.
        assert_eq!(state.cancel_thread_streams("t1"), 0);
        assert_eq!(state.cancel_thread_streams("missing"), 0);
    }

    #[test]
    fn test_invalid_config_runtime_fails_init() {
        let mut config = GlobalConfig::default();
        config.runtime.kind = agentwire_types::config::RuntimeKind::Replay;
        assert!(AppState::init(config, Path::new("/tmp")).is_err());
    }
}
