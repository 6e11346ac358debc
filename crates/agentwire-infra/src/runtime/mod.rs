//! Concrete `AgentRuntime` implementations.

pub mod echo;
pub mod replay;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use agentwire_core::runtime::AgentRuntime;
use agentwire_types::config::{GlobalConfig, RuntimeKind};
use agentwire_types::error::RuntimeError;

pub use echo::EchoRuntime;
pub use replay::ReplayRuntime;

use crate::filesystem::resolve_in_data_dir;

/// Build the runtime selected by `config.runtime.kind`.
///
/// A relative transcript path is resolved against `data_dir`.
pub fn build_runtime(
    config: &GlobalConfig,
    data_dir: &Path,
) -> Result<Arc<dyn AgentRuntime>, RuntimeError> {
    match config.runtime.kind {
        RuntimeKind::Echo => Ok(Arc::new(EchoRuntime::new(config.stream.max_history))),
        RuntimeKind::Replay => {
            let transcript = config.runtime.transcript.as_deref().ok_or_else(|| {
                RuntimeError::Unavailable("replay runtime requires runtime.transcript".to_string())
            })?;
            let runtime = ReplayRuntime::new(resolve_in_data_dir(data_dir, transcript))
                .with_event_delay(Duration::from_millis(config.runtime.event_delay_ms));
            Ok(Arc::new(runtime))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_echo_is_the_default_runtime() {
        let runtime = build_runtime(&GlobalConfig::default(), Path::new("/data")).unwrap();
        assert_eq!(runtime.name(), "echo");
    }

    #[test]
    fn test_replay_without_transcript_is_unavailable() {
        let mut config = GlobalConfig::default();
        config.runtime.kind = RuntimeKind::Replay;
        let err = build_runtime(&config, Path::new("/data")).err().unwrap();
        assert!(matches!(err, RuntimeError::Unavailable(_)));
    }

    #[test]
    fn test_replay_transcript_resolves_under_data_dir() {
        let mut config = GlobalConfig::default();
        config.runtime.kind = RuntimeKind::Replay;
        config.runtime.transcript = Some(PathBuf::from("turn.jsonl"));
        let runtime = build_runtime(&config, Path::new("/data")).unwrap();
        assert_eq!(runtime.name(), "replay");
    }
}
