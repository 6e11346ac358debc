//! `awire replay`: run the transducer offline over a recorded transcript.

use std::io::Write;
use std::path::Path;

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use agentwire_core::runtime::{AgentRuntime, TurnRequest};
use agentwire_core::stream::{TransducerOptions, transduce_encoded};
use agentwire_infra::runtime::ReplayRuntime;
use agentwire_observe::attrs;

/// Replay `file` and write the encoded frames to stdout as they are produced.
pub async fn replay(file: &Path, options: TransducerOptions) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    let frames = write_transcript(file, options, &mut stdout).await?;
    writeln!(stdout)?;
    tracing::info!(frames, "Replay complete");
    Ok(())
}

/// Transduce `file` into `out`. Returns the number of frames written.
pub async fn write_transcript<W: Write>(
    file: &Path,
    options: TransducerOptions,
    out: &mut W,
) -> anyhow::Result<usize> {
    let runtime = ReplayRuntime::new(file);
    runtime.check()?;

    let span = tracing::info_span!(attrs::SPAN_REPLAY, { attrs::THREAD_ID } = %options.thread_id);
    let events = runtime.stream_turn(TurnRequest::new(options.thread_id.clone(), String::new()));

    async {
        let mut chunks = std::pin::pin!(transduce_encoded(events, options, CancellationToken::new()));
        let mut frames = 0usize;
        while let Some(chunk) = chunks.next().await {
            out.write_all(chunk.as_bytes())?;
            out.flush()?;
            frames += 1;
        }
        Ok::<_, anyhow::Error>(frames)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_transcript_replays_to_wire_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("turn.jsonl");
        let lines = [
            r#"{"kind":"model-start","run_id":"m1","input":[{"type":"human","content":"3+4?"}]}"#,
            r#"{"kind":"tool-start","run_id":"1","name":"add","input":{"a":3,"b":4}}"#,
            r#"{"kind":"tool-start","run_id":"1","name":"add","input":{"a":3,"b":4}}"#,
            r#"{"kind":"tool-end","run_id":"1","name":"add","output":"7"}"#,
            r#"{"kind":"token","run_id":"m2","text":"Seven"}"#,
            r#"{"kind":"chain-end","run_id":"g","output":[{"type":"ai","content":"7","finish_reason":"stop"}]}"#,
        ];
        tokio::fs::write(&path, lines.join("\n")).await.unwrap();

        let mut out = Vec::new();
        let frames = write_transcript(&path, TransducerOptions::new("t1"), &mut out)
            .await
            .unwrap();

        assert_eq!(frames, 4);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            concat!(
                "\n__TOOL_CALL__:Calling tool 'add' with args {\"a\":3,\"b\":4}\n",
                "\n__TOOL_CALL_RESULT__:Tool 'add' returned: 7\n",
                "Seven ",
                "\n__FINAL__:7",
            )
        );
    }

    #[tokio::test]
    async fn test_missing_transcript_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let mut out = Vec::new();
        let result =
            write_transcript(&tmp.path().join("none.jsonl"), TransducerOptions::new("t1"), &mut out).await;
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
