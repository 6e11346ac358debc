//! Lazy stream adapter from runtime events to wire frames.
//!
//! Each frame is produced as soon as its source event has been processed;
//! the consumer pulls frames and the runtime is only polled on demand. The
//! `Final` frame, if any, is emitted after the source stream has ended.

use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use agentwire_types::error::RuntimeError;
use agentwire_types::event::RuntimeEvent;
use agentwire_types::frame::Frame;

use super::session::{StreamSession, TransducerOptions};

enum Step {
    Event(RuntimeEvent),
    Failed(RuntimeError),
    Exhausted,
    Cancelled,
}

/// Convert a runtime event stream into a stream of frames.
///
/// Ends without a `Final` frame when `cancel` fires or the runtime reports an
/// error mid-stream; frames already yielded stand.
pub fn transduce<S>(
    source: S,
    options: TransducerOptions,
    cancel: CancellationToken,
) -> impl Stream<Item = Frame> + Send + 'static
where
    S: Stream<Item = Result<RuntimeEvent, RuntimeError>> + Send + 'static,
{
    async_stream::stream! {
        let thread_id = options.thread_id.clone();
        let mut session = StreamSession::new(options);
        let mut source = std::pin::pin!(source);

        loop {
            let step = tokio::select! {
                biased;
                _ = cancel.cancelled() => Step::Cancelled,
                next = source.next() => match next {
                    Some(Ok(event)) => Step::Event(event),
                    Some(Err(e)) => Step::Failed(e),
                    None => Step::Exhausted,
                },
            };

            match step {
                Step::Event(event) => {
                    if let Some(frame) = session.handle(event) {
                        yield frame;
                    }
                }
                Step::Failed(e) => {
                    tracing::warn!(thread_id = %thread_id, error = %e, "Runtime failed mid-stream, aborting turn");
                    return;
                }
                Step::Cancelled => {
                    tracing::info!(thread_id = %thread_id, "Stream cancelled");
                    return;
                }
                Step::Exhausted => break,
            }
        }

        match session.finish() {
            Some(frame) => yield frame,
            None => tracing::info!(thread_id = %thread_id, "Stream ended without terminal answer"),
        }
    }
}

/// Convenience wrapper: transduce and encode every frame to its wire text.
pub fn transduce_encoded<S>(
    source: S,
    options: TransducerOptions,
    cancel: CancellationToken,
) -> impl Stream<Item = String> + Send + 'static
where
    S: Stream<Item = Result<RuntimeEvent, RuntimeError>> + Send + 'static,
{
    transduce(source, options, cancel).map(|frame| frame.encode())
}
