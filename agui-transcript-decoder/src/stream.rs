//! Async stream adapters.
//!
//! Wraps an event stream with a live decoder so callers can render a fresh
//! transcript snapshot after every event, or just await the final result.

use crate::decoder::TranscriptDecoder;
use crate::transcript::Transcript;
use agui_transcript_events::AgUiEvent;
use futures::{Stream, StreamExt};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Stream adapter folding events into per-event transcript snapshots.
    ///
    /// Each item yielded is the transcript state after applying one more
    /// event, equal to the batch fold of the events seen so far. The last
    /// snapshot before the inner stream ends is the finished transcript.
    pub struct TranscriptStream<S> {
        #[pin]
        inner: S,
        decoder: TranscriptDecoder,
        finished: bool,
    }
}

impl<S> TranscriptStream<S>
where
    S: Stream<Item = AgUiEvent>,
{
    /// Wrap an event stream.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            decoder: TranscriptDecoder::new(),
            finished: false,
        }
    }

    /// The transcript accumulated so far, excluding unclosed text.
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        self.decoder.transcript()
    }

    /// Current snapshot including unclosed text.
    #[must_use]
    pub fn snapshot(&self) -> Transcript {
        self.decoder.snapshot()
    }
}

impl<S> Stream for TranscriptStream<S>
where
    S: Stream<Item = AgUiEvent>,
{
    type Item = Transcript;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        match this.inner.poll_next(cx) {
            Poll::Ready(Some(event)) => {
                this.decoder.apply(&event);
                Poll::Ready(Some(this.decoder.snapshot()))
            }
            Poll::Ready(None) => {
                *this.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Fold an event stream into its finished transcript.
pub async fn decode_stream<S>(stream: S) -> Transcript
where
    S: Stream<Item = AgUiEvent>,
{
    futures::pin_mut!(stream);

    let mut decoder = TranscriptDecoder::new();
    while let Some(event) = stream.next().await {
        decoder.apply(&event);
    }
    decoder.finish()
}
