//! The event stream decoder.
//!
//! Folds an ordered sequence of AG-UI events into a [`Transcript`], either
//! incrementally (streaming mode, one event per network frame) or over a
//! complete batch (history replay). Applying the same batch twice yields
//! structurally identical transcripts, and the snapshot after event *k*
//! equals the batch fold of events `1..k`.

use crate::transcript::{ContentSegment, Transcript};
use agui_transcript_events::{
    parse_event_batch, AgUiEvent, ComponentDirective, WireError, RENDER_COMPONENT,
};
use tracing::{debug, trace};

/// Incremental decoder for one stream session.
///
/// State is scoped to a single transcript; independent decode calls share
/// nothing. [`apply`](Self::apply) is synchronous, performs no I/O, and
/// never fails: malformed or unrecognized events are absorbed per event.
///
/// # Example
///
/// ```rust
/// use agui_transcript_decoder::TranscriptDecoder;
/// use agui_transcript_events::AgUiEvent;
///
/// let mut decoder = TranscriptDecoder::new();
/// decoder.apply(&AgUiEvent::text_start());
/// decoder.apply(&AgUiEvent::text_content("hello"));
/// let transcript = decoder.finish();
/// assert_eq!(transcript.full_text, "hello");
/// ```
#[derive(Debug, Default)]
pub struct TranscriptDecoder {
    transcript: Transcript,
    open_text: String,
    open_index: u32,
}

impl TranscriptDecoder {
    /// Create a decoder with an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The transcript accumulated so far, excluding the open text buffer.
    ///
    /// For a view that includes unclosed text, use [`snapshot`](Self::snapshot).
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Index of the text segment currently accumulating. 0 until the first
    /// `TEXT_MESSAGE_START`, then 1-based.
    #[must_use]
    pub fn open_segment_index(&self) -> u32 {
        self.open_index
    }

    /// Apply one event.
    pub fn apply(&mut self, event: &AgUiEvent) {
        trace!(event_type = ?event.event_type(), "applying event");

        match event {
            AgUiEvent::ThinkingContent { delta, .. } => {
                self.transcript
                    .thinking
                    .get_or_insert_with(String::new)
                    .push_str(delta.as_deref().unwrap_or(""));
            }

            AgUiEvent::TextMessageStart { .. } => {
                self.close_open_text();
                self.open_index += 1;
            }

            AgUiEvent::TextMessageContent { delta, msg, .. } => {
                let delta = delta.as_deref().or(msg.as_deref()).unwrap_or("");
                self.open_text.push_str(delta);
                self.transcript.full_text.push_str(delta);
            }

            AgUiEvent::TextMessageEnd { .. } => {
                self.close_open_text();
            }

            AgUiEvent::ToolCallStart { tool_call_id, tool_call_name, .. } => {
                let Some(id) = tool_call_id.as_deref() else {
                    debug!("tool call start without id, skipping");
                    return;
                };
                self.transcript.tool_calls.start(id, tool_call_name.as_deref());
                // Position the segment at start time, not completion time.
                self.transcript.segments.push(ContentSegment::ToolCall { id: id.to_string() });
            }

            AgUiEvent::ToolCallArgs { tool_call_id, delta, .. } => {
                if let Some(id) = tool_call_id.as_deref() {
                    self.transcript.tool_calls.append_args(id, delta.as_deref().unwrap_or(""));
                }
            }

            AgUiEvent::ToolCallResult { tool_call_id, content, .. } => {
                if let Some(id) = tool_call_id.as_deref() {
                    self.transcript.tool_calls.complete(id, content.as_deref().unwrap_or(""));
                }
            }

            AgUiEvent::Custom { name, value, .. } => {
                if name.as_deref() != Some(RENDER_COMPONENT) {
                    trace!(name = ?name, "ignoring custom event");
                    return;
                }
                let Some(directive) = value.as_ref().and_then(ComponentDirective::from_value)
                else {
                    debug!("render_component directive without usable payload, skipping");
                    return;
                };
                self.transcript.segments.push(ContentSegment::Component {
                    name: directive.component,
                    props: directive.props,
                });
            }

            // Lifecycle and extension events carry no transcript content.
            AgUiEvent::RunStarted { .. }
            | AgUiEvent::RunFinished { .. }
            | AgUiEvent::RunError { .. }
            | AgUiEvent::TextMessageChunk { .. }
            | AgUiEvent::ToolCallEnd { .. } => {}
        }
    }

    /// Current transcript including any unclosed text, without finalizing
    /// the session.
    #[must_use]
    pub fn snapshot(&self) -> Transcript {
        let mut transcript = self.transcript.clone();
        if !self.open_text.is_empty() {
            transcript.segments.push(ContentSegment::Text {
                index: self.open_index,
                text: self.open_text.clone(),
            });
        }
        transcript
    }

    /// Finalize the session: flush any unclosed text and return the
    /// finished transcript.
    #[must_use]
    pub fn finish(mut self) -> Transcript {
        self.close_open_text();
        self.transcript
    }

    // Empty buffers never become segments.
    fn close_open_text(&mut self) {
        if !self.open_text.is_empty() {
            self.transcript.segments.push(ContentSegment::Text {
                index: self.open_index,
                text: std::mem::take(&mut self.open_text),
            });
        }
    }
}

/// Decode a complete event batch into a finished transcript.
pub fn decode_events<'a, I>(events: I) -> Transcript
where
    I: IntoIterator<Item = &'a AgUiEvent>,
{
    let mut decoder = TranscriptDecoder::new();
    for event in events {
        decoder.apply(event);
    }
    decoder.finish()
}

/// Decode a persisted history payload into a transcript.
///
/// Accepts strict JSON or the Python-literal textual encoding. This entry
/// point never fails: an unparseable payload yields a transcript displaying
/// the raw input verbatim, and a parseable-but-non-array payload yields an
/// empty transcript.
#[must_use]
pub fn decode_history(raw: &str) -> Transcript {
    match parse_event_batch(raw) {
        Ok(events) => decode_events(&events),
        Err(WireError::Parse(err)) => {
            debug!(%err, "unparseable history payload, falling back to raw text");
            Transcript::raw_text(raw)
        }
        Err(WireError::NotAnArray) => {
            debug!("history payload is not an event array, yielding empty transcript");
            Transcript::new()
        }
    }
}
