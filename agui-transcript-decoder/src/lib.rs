//! # agui-transcript-decoder
//!
//! Folds an AG-UI agent event stream into a renderable [`Transcript`]:
//! ordered content segments (text runs, tool calls, custom components), an
//! aggregated thinking buffer, and a plain-text buffer for copy/export.
//!
//! Two modes share one decoding core:
//!
//! - **Batch mode** (history replay): [`decode_events`] folds a complete
//!   event array; [`decode_history`] additionally handles the stored
//!   textual payload forms (strict JSON and the Python-literal encoding)
//!   with best-effort fallbacks, so a corrupt history entry still renders
//!   as plain text instead of crashing the caller.
//! - **Streaming mode**: [`TranscriptDecoder`] applies events one at a time
//!   and hands out partial snapshots; [`TranscriptSession`] feeds raw SSE
//!   chunks straight into a live decoder; [`TranscriptStream`] does the
//!   same as a `futures::Stream` combinator.
//!
//! The decoder performs no I/O and never blocks; applying an event cannot
//! fail. The snapshot after event *k* always equals the batch fold of
//! events `1..k`.
//!
//! ## Example
//!
//! ```rust
//! use agui_transcript_decoder::decode_events;
//! use agui_transcript_events::AgUiEvent;
//!
//! let transcript = decode_events(&[
//!     AgUiEvent::text_start(),
//!     AgUiEvent::text_content("Hello "),
//!     AgUiEvent::tool_call_start("c1", "search"),
//!     AgUiEvent::tool_call_result("c1", "3 results"),
//!     AgUiEvent::text_content("world"),
//!     AgUiEvent::text_end(),
//! ]);
//!
//! assert_eq!(transcript.full_text, "Hello world");
//! assert!(transcript.tool_call("c1").unwrap().is_completed());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod decoder;
pub mod sse;
pub mod stream;
pub mod tracker;
pub mod transcript;

pub use decoder::{decode_events, decode_history, TranscriptDecoder};
pub use sse::{SseFrame, SseFrameParser, TranscriptSession};
pub use stream::{decode_stream, TranscriptStream};
pub use tracker::{ToolCallRecord, ToolCallStatus, ToolCallTracker, UNKNOWN_TOOL};
pub use transcript::{ContentSegment, Transcript};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        decode_events, decode_history, ContentSegment, ToolCallRecord, ToolCallStatus,
        Transcript, TranscriptDecoder, TranscriptSession,
    };
    pub use agui_transcript_events::{AgUiEvent, EventType};
}
