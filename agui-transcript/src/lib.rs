//! # agui-transcript
//!
//! Decoder for the AG-UI agent event protocol: an append-only event stream
//! carrying incremental reply text, thinking content, tool-call lifecycles,
//! and custom component render directives, which must be reassembled into
//! an ordered, displayable conversation transcript while tool calls and
//! text segments interleave.
//!
//! The workspace splits into two layers, both re-exported here:
//!
//! - [`events`]: the wire event union and tolerant batch-payload decoding
//! - [`decoder`]: the transcript model, the tool-call tracker, and the
//!   batch/streaming decoding entry points
//!
//! ## Decoding a stored history entry
//!
//! ```rust
//! use agui_transcript::decode_history;
//!
//! // Strict JSON and Python-literal encodings both work.
//! let transcript = decode_history(
//!     "[{'type': 'TEXT_MESSAGE_START'}, \
//!       {'type': 'TEXT_MESSAGE_CONTENT', 'delta': 'Hello'}]",
//! );
//! assert_eq!(transcript.full_text, "Hello");
//! ```
//!
//! ## Decoding a live stream
//!
//! ```rust
//! use agui_transcript::TranscriptSession;
//!
//! let mut session = TranscriptSession::new();
//! session.feed_str("data: {\"type\": \"TEXT_MESSAGE_START\"}\n\n");
//! session.feed_str("data: {\"type\": \"TEXT_MESSAGE_CONTENT\", \"delta\": \"Hi\"}\n\n");
//! assert_eq!(session.snapshot().full_text, "Hi");
//!
//! let transcript = session.finish();
//! assert_eq!(transcript.segments.len(), 1);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub use agui_transcript_decoder as decoder;
pub use agui_transcript_events as events;

pub use agui_transcript_decoder::{
    decode_events, decode_history, decode_stream, ContentSegment, SseFrame, SseFrameParser,
    ToolCallRecord, ToolCallStatus, ToolCallTracker, Transcript, TranscriptDecoder,
    TranscriptSession, TranscriptStream, UNKNOWN_TOOL,
};
pub use agui_transcript_events::{
    normalize_python_literals, parse_event_batch, AgUiEvent, ComponentDirective, EventType,
    WireError, WireResult, RENDER_COMPONENT,
};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        decode_events, decode_history, AgUiEvent, ContentSegment, EventType, ToolCallRecord,
        ToolCallStatus, Transcript, TranscriptDecoder, TranscriptSession,
    };
}
