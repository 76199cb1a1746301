//! # agui-transcript-events
//!
//! Wire-level contracts for the AG-UI agent event protocol.
//!
//! This crate defines the event vocabulary an agent backend streams to the
//! client (text deltas, thinking deltas, tool-call lifecycles, custom render
//! directives) and the tolerant batch-payload decoding used when a
//! conversation's event history is replayed from storage.
//!
//! ## Event Structure
//!
//! All events carry a `type` discriminator in `SCREAMING_SNAKE_CASE` and
//! `camelCase` payload fields, plus an optional millisecond timestamp:
//!
//! - **Run lifecycle**: `RUN_STARTED`, `RUN_FINISHED`, `RUN_ERROR`
//! - **Text messages**: `TEXT_MESSAGE_START`, `TEXT_MESSAGE_CONTENT`,
//!   `TEXT_MESSAGE_END`, `TEXT_MESSAGE_CHUNK`
//! - **Thinking**: `THINKING_CONTENT`
//! - **Tool calls**: `TOOL_CALL_START`, `TOOL_CALL_ARGS`, `TOOL_CALL_END`,
//!   `TOOL_CALL_RESULT`
//! - **Custom**: `CUSTOM` (e.g. the `render_component` directive)
//!
//! Unrecognized event types are not an error at this layer: batch decoding
//! skips anything that does not match a known tag, so the vocabulary can
//! grow without breaking older clients.
//!
//! ## Example
//!
//! ```rust
//! use agui_transcript_events::{AgUiEvent, EventType, parse_event_batch};
//!
//! let event = AgUiEvent::text_content("Hello");
//! assert_eq!(event.event_type(), EventType::TextMessageContent);
//!
//! let batch = parse_event_batch(r#"[{"type": "TEXT_MESSAGE_START"}]"#).unwrap();
//! assert_eq!(batch.len(), 1);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod types;
pub mod wire;

pub use types::{AgUiEvent, ComponentDirective, EventType, RENDER_COMPONENT};
pub use wire::{normalize_python_literals, parse_event_batch, WireError, WireResult};
