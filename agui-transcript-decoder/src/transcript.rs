//! The decoded transcript model.
//!
//! A [`Transcript`] is the renderable representation of one message's full
//! event history: an ordered list of content segments, the aggregated
//! thinking buffer, and a plain-text buffer for copy/export.

use crate::tracker::{ToolCallRecord, ToolCallTracker};
use serde::Serialize;
use serde_json::Value;

/// One ordered unit of transcript content.
///
/// Tool-call segments carry the call id as an explicit handle; the record
/// itself lives in the transcript's tracker and is resolved via
/// [`Transcript::tool_call`], so a renderer holding a segment sees the
/// call's latest state without shared mutable aliasing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentSegment {
    /// A run of reply text.
    Text {
        /// Segment index assigned when the segment opened (1-based after the
        /// first explicit start; content before any start lands in index 0).
        index: u32,
        /// Accumulated text.
        text: String,
    },
    /// A tool call, positioned where its start event arrived.
    ToolCall {
        /// Tracker key of the call.
        id: String,
    },
    /// A custom component render directive.
    Component {
        /// Component name the renderer resolves.
        name: String,
        /// Opaque, renderer-defined props.
        props: Value,
    },
}

impl ContentSegment {
    /// Check if this is a text segment.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Check if this is a tool-call segment.
    #[must_use]
    pub fn is_tool_call(&self) -> bool {
        matches!(self, Self::ToolCall { .. })
    }

    /// Check if this is a component segment.
    #[must_use]
    pub fn is_component(&self) -> bool {
        matches!(self, Self::Component { .. })
    }

    /// The text of a text segment, if this is one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// The decoded, renderable representation of one message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    /// Concatenation of every text delta across all text segments, in
    /// arrival order. Ignores tool-call and component content.
    pub full_text: String,
    /// Aggregated thinking content; present only if at least one thinking
    /// event occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    /// Ordered content segments; insertion order is the order in which each
    /// segment became open in the stream. Append-only.
    pub segments: Vec<ContentSegment>,
    /// Tool-call records keyed by call id, in first-start order.
    pub tool_calls: ToolCallTracker,
}

impl Transcript {
    /// Create an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fallback transcript for an unparseable history payload: one text
    /// segment holding the raw input verbatim.
    #[must_use]
    pub fn raw_text(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            full_text: raw.clone(),
            thinking: None,
            segments: vec![ContentSegment::Text { index: 1, text: raw }],
            tool_calls: ToolCallTracker::new(),
        }
    }

    /// Check if the transcript has no content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.thinking.is_none() && self.full_text.is_empty()
    }

    /// Resolve a tool-call record by id.
    #[must_use]
    pub fn tool_call(&self, id: &str) -> Option<&ToolCallRecord> {
        self.tool_calls.get(id)
    }

    /// Resolve the record behind a [`ContentSegment::ToolCall`].
    #[must_use]
    pub fn resolve(&self, segment: &ContentSegment) -> Option<&ToolCallRecord> {
        match segment {
            ContentSegment::ToolCall { id } => self.tool_calls.get(id),
            _ => None,
        }
    }

    /// Iterate over text segments in order.
    pub fn text_segments(&self) -> impl Iterator<Item = &ContentSegment> {
        self.segments.iter().filter(|s| s.is_text())
    }

    /// Concatenation of all text-segment contents, in segment order.
    ///
    /// Once decoding finishes this equals [`Transcript::full_text`].
    #[must_use]
    pub fn joined_segment_text(&self) -> String {
        self.segments.iter().filter_map(ContentSegment::text).collect()
    }
}
