//! AG-UI protocol event types.
//!
//! Agent-User Interaction protocol events streamed from an agent backend.
//! Events arrive in strict temporal order; no event carries a sequence
//! number, so ordering is positional.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the custom directive that instructs the client to render an
/// application-defined component.
pub const RENDER_COMPONENT: &str = "render_component";

/// Event type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Run has started.
    RunStarted,
    /// Run has finished successfully.
    RunFinished,
    /// Run encountered an error.
    RunError,
    /// Thinking/reasoning content delta.
    ThinkingContent,
    /// Text message started.
    TextMessageStart,
    /// Text message content delta.
    TextMessageContent,
    /// Combined start+content chunk (protocol extension).
    TextMessageChunk,
    /// Text message ended.
    TextMessageEnd,
    /// Tool call started.
    ToolCallStart,
    /// Tool call arguments delta.
    ToolCallArgs,
    /// Tool call ended (arguments complete).
    ToolCallEnd,
    /// Tool call result received.
    ToolCallResult,
    /// Custom event (named directive with an opaque value).
    Custom,
}

/// A single AG-UI protocol event.
///
/// Discriminated on the `type` field. Payload fields the backend may omit
/// are `Option`s; consumers substitute empty strings or placeholders rather
/// than propagating `None` into display state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgUiEvent {
    /// Run has started.
    #[serde(rename_all = "camelCase")]
    RunStarted {
        /// Thread identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        thread_id: Option<String>,
        /// Run identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        run_id: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Run has finished successfully.
    #[serde(rename_all = "camelCase")]
    RunFinished {
        /// Thread identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        thread_id: Option<String>,
        /// Run identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        run_id: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Run encountered an error.
    #[serde(rename_all = "camelCase")]
    RunError {
        /// Error message.
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Error code.
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Thinking/reasoning content delta (side channel, distinct from the
    /// user-visible reply text).
    #[serde(rename_all = "camelCase")]
    ThinkingContent {
        /// Content delta.
        #[serde(skip_serializing_if = "Option::is_none")]
        delta: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Text message started.
    #[serde(rename_all = "camelCase")]
    TextMessageStart {
        /// Message identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        /// Role of the message sender.
        #[serde(skip_serializing_if = "Option::is_none")]
        role: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Text message content delta.
    #[serde(rename_all = "camelCase")]
    TextMessageContent {
        /// Message identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        /// Content delta.
        #[serde(skip_serializing_if = "Option::is_none")]
        delta: Option<String>,
        /// Alternate content field some backends emit instead of `delta`.
        #[serde(skip_serializing_if = "Option::is_none")]
        msg: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Combined start+content chunk (protocol extension).
    #[serde(rename_all = "camelCase")]
    TextMessageChunk {
        /// Message identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        /// Content delta.
        #[serde(skip_serializing_if = "Option::is_none")]
        delta: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Text message ended.
    #[serde(rename_all = "camelCase")]
    TextMessageEnd {
        /// Message identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Tool call started.
    #[serde(rename_all = "camelCase")]
    ToolCallStart {
        /// Tool call identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_call_id: Option<String>,
        /// Tool name.
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_call_name: Option<String>,
        /// Parent message ID (the assistant message containing this call).
        #[serde(skip_serializing_if = "Option::is_none")]
        parent_message_id: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Tool call arguments delta (raw JSON fragment).
    #[serde(rename_all = "camelCase")]
    ToolCallArgs {
        /// Tool call identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_call_id: Option<String>,
        /// Arguments delta.
        #[serde(skip_serializing_if = "Option::is_none")]
        delta: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Tool call ended (arguments complete).
    #[serde(rename_all = "camelCase")]
    ToolCallEnd {
        /// Tool call identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_call_id: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Tool call result received.
    #[serde(rename_all = "camelCase")]
    ToolCallResult {
        /// Tool call identifier.
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_call_id: Option<String>,
        /// Result content.
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        /// Message identifier of the result message.
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },

    /// Custom event for application-specific directives.
    #[serde(rename_all = "camelCase")]
    Custom {
        /// Directive name (e.g. [`RENDER_COMPONENT`]).
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Directive value.
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
        /// Timestamp in milliseconds.
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },
}

fn now_millis() -> Option<i64> {
    Some(chrono::Utc::now().timestamp_millis())
}

impl AgUiEvent {
    /// Get the event type discriminator.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            Self::RunStarted { .. } => EventType::RunStarted,
            Self::RunFinished { .. } => EventType::RunFinished,
            Self::RunError { .. } => EventType::RunError,
            Self::ThinkingContent { .. } => EventType::ThinkingContent,
            Self::TextMessageStart { .. } => EventType::TextMessageStart,
            Self::TextMessageContent { .. } => EventType::TextMessageContent,
            Self::TextMessageChunk { .. } => EventType::TextMessageChunk,
            Self::TextMessageEnd { .. } => EventType::TextMessageEnd,
            Self::ToolCallStart { .. } => EventType::ToolCallStart,
            Self::ToolCallArgs { .. } => EventType::ToolCallArgs,
            Self::ToolCallEnd { .. } => EventType::ToolCallEnd,
            Self::ToolCallResult { .. } => EventType::ToolCallResult,
            Self::Custom { .. } => EventType::Custom,
        }
    }

    /// Get the timestamp (milliseconds since epoch), if the event carries one.
    #[must_use]
    pub fn timestamp(&self) -> Option<i64> {
        match self {
            Self::RunStarted { timestamp, .. }
            | Self::RunFinished { timestamp, .. }
            | Self::RunError { timestamp, .. }
            | Self::ThinkingContent { timestamp, .. }
            | Self::TextMessageStart { timestamp, .. }
            | Self::TextMessageContent { timestamp, .. }
            | Self::TextMessageChunk { timestamp, .. }
            | Self::TextMessageEnd { timestamp, .. }
            | Self::ToolCallStart { timestamp, .. }
            | Self::ToolCallArgs { timestamp, .. }
            | Self::ToolCallEnd { timestamp, .. }
            | Self::ToolCallResult { timestamp, .. }
            | Self::Custom { timestamp, .. } => *timestamp,
        }
    }

    /// Create a thinking content delta event.
    pub fn thinking_content(delta: impl Into<String>) -> Self {
        Self::ThinkingContent {
            delta: Some(delta.into()),
            timestamp: now_millis(),
        }
    }

    /// Create a text message start event.
    #[must_use]
    pub fn text_start() -> Self {
        Self::TextMessageStart {
            message_id: None,
            role: Some("assistant".to_string()),
            timestamp: now_millis(),
        }
    }

    /// Create a text message content delta event.
    pub fn text_content(delta: impl Into<String>) -> Self {
        Self::TextMessageContent {
            message_id: None,
            delta: Some(delta.into()),
            msg: None,
            timestamp: now_millis(),
        }
    }

    /// Create a text message end event.
    #[must_use]
    pub fn text_end() -> Self {
        Self::TextMessageEnd {
            message_id: None,
            timestamp: now_millis(),
        }
    }

    /// Create a tool call start event.
    pub fn tool_call_start(tool_call_id: impl Into<String>, tool_call_name: impl Into<String>) -> Self {
        Self::ToolCallStart {
            tool_call_id: Some(tool_call_id.into()),
            tool_call_name: Some(tool_call_name.into()),
            parent_message_id: None,
            timestamp: now_millis(),
        }
    }

    /// Create a tool call arguments delta event.
    pub fn tool_call_args(tool_call_id: impl Into<String>, delta: impl Into<String>) -> Self {
        Self::ToolCallArgs {
            tool_call_id: Some(tool_call_id.into()),
            delta: Some(delta.into()),
            timestamp: now_millis(),
        }
    }

    /// Create a tool call result event.
    pub fn tool_call_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolCallResult {
            tool_call_id: Some(tool_call_id.into()),
            content: Some(content.into()),
            message_id: None,
            timestamp: now_millis(),
        }
    }

    /// Create a run error event.
    pub fn run_error(message: impl Into<String>) -> Self {
        Self::RunError {
            message: Some(message.into()),
            code: None,
            timestamp: now_millis(),
        }
    }

    /// Create a `render_component` custom directive.
    pub fn render_component(component: impl Into<String>, props: Value) -> Self {
        Self::Custom {
            name: Some(RENDER_COMPONENT.to_string()),
            value: Some(serde_json::json!({
                "component": component.into(),
                "props": props,
            })),
            timestamp: now_millis(),
        }
    }

    /// Encode the event as JSON.
    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Encode the event as an SSE `data:` frame.
    #[must_use]
    pub fn to_sse_frame(&self) -> String {
        format!("data: {}\n\n", self.encode())
    }
}

/// Payload of a [`RENDER_COMPONENT`] directive: a component name plus
/// renderer-defined props the decoder treats as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDirective {
    /// Component name the renderer resolves.
    pub component: String,
    /// Opaque, renderer-defined props.
    #[serde(default)]
    pub props: Value,
}

impl ComponentDirective {
    /// Extract a directive from a CUSTOM event's `value` payload.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_content_encoding() {
        let event = AgUiEvent::text_content("Hello, world!");
        let json = event.encode();
        assert!(json.contains(r#""type":"TEXT_MESSAGE_CONTENT"#));
        assert!(json.contains(r#""delta":"Hello, world!"#));
    }

    #[test]
    fn test_tool_call_start_encoding() {
        let event = AgUiEvent::tool_call_start("call-1", "get_weather");
        let json = event.encode();
        assert!(json.contains(r#""type":"TOOL_CALL_START"#));
        assert!(json.contains(r#""toolCallId":"call-1"#));
        assert!(json.contains(r#""toolCallName":"get_weather"#));
    }

    #[test]
    fn test_decode_camel_case_fields() {
        let event: AgUiEvent = serde_json::from_str(
            r#"{"type": "TOOL_CALL_RESULT", "toolCallId": "c1", "content": "3 results"}"#,
        )
        .unwrap();
        assert_eq!(event.event_type(), EventType::ToolCallResult);
        match event {
            AgUiEvent::ToolCallResult { tool_call_id, content, .. } => {
                assert_eq!(tool_call_id.as_deref(), Some("c1"));
                assert_eq!(content.as_deref(), Some("3 results"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_decode_tolerates_missing_optional_fields() {
        let event: AgUiEvent =
            serde_json::from_str(r#"{"type": "TEXT_MESSAGE_CONTENT"}"#).unwrap();
        match event {
            AgUiEvent::TextMessageContent { delta, msg, .. } => {
                assert_eq!(delta, None);
                assert_eq!(msg, None);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_decode_msg_fallback_field() {
        let event: AgUiEvent =
            serde_json::from_str(r#"{"type": "TEXT_MESSAGE_CONTENT", "msg": "hi"}"#).unwrap();
        match event {
            AgUiEvent::TextMessageContent { msg, .. } => assert_eq!(msg.as_deref(), Some("hi")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_decode_unknown_type_is_error() {
        let result = serde_json::from_str::<AgUiEvent>(r#"{"type": "STATE_SNAPSHOT"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_component_roundtrip() {
        let event = AgUiEvent::render_component("WeatherCard", serde_json::json!({"temp": 20}));
        let decoded: AgUiEvent = serde_json::from_str(&event.encode()).unwrap();
        match decoded {
            AgUiEvent::Custom { name, value, .. } => {
                assert_eq!(name.as_deref(), Some(RENDER_COMPONENT));
                let directive = ComponentDirective::from_value(&value.unwrap()).unwrap();
                assert_eq!(directive.component, "WeatherCard");
                assert_eq!(directive.props["temp"], 20);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_component_directive_defaults_props() {
        let directive =
            ComponentDirective::from_value(&serde_json::json!({"component": "Card"})).unwrap();
        assert_eq!(directive.component, "Card");
        assert!(directive.props.is_null());
    }

    #[test]
    fn test_sse_frame_format() {
        let frame = AgUiEvent::text_end().to_sse_frame();
        assert!(frame.starts_with("data: {"));
        assert!(frame.ends_with("\n\n"));
    }

    #[test]
    fn test_event_timestamp() {
        let event = AgUiEvent::text_content("x");
        assert!(event.timestamp().unwrap() > 0);
    }
}
