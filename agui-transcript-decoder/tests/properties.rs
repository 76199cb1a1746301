//! Behavioral properties of the decoder, exercised end to end.

use agui_transcript_decoder::{
    decode_events, decode_history, ContentSegment, ToolCallStatus, TranscriptDecoder,
};
use agui_transcript_events::{parse_event_batch, AgUiEvent};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn interleaved_events() -> Vec<AgUiEvent> {
    vec![
        AgUiEvent::thinking_content("planning"),
        AgUiEvent::text_start(),
        AgUiEvent::text_content("Hello "),
        AgUiEvent::tool_call_start("c1", "search"),
        AgUiEvent::tool_call_args("c1", r#"{"q":"x"}"#),
        AgUiEvent::tool_call_result("c1", "3 results"),
        AgUiEvent::text_content("world"),
        AgUiEvent::text_end(),
        AgUiEvent::render_component("ResultTable", serde_json::json!({"rows": 3})),
    ]
}

#[test]
fn decoding_is_deterministic() {
    let events = interleaved_events();
    assert_eq!(decode_events(&events), decode_events(&events));
}

#[rstest]
#[case::empty(vec![])]
#[case::text_only(vec![
    AgUiEvent::text_start(),
    AgUiEvent::text_content("a"),
    AgUiEvent::text_end(),
    AgUiEvent::text_start(),
    AgUiEvent::text_content("b"),
])]
#[case::interleaved(interleaved_events())]
#[case::unterminated(vec![AgUiEvent::text_start(), AgUiEvent::text_content("hi")])]
fn full_text_equals_joined_text_segments(#[case] events: Vec<AgUiEvent>) {
    let transcript = decode_events(&events);
    assert_eq!(transcript.full_text, transcript.joined_segment_text());
}

#[test]
fn tool_call_segments_keep_start_order() {
    let events = vec![
        AgUiEvent::text_start(),
        AgUiEvent::text_content("one"),
        AgUiEvent::text_end(),
        AgUiEvent::tool_call_start("slow", "slow_tool"),
        AgUiEvent::text_start(),
        AgUiEvent::text_content("two"),
        AgUiEvent::text_end(),
        AgUiEvent::tool_call_start("fast", "fast_tool"),
        // "fast" completes before "slow"; segment order must not change.
        AgUiEvent::tool_call_result("fast", "done"),
        AgUiEvent::tool_call_result("slow", "done"),
    ];
    let transcript = decode_events(&events);

    let kinds: Vec<&ContentSegment> = transcript.segments.iter().collect();
    assert_eq!(kinds.len(), 4);
    assert_eq!(kinds[0].text(), Some("one"));
    assert_eq!(kinds[1], &ContentSegment::ToolCall { id: "slow".to_string() });
    assert_eq!(kinds[2].text(), Some("two"));
    assert_eq!(kinds[3], &ContentSegment::ToolCall { id: "fast".to_string() });
}

#[test]
fn tool_status_never_reverts_after_completion() {
    let mut decoder = TranscriptDecoder::new();
    decoder.apply(&AgUiEvent::tool_call_start("c1", "search"));
    decoder.apply(&AgUiEvent::tool_call_result("c1", "first"));

    // Late args and a duplicate result must not move the call backwards.
    decoder.apply(&AgUiEvent::tool_call_args("c1", "late"));
    decoder.apply(&AgUiEvent::tool_call_result("c1", "second"));

    let transcript = decoder.finish();
    let call = transcript.tool_call("c1").unwrap();
    assert_eq!(call.status, ToolCallStatus::Completed);
    assert_eq!(call.result.as_deref(), Some("second"));
}

#[test]
fn trailing_text_is_flushed_at_finalization() {
    let transcript = decode_events(&[AgUiEvent::text_start(), AgUiEvent::text_content("hi")]);
    assert_eq!(
        transcript.segments,
        vec![ContentSegment::Text { index: 1, text: "hi".to_string() }]
    );
}

#[test]
fn events_for_unknown_call_ids_are_dropped() {
    let transcript = decode_events(&[
        AgUiEvent::tool_call_args("x", "a"),
        AgUiEvent::tool_call_result("x", "r"),
    ]);
    assert!(transcript.segments.is_empty());
    assert!(transcript.tool_calls.is_empty());
}

#[test]
fn python_literal_history_is_normalized() {
    let transcript = decode_history("[{'type': 'THINKING_CONTENT', 'delta': 'hmm'}]");
    assert_eq!(transcript.thinking.as_deref(), Some("hmm"));
}

#[test]
fn unparseable_history_falls_back_to_raw_text() {
    let raw = "not json at all {{{";
    let transcript = decode_history(raw);
    assert_eq!(
        transcript.segments,
        vec![ContentSegment::Text { index: 1, text: raw.to_string() }]
    );
    assert_eq!(transcript.full_text, raw);
}

#[test]
fn interleaved_scenario_end_to_end() {
    let transcript = decode_events(&[
        AgUiEvent::text_start(),
        AgUiEvent::text_content("Hello "),
        AgUiEvent::tool_call_start("c1", "search"),
        AgUiEvent::tool_call_args("c1", r#"{"q":"x"}"#),
        AgUiEvent::tool_call_result("c1", "3 results"),
        AgUiEvent::text_content("world"),
        AgUiEvent::text_end(),
    ]);

    // No second TEXT_MESSAGE_START, so text before and after the call is
    // one segment; the call segment was inserted while it was still open.
    assert_eq!(
        transcript.segments,
        vec![
            ContentSegment::ToolCall { id: "c1".to_string() },
            ContentSegment::Text { index: 1, text: "Hello world".to_string() },
        ]
    );
    assert_eq!(transcript.full_text, "Hello world");

    let call = transcript.tool_call("c1").unwrap();
    assert_eq!(call.name, "search");
    assert_eq!(call.args, r#"{"q":"x"}"#);
    assert_eq!(call.result.as_deref(), Some("3 results"));
    assert_eq!(call.status, ToolCallStatus::Completed);
}

#[test]
fn streaming_snapshots_equal_batch_prefixes() {
    let events = interleaved_events();

    let mut decoder = TranscriptDecoder::new();
    for (k, event) in events.iter().enumerate() {
        decoder.apply(event);
        assert_eq!(decoder.snapshot(), decode_events(&events[..=k]));
    }
    assert_eq!(decoder.finish(), decode_events(&events));
}

#[test]
fn wire_batch_decodes_like_constructed_events() {
    let raw = r#"[
        {"type": "TEXT_MESSAGE_START"},
        {"type": "TEXT_MESSAGE_CONTENT", "delta": "Hi"},
        {"type": "STATE_SNAPSHOT", "snapshot": {}},
        {"type": "TOOL_CALL_START", "toolCallId": "c1"},
        {"type": "TEXT_MESSAGE_END"}
    ]"#;
    let events = parse_event_batch(raw).unwrap();
    let transcript = decode_events(&events);

    assert_eq!(transcript.full_text, "Hi");
    // Name was omitted on the start event.
    assert_eq!(transcript.tool_call("c1").unwrap().name, "Unknown Tool");
    assert_eq!(transcript.segments.len(), 2);
}
