//! SSE frame parsing for live streams.
//!
//! The backend delivers events as `data: {...}\n\n` frames over an HTTP
//! event stream. This module splits an incrementally-arriving byte/text
//! feed into frames and decodes each frame's data into an event, feeding a
//! live [`TranscriptDecoder`] through [`TranscriptSession`]. Transport
//! (connection, reconnect, cancellation) stays with the caller.

use crate::decoder::TranscriptDecoder;
use crate::transcript::Transcript;
use agui_transcript_events::AgUiEvent;
use bytes::Bytes;
use std::collections::VecDeque;
use tracing::debug;

const MAX_BUFFER_SIZE: usize = 10 * 1024 * 1024;

/// A parsed SSE frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Event type field (if specified).
    pub event: Option<String>,
    /// Joined data lines.
    pub data: String,
}

impl SseFrame {
    /// Check if this is a stream-terminator frame (e.g. `[DONE]`).
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.data.trim() == "[DONE]" || self.event.as_deref() == Some("done")
    }

    /// Decode the frame's data into a protocol event.
    ///
    /// Terminator frames and frames whose data does not match a known event
    /// shape yield `None`.
    #[must_use]
    pub fn to_event(&self) -> Option<AgUiEvent> {
        if self.is_done() {
            return None;
        }
        match serde_json::from_str(&self.data) {
            Ok(event) => Some(event),
            Err(err) => {
                debug!(%err, data = %self.data, "skipping undecodable SSE frame");
                None
            }
        }
    }
}

/// Incremental parser for SSE frame streams.
#[derive(Debug, Default)]
pub struct SseFrameParser {
    buffer: String,
    frames: VecDeque<SseFrame>,
}

impl SseFrameParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes into the parser, returning frames completed by this chunk.
    pub fn feed(&mut self, bytes: &Bytes) -> Vec<SseFrame> {
        let chunk = String::from_utf8_lossy(bytes);
        self.feed_str(&chunk)
    }

    /// Feed a string chunk into the parser, returning frames completed by
    /// this chunk.
    pub fn feed_str(&mut self, chunk: &str) -> Vec<SseFrame> {
        self.buffer.push_str(chunk);

        if self.buffer.len() > MAX_BUFFER_SIZE {
            debug!(len = self.buffer.len(), "SSE buffer exceeded cap, dropping buffered bytes");
            self.buffer.clear();
            return Vec::new();
        }

        self.parse_buffer()
    }

    /// Flush the trailing partial frame when the stream ends.
    pub fn finish(&mut self) -> Vec<SseFrame> {
        let mut frames = self.parse_buffer();

        if !self.buffer.trim().is_empty() {
            if let Some(frame) = parse_frame(self.buffer.trim_end_matches(['\n', '\r'])) {
                self.frames.push_back(frame.clone());
                frames.push(frame);
            }
        }
        self.buffer.clear();

        frames
    }

    /// Pop the next buffered frame.
    pub fn next_frame(&mut self) -> Option<SseFrame> {
        self.frames.pop_front()
    }

    fn parse_buffer(&mut self) -> Vec<SseFrame> {
        let mut parsed = Vec::new();

        while let Some((pos, delimiter_len)) = self.find_frame_boundary() {
            let frame_str = self.buffer[..pos].to_string();
            self.buffer = self.buffer[pos + delimiter_len..]
                .trim_start_matches(['\n', '\r'])
                .to_string();

            if let Some(frame) = parse_frame(&frame_str) {
                self.frames.push_back(frame.clone());
                parsed.push(frame);
            }
        }

        parsed
    }

    fn find_frame_boundary(&self) -> Option<(usize, usize)> {
        let newline = self.buffer.find("\n\n").map(|pos| (pos, 2));
        let carriage = self.buffer.find("\r\n\r\n").map(|pos| (pos, 4));

        match (newline, carriage) {
            (Some(nl), Some(cr)) => Some(if cr.0 < nl.0 { cr } else { nl }),
            (Some(nl), None) => Some(nl),
            (None, Some(cr)) => Some(cr),
            (None, None) => None,
        }
    }
}

fn parse_frame(s: &str) -> Option<SseFrame> {
    let mut event = None;
    let mut data_lines = Vec::new();

    for line in s.lines() {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }

        if let Some(value) = line.strip_prefix("event:") {
            event = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("data:") {
            data_lines.push(value.trim_start().to_string());
        } else if line == "data" {
            data_lines.push(String::new());
        }
    }

    if data_lines.is_empty() {
        return None;
    }

    Some(SseFrame {
        event,
        data: data_lines.join("\n"),
    })
}

/// A live decoding session: SSE frame parsing wired to a transcript decoder.
///
/// Feed transport chunks as they arrive; each completed frame is decoded
/// and applied immediately, so [`snapshot`](Self::snapshot) always reflects
/// everything received so far.
#[derive(Debug, Default)]
pub struct TranscriptSession {
    parser: SseFrameParser,
    decoder: TranscriptDecoder,
}

impl TranscriptSession {
    /// Start a new session with an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a text chunk; returns the number of events applied.
    pub fn feed_str(&mut self, chunk: &str) -> usize {
        self.parser.feed_str(chunk);
        self.apply_pending()
    }

    /// Feed a byte chunk; returns the number of events applied.
    pub fn feed(&mut self, bytes: &Bytes) -> usize {
        self.parser.feed(bytes);
        self.apply_pending()
    }

    /// The current (possibly partial) transcript.
    #[must_use]
    pub fn snapshot(&self) -> Transcript {
        self.decoder.snapshot()
    }

    /// End the session: flush any trailing frame and unclosed text, and
    /// return the finished transcript.
    #[must_use]
    pub fn finish(mut self) -> Transcript {
        self.parser.finish();
        self.apply_pending();
        self.decoder.finish()
    }

    fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(frame) = self.parser.next_frame() {
            if let Some(event) = frame.to_event() {
                self.decoder.apply(&event);
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single_frame() {
        let mut parser = SseFrameParser::new();
        let frames = parser.feed_str("data: {\"type\": \"TEXT_MESSAGE_START\"}\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "{\"type\": \"TEXT_MESSAGE_START\"}");
    }

    #[test]
    fn test_partial_frame_across_chunks() {
        let mut parser = SseFrameParser::new();
        assert!(parser.feed_str("data: {\"type\": \"TEXT_MES").is_empty());
        let frames = parser.feed_str("SAGE_END\"}\n\n");
        assert_eq!(frames.len(), 1);
        assert!(frames[0].to_event().is_some());
    }

    #[test]
    fn test_comment_lines_skipped() {
        let mut parser = SseFrameParser::new();
        let frames = parser.feed_str(": keepalive\n\ndata: x\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "x");
    }

    #[test]
    fn test_done_frame() {
        let mut parser = SseFrameParser::new();
        let frames = parser.feed_str("data: [DONE]\n\n");
        assert!(frames[0].is_done());
        assert!(frames[0].to_event().is_none());
    }

    #[test]
    fn test_finish_flushes_trailing_frame() {
        let mut parser = SseFrameParser::new();
        assert!(parser.feed_str("data: {\"type\": \"TEXT_MESSAGE_END\"}").is_empty());
        let frames = parser.finish();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_undecodable_frame_skipped() {
        let frame = SseFrame { event: None, data: "{not json".to_string() };
        assert!(frame.to_event().is_none());
    }

    #[test]
    fn test_session_live_decoding() {
        let mut session = TranscriptSession::new();

        let applied = session.feed_str(
            "data: {\"type\": \"TEXT_MESSAGE_START\"}\n\ndata: {\"type\": \"TEXT_MESSAGE_CONTENT\", \"delta\": \"Hel\"}\n\n",
        );
        assert_eq!(applied, 2);
        assert_eq!(session.snapshot().full_text, "Hel");

        session.feed_str("data: {\"type\": \"TEXT_MESSAGE_CONTENT\", \"delta\": \"lo\"}\n\n");
        assert_eq!(session.snapshot().full_text, "Hello");

        let transcript = session.finish();
        assert_eq!(transcript.segments.len(), 1);
        assert_eq!(transcript.segments[0].text(), Some("Hello"));
    }

    #[test]
    fn test_session_feed_bytes() {
        let mut session = TranscriptSession::new();
        let chunk = Bytes::from_static(
            b"data: {\"type\": \"THINKING_CONTENT\", \"delta\": \"hm\"}\n\n",
        );
        assert_eq!(session.feed(&chunk), 1);
        assert_eq!(session.finish().thinking.as_deref(), Some("hm"));
    }
}
