//! Tool-call tracking.
//!
//! Tool calls stream in three phases: a start event naming the call, zero or
//! more argument deltas, and a result. The tracker accumulates those phases
//! per call id, independent of the surrounding text segments.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Placeholder used when a start event omits the tool name.
pub const UNKNOWN_TOOL: &str = "Unknown Tool";

/// Lifecycle status of a tool call. Monotonic: once `Completed`, a call
/// never reverts to `Executing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallStatus {
    /// Call has started; arguments may still be streaming.
    Executing,
    /// Result received.
    Completed,
}

/// Accumulated state of one tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCallRecord {
    /// Protocol-supplied call id.
    pub id: String,
    /// Tool name, or [`UNKNOWN_TOOL`] if the start event omitted it.
    pub name: String,
    /// Accumulated raw argument text. Not guaranteed to be valid JSON until
    /// the call completes.
    pub args: String,
    /// Result content, present once the call completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Lifecycle status.
    pub status: ToolCallStatus,
}

impl ToolCallRecord {
    /// Create a new executing record.
    pub fn new(id: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.unwrap_or(UNKNOWN_TOOL).to_string(),
            args: String::new(),
            result: None,
            status: ToolCallStatus::Executing,
        }
    }

    /// Check whether the call has completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == ToolCallStatus::Completed
    }
}

/// Id-keyed map of tool-call records, in first-start order.
///
/// Mutation is reserved to the decoder; callers get read access through the
/// transcript. At most one record exists per id. A repeated start event for
/// a known id replaces the record (last start wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ToolCallTracker {
    calls: IndexMap<String, ToolCallRecord>,
}

impl ToolCallTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Check if no calls are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Look up a record by call id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ToolCallRecord> {
        self.calls.get(id)
    }

    /// Iterate over records in first-start order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolCallRecord> {
        self.calls.values()
    }

    /// Register a call, replacing any existing record with the same id.
    pub(crate) fn start(&mut self, id: &str, name: Option<&str>) {
        if self.calls.contains_key(id) {
            debug!(call_id = id, "repeated tool call start, replacing record");
        }
        self.calls.insert(id.to_string(), ToolCallRecord::new(id, name));
    }

    /// Append an argument delta to a tracked call. Unknown ids are dropped.
    pub(crate) fn append_args(&mut self, id: &str, delta: &str) {
        match self.calls.get_mut(id) {
            Some(record) => record.args.push_str(delta),
            None => debug!(call_id = id, "dropping args for untracked tool call"),
        }
    }

    /// Record a result and complete a tracked call. Unknown ids are dropped.
    pub(crate) fn complete(&mut self, id: &str, result: &str) {
        match self.calls.get_mut(id) {
            Some(record) => {
                record.result = Some(result.to_string());
                record.status = ToolCallStatus::Completed;
            }
            None => debug!(call_id = id, "dropping result for untracked tool call"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lifecycle() {
        let mut tracker = ToolCallTracker::new();
        tracker.start("c1", Some("search"));

        let record = tracker.get("c1").unwrap();
        assert_eq!(record.name, "search");
        assert_eq!(record.status, ToolCallStatus::Executing);
        assert!(!record.is_completed());

        tracker.append_args("c1", r#"{"q":"#);
        tracker.append_args("c1", r#""rust"}"#);
        assert_eq!(tracker.get("c1").unwrap().args, r#"{"q":"rust"}"#);

        tracker.complete("c1", "3 results");
        let record = tracker.get("c1").unwrap();
        assert!(record.is_completed());
        assert_eq!(record.result.as_deref(), Some("3 results"));
    }

    #[test]
    fn test_missing_name_placeholder() {
        let mut tracker = ToolCallTracker::new();
        tracker.start("c1", None);
        assert_eq!(tracker.get("c1").unwrap().name, UNKNOWN_TOOL);
    }

    #[test]
    fn test_unknown_id_dropped() {
        let mut tracker = ToolCallTracker::new();
        tracker.append_args("ghost", "abc");
        tracker.complete("ghost", "r");
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_last_start_wins() {
        let mut tracker = ToolCallTracker::new();
        tracker.start("c1", Some("first"));
        tracker.append_args("c1", "{}");
        tracker.start("c1", Some("second"));

        let record = tracker.get("c1").unwrap();
        assert_eq!(record.name, "second");
        assert_eq!(record.args, "");
        assert_eq!(record.status, ToolCallStatus::Executing);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_first_start_order() {
        let mut tracker = ToolCallTracker::new();
        tracker.start("b", Some("two"));
        tracker.start("a", Some("one"));
        let ids: Vec<_> = tracker.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
