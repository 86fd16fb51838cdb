use std::collections::BTreeMap;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Completion flags keyed by event (or event type) identifier.
pub type EventMap = BTreeMap<String, bool>;
