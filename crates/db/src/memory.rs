//! In-memory [`ProgressStore`].
//!
//! Applies the same find-or-create and partial-merge rules as the SQL
//! repositories, with one lock held for the duration of each operation so
//! every write is atomic per document. Used as the store in HTTP tests; the
//! `unavailable` switch makes every call fail the way a dropped connection
//! would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::events::{EventRecord, UpsertEvents};
use crate::models::progress::{ProgressRecord, UpsertProgress};
use crate::models::status_check::{CreateStatusCheck, StatusCheck};
use crate::store::{ProgressStore, StoreError, StoreResult};

const COLLECTIONS: [&str; 3] = ["daily_progress", "event_progress", "status_checks"];

#[derive(Default)]
struct Collections {
    /// Keyed by `(user_id, date)`. The sequence number is set by writes
    /// only, so a read-created default stays `None`.
    progress: HashMap<(String, String), (Option<u64>, ProgressRecord)>,
    events: HashMap<String, EventRecord>,
    status_checks: Vec<StatusCheck>,
    seq: u64,
}

impl Collections {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn find_or_create_progress(
        &self,
        user_id: &str,
        date: &str,
        default_progress: &serde_json::Value,
    ) -> StoreResult<ProgressRecord> {
        self.check()?;
        let mut inner = self.inner.write().await;
        let key = (user_id.to_string(), date.to_string());

        if let Some((_, record)) = inner.progress.get(&key) {
            return Ok(record.clone());
        }

        let now = Utc::now();
        let record = ProgressRecord {
            user_id: user_id.to_string(),
            date: date.to_string(),
            daily_progress: default_progress.clone(),
            completed_events: Json(Default::default()),
            completed_event_types: Json(Default::default()),
            created_at: now,
            updated_at: now,
        };
        inner.progress.insert(key, (None, record.clone()));
        Ok(record)
    }

    async fn latest_progress(&self, user_id: &str) -> StoreResult<Option<ProgressRecord>> {
        self.check()?;
        let inner = self.inner.read().await;

        Ok(inner
            .progress
            .values()
            .filter(|(_, record)| record.user_id == user_id)
            .filter_map(|(seq, record)| seq.map(|seq| (seq, record)))
            .max_by_key(|(seq, _)| *seq)
            .map(|(_, record)| record.clone()))
    }

    async fn list_progress(
        &self,
        user_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<ProgressRecord>> {
        self.check()?;
        let inner = self.inner.read().await;

        let mut records: Vec<ProgressRecord> = inner
            .progress
            .values()
            .filter(|(_, record)| record.user_id == user_id)
            .map(|(_, record)| record.clone())
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records.truncate(limit);
        Ok(records)
    }

    async fn upsert_progress(
        &self,
        user_id: &str,
        dto: &UpsertProgress,
    ) -> StoreResult<ProgressRecord> {
        self.check()?;
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq();
        let now = Utc::now();
        let key = (user_id.to_string(), dto.date.clone());

        let (stored_seq, record) = inner.progress.entry(key).or_insert_with(|| {
            (
                None,
                ProgressRecord {
                    user_id: user_id.to_string(),
                    date: dto.date.clone(),
                    daily_progress: serde_json::Value::Null,
                    completed_events: Json(Default::default()),
                    completed_event_types: Json(Default::default()),
                    created_at: now,
                    updated_at: now,
                },
            )
        });

        *stored_seq = Some(seq);
        record.daily_progress = dto.daily_progress.clone();
        if let Some(events) = &dto.completed_events {
            record.completed_events = Json(events.clone());
        }
        if let Some(types) = &dto.completed_event_types {
            record.completed_event_types = Json(types.clone());
        }
        record.updated_at = now;

        Ok(record.clone())
    }

    async fn find_or_create_events(&self, user_id: &str) -> StoreResult<EventRecord> {
        self.check()?;
        let mut inner = self.inner.write().await;
        let now = Utc::now();

        let record = inner
            .events
            .entry(user_id.to_string())
            .or_insert_with(|| EventRecord {
                user_id: user_id.to_string(),
                completed_events: Json(Default::default()),
                completed_event_types: Json(Default::default()),
                created_at: now,
                updated_at: now,
            });
        Ok(record.clone())
    }

    async fn upsert_events(&self, user_id: &str, dto: &UpsertEvents) -> StoreResult<EventRecord> {
        self.check()?;
        let mut inner = self.inner.write().await;
        let now = Utc::now();

        let record = inner
            .events
            .entry(user_id.to_string())
            .or_insert_with(|| EventRecord {
                user_id: user_id.to_string(),
                completed_events: Json(Default::default()),
                completed_event_types: Json(Default::default()),
                created_at: now,
                updated_at: now,
            });

        if let Some(events) = &dto.completed_events {
            record.completed_events = Json(events.clone());
        }
        if let Some(types) = &dto.completed_event_types {
            record.completed_event_types = Json(types.clone());
        }
        record.updated_at = now;

        Ok(record.clone())
    }

    async fn create_status_check(&self, dto: &CreateStatusCheck) -> StoreResult<StatusCheck> {
        self.check()?;
        let check = StatusCheck {
            id: Uuid::new_v4(),
            client_name: dto.client_name.clone(),
            timestamp: Utc::now(),
        };
        self.inner.write().await.status_checks.push(check.clone());
        Ok(check)
    }

    async fn list_status_checks(&self, limit: usize) -> StoreResult<Vec<StatusCheck>> {
        self.check()?;
        let inner = self.inner.read().await;
        Ok(inner.status_checks.iter().rev().take(limit).cloned().collect())
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        self.check()?;
        Ok(COLLECTIONS.iter().map(|c| (*c).to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn events(pairs: &[(&str, bool)]) -> BTreeMap<String, bool> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    fn write(date: &str, progress: serde_json::Value) -> UpsertProgress {
        UpsertProgress {
            date: date.to_string(),
            daily_progress: progress,
            completed_events: None,
            completed_event_types: None,
        }
    }

    #[tokio::test]
    async fn find_or_create_persists_default_once() {
        let store = MemoryStore::new();
        let default = json!({"gathering": {"vine_bridge": false}});

        let first = store
            .find_or_create_progress("u1", "2024-01-01", &default)
            .await
            .unwrap();
        store
            .upsert_progress("u1", &write("2024-01-01", json!({"vine_bridge": true})))
            .await
            .unwrap();
        let second = store
            .find_or_create_progress("u1", "2024-01-01", &default)
            .await
            .unwrap();

        assert_eq!(first.daily_progress, default);
        assert_eq!(second.daily_progress, json!({"vine_bridge": true}));
        assert_eq!(second.created_at, first.created_at);
    }

    #[tokio::test]
    async fn upsert_keeps_events_when_omitted() {
        let store = MemoryStore::new();
        let mut dto = write("2024-01-01", json!({"a": true}));
        dto.completed_events = Some(events(&[("tequatl", true)]));
        store.upsert_progress("u1", &dto).await.unwrap();

        let record = store
            .upsert_progress("u1", &write("2024-01-01", json!({"a": false})))
            .await
            .unwrap();

        assert_eq!(record.daily_progress, json!({"a": false}));
        assert_eq!(record.completed_events.0, events(&[("tequatl", true)]));
        assert!(record.completed_event_types.0.is_empty());
    }

    #[tokio::test]
    async fn latest_follows_most_recent_write() {
        let store = MemoryStore::new();
        store
            .upsert_progress("u1", &write("2024-01-02", json!({"day": 2})))
            .await
            .unwrap();
        store
            .upsert_progress("u1", &write("2024-01-01", json!({"day": 1})))
            .await
            .unwrap();
        store
            .upsert_progress("u2", &write("2024-01-03", json!({"day": 3})))
            .await
            .unwrap();

        let latest = store.latest_progress("u1").await.unwrap().unwrap();
        assert_eq!(latest.date, "2024-01-01");
        assert!(store.latest_progress("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn read_created_defaults_do_not_become_latest() {
        let store = MemoryStore::new();
        store
            .upsert_progress("u1", &write("2024-01-01", json!({"vine_bridge": true})))
            .await
            .unwrap();
        store
            .find_or_create_progress("u1", "2023-12-31", &json!({"vine_bridge": false}))
            .await
            .unwrap();

        let latest = store.latest_progress("u1").await.unwrap().unwrap();
        assert_eq!(latest.date, "2024-01-01");

        store
            .find_or_create_progress("u2", "2024-01-01", &json!({}))
            .await
            .unwrap();
        assert!(store.latest_progress("u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn history_lists_newest_date_first() {
        let store = MemoryStore::new();
        for date in ["2024-01-02", "2024-01-03", "2024-01-01"] {
            store
                .upsert_progress("u1", &write(date, json!({})))
                .await
                .unwrap();
        }
        store
            .upsert_progress("u2", &write("2024-02-01", json!({})))
            .await
            .unwrap();

        let days = store.list_progress("u1", 2).await.unwrap();
        let dates: Vec<&str> = days.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-02"]);
        assert!(store.list_progress("nobody", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn event_maps_merge_independently() {
        let store = MemoryStore::new();
        store
            .upsert_events(
                "u1",
                &UpsertEvents {
                    completed_events: Some(events(&[("shatterer", true)])),
                    completed_event_types: None,
                },
            )
            .await
            .unwrap();
        let record = store
            .upsert_events(
                "u1",
                &UpsertEvents {
                    completed_events: None,
                    completed_event_types: Some(events(&[("world_boss", true)])),
                },
            )
            .await
            .unwrap();

        assert_eq!(record.completed_events.0, events(&[("shatterer", true)]));
        assert_eq!(record.completed_event_types.0, events(&[("world_boss", true)]));
    }

    #[tokio::test]
    async fn status_list_is_capped() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            store
                .create_status_check(&CreateStatusCheck {
                    client_name: name.into(),
                })
                .await
                .unwrap();
        }

        let listed = store.list_status_checks(2).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|c| c.client_name.as_str()).collect();
        assert_eq!(names, ["c", "b"]);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);

        assert_matches!(
            store.list_collections().await,
            Err(StoreError::Unavailable(_))
        );
        assert_matches!(
            store.find_or_create_events("u1").await,
            Err(StoreError::Unavailable(_))
        );

        store.set_unavailable(false);
        assert_eq!(store.list_collections().await.unwrap().len(), 3);
    }
}
