//! In-memory implementation of both store traits.
//!
//! Mirrors the table API closely enough for repository and service tests:
//! inserts get a UUID `id` and `created_at` / `updated_at` stamps, updates
//! bump `updated_at`, selects honour equality filters, ordering and limit.
//! Every call is recorded, and individual operations can be made to fail.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{BackendError, BlobStore, Direction, Filter, Query, RecordStore};

/// Store operation kinds, used for call recording and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Insert,
    Update,
    Select,
    Delete,
    Upload,
    Remove,
}

/// One recorded call: the operation and the table or bucket it targeted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: Op,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    blobs: RwLock<HashMap<(String, String), StoredBlob>>,
    failures: RwLock<HashSet<(Op, String)>>,
    calls: RwLock<Vec<Call>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `op` against `target` (table or bucket) fail until cleared.
    pub async fn fail_on(&self, op: Op, target: &str) {
        self.failures.write().await.insert((op, target.to_string()));
    }

    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
    }

    /// All calls made so far, in order.
    pub async fn calls(&self) -> Vec<Call> {
        self.calls.read().await.clone()
    }

    /// Number of calls that were writes (insert, update, delete, upload, remove).
    pub async fn write_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.op != Op::Select)
            .count()
    }

    /// Current rows of a table, in insertion order.
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Put a row into a table verbatim, without stamping any columns.
    pub async fn seed(&self, table: &str, row: Value) {
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    pub async fn blob(&self, bucket: &str, path: &str) -> Option<StoredBlob> {
        self.blobs
            .read()
            .await
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }

    /// Paths of every object stored in a bucket, sorted.
    pub async fn blob_paths(&self, bucket: &str) -> Vec<String> {
        let mut paths: Vec<String> = self
            .blobs
            .read()
            .await
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, p)| p.clone())
            .collect();
        paths.sort();
        paths
    }

    async fn record(&self, op: Op, target: &str) -> Result<(), BackendError> {
        self.calls.write().await.push(Call {
            op,
            target: target.to_string(),
        });
        if self
            .failures
            .read()
            .await
            .contains(&(op, target.to_string()))
        {
            return Err(BackendError::Unavailable(format!(
                "simulated {op:?} failure on {target}"
            )));
        }
        Ok(())
    }
}

fn now_stamp() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Column value as the text a filter compares against.
fn column_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn matches(row: &Value, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| row.get(&f.column).is_some() && column_text(row.get(&f.column)) == f.value)
}

#[async_trait]
impl RecordStore for MemoryBackend {
    async fn insert(&self, table: &str, row: Value) -> Result<Value, BackendError> {
        self.record(Op::Insert, table).await?;

        let Value::Object(mut object) = row else {
            return Err(BackendError::Api {
                status: 400,
                body: "row must be a JSON object".to_string(),
            });
        };
        if matches!(object.get("id"), None | Some(Value::Null)) {
            object.insert(
                "id".to_string(),
                Value::String(uuid::Uuid::new_v4().to_string()),
            );
        }
        let stamp = now_stamp();
        object
            .entry("created_at")
            .or_insert_with(|| stamp.clone());
        object.entry("updated_at").or_insert(stamp);

        let stored = Value::Object(object);
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        changes: Value,
    ) -> Result<Vec<Value>, BackendError> {
        self.record(Op::Update, table).await?;

        let Value::Object(changes) = changes else {
            return Err(BackendError::Api {
                status: 400,
                body: "changes must be a JSON object".to_string(),
            });
        };

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|r| matches(r, filters)) {
            if let Value::Object(object) = row {
                for (key, value) in &changes {
                    object.insert(key.clone(), value.clone());
                }
                object.insert("updated_at".to_string(), now_stamp());
            }
            updated.push(row.clone());
        }
        Ok(updated)
    }

    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, BackendError> {
        self.record(Op::Select, table).await?;

        let mut rows: Vec<Value> = self
            .tables
            .read()
            .await
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| matches(r, &query.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((column, direction)) = &query.order {
            rows.sort_by(|a, b| {
                let (a, b) = (column_text(a.get(column)), column_text(b.get(column)));
                match direction {
                    Direction::Asc => a.cmp(&b),
                    Direction::Desc => b.cmp(&a),
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<u64, BackendError> {
        self.record(Op::Delete, table).await?;

        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| !matches(r, filters));
        Ok((before - rows.len()) as u64)
    }
}

#[async_trait]
impl BlobStore for MemoryBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        self.record(Op::Upload, bucket).await?;

        let key = (bucket.to_string(), path.to_string());
        let mut blobs = self.blobs.write().await;
        if blobs.contains_key(&key) {
            return Err(BackendError::Api {
                status: 409,
                body: format!("object already exists: {path}"),
            });
        }
        blobs.insert(
            key,
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError> {
        self.record(Op::Remove, bucket).await?;

        let mut blobs = self.blobs.write().await;
        for path in paths {
            blobs.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{bucket}/{path}")
    }
}
