//! In-memory implementation of BillStore for testing and development

use crate::core::error::StoreError;
use crate::core::{Bill, BillStore, UploadReceipt, UploadRequest};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Number of calls each store operation received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub list: usize,
    pub create: usize,
    pub update: usize,
}

#[derive(Default)]
struct State {
    records: IndexMap<String, Value>,
    calls: StoreCalls,
    fail_next_list: Option<StoreError>,
    fail_next_create: Option<StoreError>,
    fail_next_update: Option<StoreError>,
}

/// In-memory stand-in for the remote bill API
///
/// Keeps raw records in insertion order, counts calls, and can be told to
/// reject the next call of an operation with a given error.
#[derive(Clone)]
pub struct InMemoryBillStore {
    state: Arc<RwLock<State>>,
    base_url: String,
}

impl InMemoryBillStore {
    /// Create an empty store
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            base_url: base_url.into(),
        }
    }

    /// Create a store holding `records`, keyed by their `id` when they have one
    pub fn with_records(base_url: impl Into<String>, records: Vec<Value>) -> Self {
        let store = Self::new(base_url);
        if let Ok(mut state) = store.state.write() {
            for record in records {
                let key = record
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                state.records.insert(key, record);
            }
        }
        store
    }

    /// Reject the next `list` call with `error`
    pub fn fail_next_list(&self, error: StoreError) {
        if let Ok(mut state) = self.state.write() {
            state.fail_next_list = Some(error);
        }
    }

    /// Reject the next `create` call with `error`
    pub fn fail_next_create(&self, error: StoreError) {
        if let Ok(mut state) = self.state.write() {
            state.fail_next_create = Some(error);
        }
    }

    /// Reject the next `update` call with `error`
    pub fn fail_next_update(&self, error: StoreError) {
        if let Ok(mut state) = self.state.write() {
            state.fail_next_update = Some(error);
        }
    }

    /// Calls received so far
    pub fn calls(&self) -> StoreCalls {
        self.state.read().map(|s| s.calls).unwrap_or_default()
    }

    /// Bill stored under `key`
    pub fn get(&self, key: &str) -> Option<Bill> {
        self.state
            .read()
            .ok()?
            .records
            .get(key)
            .and_then(Bill::from_record)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }
}

/// A draft is a bill created by an upload and never submitted
fn is_open_draft(record: &Value, email: Option<&str>) -> bool {
    Bill::from_record(record)
        .is_some_and(|draft| draft.status.is_none() && draft.email.as_deref() == email)
}

#[async_trait]
impl BillStore for InMemoryBillStore {
    async fn list(&self) -> Result<Vec<Value>, StoreError> {
        let mut state = self.write()?;
        state.calls.list += 1;

        if let Some(error) = state.fail_next_list.take() {
            tracing::debug!(%error, "list rejected");
            return Err(error);
        }

        Ok(state.records.values().cloned().collect())
    }

    async fn create(&self, upload: UploadRequest) -> Result<UploadReceipt, StoreError> {
        let mut state = self.write()?;
        state.calls.create += 1;

        if let Some(error) = state.fail_next_create.take() {
            tracing::debug!(%error, "create rejected");
            return Err(error);
        }

        let key = Uuid::new_v4().to_string();
        let file_url = format!("{}/{}", self.base_url.trim_end_matches('/'), upload.file_name);

        let draft = Bill {
            id: Some(key.clone()),
            email: Some(upload.email),
            file_url: Some(file_url.clone()),
            file_name: Some(upload.file_name),
            ..Default::default()
        };
        state.records.insert(key.clone(), draft.to_record());

        tracing::debug!(key = %key, bytes = upload.content.len(), "receipt stored");
        Ok(UploadReceipt { file_url, key })
    }

    async fn update(&self, selector: Option<&str>, mut bill: Bill) -> Result<Bill, StoreError> {
        let mut state = self.write()?;
        state.calls.update += 1;

        if let Some(error) = state.fail_next_update.take() {
            tracing::debug!(%error, "update rejected");
            return Err(error);
        }

        let key = match selector {
            Some(key) => {
                let Some(existing) = state.records.get(key) else {
                    return Err(StoreError::NotFound {
                        key: key.to_string(),
                    });
                };
                if !is_open_draft(existing, bill.email.as_deref()) {
                    tracing::warn!(key = %key, "update refused on a bill that is not an open draft");
                    return Err(StoreError::NotEditable {
                        key: key.to_string(),
                    });
                }
                key.to_string()
            }
            None => Uuid::new_v4().to_string(),
        };

        bill.id = Some(key.clone());
        state.records.insert(key, bill.to_record());

        Ok(bill)
    }
}
