//! Store trait for the remote bill API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::bill::Bill;
use crate::core::error::StoreError;

/// Receipt upload sent to the store when a file passes the format gate
///
/// Mirrors the multipart body of the remote API: file content, file name
/// and the uploader's email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub content: Vec<u8>,
    pub email: String,
}

/// What the store answers to an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub file_url: String,
    /// Identifier of the draft bill created for this upload
    pub key: String,
}

/// Remote bill API
///
/// Implementations decide where bills live; the containers only rely on
/// these three calls.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// List every bill as the raw record the remote returns
    ///
    /// Records are not validated: nulls, partial or mistyped fields are
    /// left for the caller to sort out.
    async fn list(&self) -> Result<Vec<Value>, StoreError>;

    /// Upload a receipt, creating a draft bill
    async fn create(&self, upload: UploadRequest) -> Result<UploadReceipt, StoreError>;

    /// Fill in the draft stored under `selector`
    ///
    /// Only a draft created by [`create`](Self::create) for the same email
    /// and not yet submitted may be replaced. Without a selector (no
    /// receipt was uploaded) the bill is stored under a fresh key.
    async fn update(&self, selector: Option<&str>, bill: Bill) -> Result<Bill, StoreError>;
}
