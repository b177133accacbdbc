//! Bills page container
//!
//! Turns store records into sorted display rows and maps the page's
//! clicks to intents.

use serde::Serialize;
use serde_json::Value;

use crate::core::bill::{Bill, format_date};
use crate::core::{BillStatus, BillStore, Intent, Route, StoreError};

/// One row of the bills table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillRow {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    /// Raw ISO date, kept for ordering checks
    pub date: String,
    pub formatted_date: String,
    pub amount: Option<u32>,
    pub status: String,
    pub file_url: String,
}

/// Bills as fetched, before filtering and ordering
#[derive(Debug, Clone, Default)]
pub struct BillsList {
    bills: Vec<Bill>,
}

impl BillsList {
    /// Build from raw records, dropping null and non-object entries
    ///
    /// Object records are always kept, whatever their field types; only
    /// the date decides later whether a bill is displayed.
    pub fn from_records(records: &[Value]) -> Self {
        let bills = records
            .iter()
            .filter_map(|record| {
                let bill = Bill::from_record(record);
                if bill.is_none() {
                    tracing::warn!(record = %record, "skipping malformed bill record");
                }
                bill
            })
            .collect();
        Self { bills }
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    /// Bills still waiting for review
    pub fn pending_count(&self) -> usize {
        self.bills
            .iter()
            .filter(|bill| bill.status == Some(BillStatus::Pending))
            .count()
    }

    /// Display rows, newest first
    ///
    /// Bills without a parseable date are left out. Equal dates keep
    /// their fetch order.
    pub fn rows(&self) -> Vec<BillRow> {
        let mut dated: Vec<_> = self
            .bills
            .iter()
            .filter_map(|bill| bill.parsed_date().map(|date| (date, bill)))
            .collect();
        dated.sort_by(|(a, _), (b, _)| b.cmp(a));

        dated
            .into_iter()
            .map(|(date, bill)| BillRow {
                id: bill.id.clone(),
                expense_type: bill.expense_type.clone().unwrap_or_default(),
                name: bill.name.clone().unwrap_or_default(),
                date: date.format("%Y-%m-%d").to_string(),
                formatted_date: format_date(date),
                amount: bill.amount,
                status: bill
                    .status
                    .map(|s| s.label().to_string())
                    .unwrap_or_default(),
                file_url: bill.file_url.clone().unwrap_or_default(),
            })
            .collect()
    }
}

/// Bills page event handlers
#[derive(Debug, Clone, Copy, Default)]
pub struct Bills;

impl Bills {
    /// Eye icon on a row: preview its receipt
    pub fn handle_click_icon_eye(&self, row: &BillRow) -> Intent {
        Intent::ShowReceipt {
            file_url: row.file_url.clone(),
        }
    }

    /// "New bill" button
    pub fn handle_click_new_bill(&self) -> Intent {
        Intent::navigate(Route::NewBill)
    }

    /// Fetch the bills to display
    ///
    /// A rejection is returned as is; its message is what the page shows.
    pub async fn get_bills(&self, store: &dyn BillStore) -> Result<Vec<BillRow>, StoreError> {
        let records = store.list().await.inspect_err(|error| {
            tracing::warn!(%error, "failed to fetch bills");
        })?;
        let list = BillsList::from_records(&records);
        let rows = list.rows();
        tracing::debug!(fetched = list.len(), displayed = rows.len(), "bills fetched");
        Ok(rows)
    }
}
