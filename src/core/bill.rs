//! Bill record and its display formatting

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Expense types offered by the new-bill form, in display order.
///
/// The first entry is the select's default value.
pub const EXPENSE_TYPES: &[&str] = &[
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Review status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    /// Label shown in the bills table
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refused",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        };
        write!(f, "{}", raw)
    }
}

/// An expense-report record submitted by an employee
///
/// Every field is optional: records coming back from the store may be
/// partially null and still have to be handled by the list view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "type")]
    pub expense_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<u32>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub vat: Option<String>,
    #[serde(default)]
    pub pct: Option<u32>,
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub comment_admin: Option<String>,
    #[serde(default)]
    pub status: Option<BillStatus>,
}

impl Bill {
    /// Build a bill from a raw store record
    ///
    /// Returns `None` only for null or non-object records. Each field is
    /// read on its own: a field of the wrong type (a numeric `vat`, a
    /// fractional `amount`, an unknown `status`) is left empty instead of
    /// dropping the whole record.
    pub fn from_record(record: &Value) -> Option<Self> {
        let fields = record.as_object()?;
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
        let number = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
        };

        Some(Self {
            id: text("id"),
            email: text("email"),
            expense_type: text("type"),
            name: text("name"),
            amount: number("amount"),
            date: text("date"),
            vat: text("vat"),
            pct: number("pct"),
            commentary: text("commentary"),
            file_url: text("fileUrl"),
            file_name: text("fileName"),
            comment_admin: text("commentAdmin"),
            status: fields
                .get("status")
                .and_then(|status| BillStatus::deserialize(status).ok()),
        })
    }

    /// The bill date as a calendar date, if present and parseable
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date)
    }

    /// Record form of this bill, as the store keeps it
    pub fn to_record(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Parse an ISO date (`2004-04-04`) or an RFC 3339 timestamp
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Format a date for the bills table: `2004-04-04` becomes `4 Avr. 04`
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTHS_FR[date.month0() as usize];
    let year = date.year().rem_euclid(100);
    format!("{} {}. {:02}", date.day(), month, year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_date_french_short_month() {
        let date = NaiveDate::from_ymd_opt(2004, 4, 4).unwrap();
        assert_eq!(format_date(date), "4 Avr. 04");

        let date = NaiveDate::from_ymd_opt(2021, 12, 25).unwrap();
        assert_eq!(format_date(date), "25 Déc. 21");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(BillStatus::Pending.label(), "En attente");
        assert_eq!(BillStatus::Accepted.label(), "Accepté");
        assert_eq!(BillStatus::Refused.label(), "Refused");
        assert_eq!(BillStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn test_from_record_accepts_nulls() {
        let bill = Bill::from_record(&json!({
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": null,
            "status": null,
            "date": null,
            "amount": null,
            "fileName": "preview-facture-free-201801-pdf-1.jpg"
        }))
        .expect("null fields are allowed");

        assert_eq!(bill.id.as_deref(), Some("47qAXb6fIm2zOKkLzMro"));
        assert!(bill.date.is_none());
        assert!(bill.parsed_date().is_none());
    }

    #[test]
    fn test_from_record_rejects_non_objects() {
        assert!(Bill::from_record(&json!(null)).is_none());
        assert!(Bill::from_record(&json!("bill")).is_none());
        assert!(Bill::from_record(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_from_record_keeps_bill_with_mistyped_fields() {
        let bill = Bill::from_record(&json!({
            "date": "2020-01-01",
            "vat": 70,
            "amount": 12.5,
            "pct": "20",
            "status": "lost",
            "name": "Taxi"
        }))
        .expect("an object record is always kept");

        assert_eq!(bill.parsed_date(), NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(bill.name.as_deref(), Some("Taxi"));
        assert!(bill.vat.is_none());
        assert!(bill.amount.is_none());
        assert!(bill.pct.is_none());
        assert!(bill.status.is_none());
    }

    #[test]
    fn test_from_record_reads_typed_fields() {
        let bill = Bill::from_record(&json!({
            "amount": 348,
            "pct": 20,
            "status": "accepted",
            "fileUrl": "https://localhost/a.png",
            "commentAdmin": "ok"
        }))
        .unwrap();

        assert_eq!(bill.amount, Some(348));
        assert_eq!(bill.pct, Some(20));
        assert_eq!(bill.status, Some(BillStatus::Accepted));
        assert_eq!(bill.file_url.as_deref(), Some("https://localhost/a.png"));
        assert_eq!(bill.comment_admin.as_deref(), Some("ok"));
    }

    #[test]
    fn test_record_form_reads_back() {
        let bill = Bill {
            id: Some("k1".to_string()),
            amount: Some(12),
            status: Some(BillStatus::Pending),
            ..Default::default()
        };
        assert_eq!(Bill::from_record(&bill.to_record()), Some(bill));
    }

    #[test]
    fn test_camel_case_wire_names() {
        let bill = Bill {
            expense_type: Some("Transports".to_string()),
            file_url: Some("https://localhost/a.png".to_string()),
            status: Some(BillStatus::Pending),
            ..Default::default()
        };
        let value = serde_json::to_value(&bill).unwrap();
        assert_eq!(value["type"], "Transports");
        assert_eq!(value["fileUrl"], "https://localhost/a.png");
        assert_eq!(value["status"], "pending");
    }

    #[test]
    fn test_parse_date_variants() {
        assert!(parse_date("2004-04-04").is_some());
        assert!(parse_date("2004-04-04T10:00:00Z").is_some());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("2004-13-40").is_none());
    }
}
