// models/transaction.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::errors::Result;

pub const SUCCESS_STATUS: &str = "SUCCESS";
pub const PENDING_STATUS: &str = "PENDING";
pub const SUCCESS_RESPONSE_CODE: &str = "00";

/// The backend wraps records in up to three `data` layers depending on the endpoint.
const MAX_ENVELOPE_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Success,
    Pending,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Success => SUCCESS_STATUS,
            TransactionStatus::Pending => PENDING_STATUS,
            TransactionStatus::Other(raw) => raw,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransactionStatus::Success)
    }

    /// Anything but `PENDING` is a settled outcome.
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl From<String> for TransactionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            SUCCESS_STATUS => TransactionStatus::Success,
            PENDING_STATUS => TransactionStatus::Pending,
            _ => TransactionStatus::Other(raw),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One payment attempt as the backend stores it.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub order_id: Option<String>,

    /// Minor currency units (100 x the display unit). Some backends send it as a string.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub amount: Option<i64>,

    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub transaction_no: Option<String>,
    #[serde(default)]
    pub bank_code: Option<String>,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub order_info: Option<String>,
}

impl TransactionRecord {
    pub fn is_success(&self) -> bool {
        self.status.as_ref().map_or(false, TransactionStatus::is_success)
    }
}

/// Unwraps `GET /transactions/{orderId}`.
///
/// Records that omit their own order id inherit the one that was asked for.
pub fn normalize_by_id_response(order_id: &str, body: Value) -> Result<Option<TransactionRecord>> {
    let record = match unwrap_data_envelope(body) {
        Some(inner) => serde_json::from_value::<TransactionRecord>(inner)?,
        None => return Ok(None),
    };

    Ok(Some(TransactionRecord {
        order_id: record.order_id.clone().or_else(|| Some(order_id.to_string())),
        ..record
    }))
}

/// Unwraps `GET /transactions/last`.
pub fn normalize_last_response(body: Value) -> Result<Option<TransactionRecord>> {
    match unwrap_data_envelope(body) {
        Some(inner) => Ok(Some(serde_json::from_value(inner)?)),
        None => Ok(None),
    }
}

fn unwrap_data_envelope(body: Value) -> Option<Value> {
    let mut current = body;
    for _ in 0..=MAX_ENVELOPE_DEPTH {
        match current {
            Value::Object(map) if looks_like_record(&map) => return Some(Value::Object(map)),
            Value::Object(mut map) => current = map.remove("data")?,
            _ => return None,
        }
    }
    None
}

fn looks_like_record(map: &serde_json::Map<String, Value>) -> bool {
    map.contains_key("orderId") || map.contains_key("status")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_keeps_unknown_strings() {
        let status: TransactionStatus = serde_json::from_value(json!("FAILED")).unwrap();
        assert_eq!(status, TransactionStatus::Other("FAILED".to_string()));
        assert!(!status.is_success());
        assert!(status.is_conclusive());
        assert!(!TransactionStatus::from("PENDING".to_string()).is_conclusive());
    }

    #[test]
    fn amount_accepts_number_or_string() {
        let from_number: TransactionRecord =
            serde_json::from_value(json!({"orderId": "1", "amount": 10000000})).unwrap();
        let from_string: TransactionRecord =
            serde_json::from_value(json!({"orderId": "1", "amount": "10000000"})).unwrap();
        let missing: TransactionRecord = serde_json::from_value(json!({"orderId": "1"})).unwrap();

        assert_eq!(from_number.amount, Some(10_000_000));
        assert_eq!(from_string.amount, Some(10_000_000));
        assert_eq!(missing.amount, None);
    }

    #[test]
    fn unwraps_nested_envelopes() {
        let record = json!({"orderId": "1742964928849", "status": "SUCCESS", "responseCode": "00"});

        for body in [
            record.clone(),
            json!({"data": record.clone()}),
            json!({"data": {"data": record.clone()}, "success": true}),
            json!({"data": {"data": {"data": record.clone()}}}),
        ] {
            let parsed = normalize_last_response(body).unwrap().unwrap();
            assert_eq!(parsed.order_id.as_deref(), Some("1742964928849"));
            assert!(parsed.is_success());
        }
    }

    #[test]
    fn null_or_missing_data_is_no_record() {
        assert_eq!(normalize_last_response(json!({"data": null})).unwrap(), None);
        assert_eq!(normalize_last_response(json!({"success": false, "message": "nope"})).unwrap(), None);
        assert_eq!(normalize_last_response(json!({"data": {"data": null}})).unwrap(), None);
    }

    #[test]
    fn by_id_fills_missing_order_id() {
        let parsed = normalize_by_id_response("A-1", json!({"data": {"status": "PENDING"}}))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.order_id.as_deref(), Some("A-1"));
        assert_eq!(parsed.status, Some(TransactionStatus::Pending));
    }

    #[test]
    fn malformed_record_is_an_error() {
        let err = normalize_last_response(json!({"data": {"orderId": "1", "amount": "ten"}}));
        assert!(err.is_err());
    }
}
