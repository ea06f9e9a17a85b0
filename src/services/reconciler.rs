// services/reconciler.rs
//! Pure derivation of a [`DisplayModel`] from whatever the page was given:
//! gateway callback params, a backend record, or the lack of one.

use std::fmt;

use crate::models::callback::{
    RawCallbackParams, AMOUNT_KEY, BANK_CODE_KEY, CARD_TYPE_KEY, ORDER_INFO_KEY, PAY_DATE_KEY,
    RESPONSE_CODE_KEY, TRANSACTION_NO_KEY, TXN_REF_KEY,
};
use crate::models::display::{DetailField, DisplayModel};
use crate::models::transaction::{TransactionRecord, SUCCESS_RESPONSE_CODE};
use crate::services::response_codes;
use crate::services::signature::SignatureCheck;

const NOT_FOUND_BY_ID: &str = "No transaction information found. Please check the order id.";
const NOT_FOUND_LAST: &str =
    "No recent transaction found. Please check your order id or contact support.";
const LOOKUP_FAILED_BY_ID: &str = "Could not verify the transaction status. Please try again later.";
const LOOKUP_FAILED_LAST: &str =
    "Could not verify your most recent transaction. Please try again later.";

/// What a backend lookup is for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupTarget {
    Last,
    Order(String),
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupTarget::Last => f.write_str("most recent transaction"),
            LookupTarget::Order(order_id) => write!(f, "order {}", order_id),
        }
    }
}

pub fn from_callback(params: &RawCallbackParams) -> DisplayModel {
    let code = params.response_code().unwrap_or_default();
    let success = code == SUCCESS_RESPONSE_CODE;

    let error_message = if success {
        String::new()
    } else {
        match response_codes::reason_for(code) {
            Some(reason) => format!("Payment failed. {}.", reason),
            None => format!("Payment failed (response code: {}).", code),
        }
    };

    DisplayModel {
        success,
        error_message,
        fields: to_fields(params),
    }
}

pub fn from_record(record: &TransactionRecord) -> DisplayModel {
    let success = record.is_success();
    DisplayModel {
        success,
        error_message: if success { String::new() } else { record_failure_message(record) },
        fields: to_fields(&record_params(record)),
    }
}

pub fn not_found(target: &LookupTarget) -> DisplayModel {
    let message = match target {
        LookupTarget::Last => NOT_FOUND_LAST,
        LookupTarget::Order(_) => NOT_FOUND_BY_ID,
    };
    failure(message)
}

pub fn lookup_failed(target: &LookupTarget) -> DisplayModel {
    let message = match target {
        LookupTarget::Last => LOOKUP_FAILED_LAST,
        LookupTarget::Order(_) => LOOKUP_FAILED_BY_ID,
    };
    failure(message)
}

/// A callback whose signature did not check out is never a success.
pub fn apply_signature_check(model: DisplayModel, check: SignatureCheck) -> DisplayModel {
    let reason = match check {
        SignatureCheck::Valid => return model,
        SignatureCheck::Missing => "missing signature",
        SignatureCheck::Invalid => "invalid signature",
    };

    DisplayModel {
        success: false,
        error_message: format!("The payment result could not be verified ({}).", reason),
        ..model
    }
}

/// The backend record outranks the client-visible callback once it has settled.
/// The technical details keep showing what the gateway sent.
pub fn confirm_with_record(model: DisplayModel, record: &TransactionRecord) -> DisplayModel {
    match &record.status {
        Some(status) if status.is_conclusive() => {
            let success = status.is_success();
            DisplayModel {
                success,
                error_message: if success { String::new() } else { record_failure_message(record) },
                fields: model.fields,
            }
        }
        _ => model,
    }
}

/// Rebuilds the callback shape from a record so the technical details look the
/// same on every path.
pub fn record_params(record: &TransactionRecord) -> RawCallbackParams {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    RawCallbackParams::from_iter([
        (AMOUNT_KEY, record.amount.map(|amount| amount.to_string()).unwrap_or_default()),
        (ORDER_INFO_KEY, text(&record.order_info)),
        (PAY_DATE_KEY, text(&record.payment_date)),
        (RESPONSE_CODE_KEY, text(&record.response_code)),
        (TRANSACTION_NO_KEY, text(&record.transaction_no)),
        (TXN_REF_KEY, text(&record.order_id)),
        (BANK_CODE_KEY, text(&record.bank_code)),
        (CARD_TYPE_KEY, text(&record.card_type)),
    ])
}

fn record_failure_message(record: &TransactionRecord) -> String {
    let status = record
        .status
        .as_ref()
        .map(|status| status.as_str())
        .unwrap_or("UNKNOWN");
    let mut message = format!("Transaction status: {}.", status);

    if let Some(code) = record
        .response_code
        .as_deref()
        .filter(|code| !code.is_empty() && *code != SUCCESS_RESPONSE_CODE)
    {
        message.push_str(&format!(" Error code: {}.", code));
    }
    message
}

fn failure(message: &str) -> DisplayModel {
    DisplayModel {
        success: false,
        error_message: message.to_string(),
        fields: Vec::new(),
    }
}

fn to_fields(params: &RawCallbackParams) -> Vec<DetailField> {
    params
        .iter()
        .map(|(label, value)| DetailField {
            label: label.to_string(),
            value: value.to_string(),
        })
        .collect()
}
