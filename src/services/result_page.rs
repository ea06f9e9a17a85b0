// services/result_page.rs
use crate::models::callback::{
    AMOUNT_KEY, BANK_CODE_KEY, CARD_TYPE_KEY, ORDER_INFO_KEY, PAY_DATE_KEY, TRANSACTION_NO_KEY,
    TXN_REF_KEY,
};
use crate::models::display::{
    DisplayModel, NavigationAction, OrderSummary, Outcome, ProgressStep, ResultPage, StepState,
};
use crate::services::formatting::{format_amount, format_pay_date};

const NOT_AVAILABLE: &str = "N/A";
const DEFAULT_ORDER_INFO: &str = "VIP package payment";
const SUCCESS_MESSAGE: &str = "Your VIP package is now active. You can start using the premium features and post jobs right away.";
const DEFAULT_FAILURE_MESSAGE: &str = "Something went wrong during payment. Please try again or choose another payment method.";

pub fn render(model: &DisplayModel, support_email: &str) -> ResultPage {
    ResultPage {
        outcome: outcome(model),
        steps: progress_steps(model.success),
        summary: summary(model),
        actions: actions(model.success, support_email),
        details: model.fields.clone(),
    }
}

/// Order placed is always done; payment either went through or failed; activation
/// only happens after a successful payment.
pub fn progress_steps(success: bool) -> Vec<ProgressStep> {
    vec![
        ProgressStep {
            title: "Order placed",
            state: StepState::Complete,
        },
        ProgressStep {
            title: "Paid",
            state: if success { StepState::Complete } else { StepState::Failed },
        },
        ProgressStep {
            title: "Activated",
            state: if success { StepState::Complete } else { StepState::Waiting },
        },
    ]
}

fn outcome(model: &DisplayModel) -> Outcome {
    if model.success {
        return Outcome {
            success: true,
            title: "Payment successful!",
            message: SUCCESS_MESSAGE.to_string(),
        };
    }

    let message = if model.error_message.is_empty() {
        DEFAULT_FAILURE_MESSAGE.to_string()
    } else {
        model.error_message.clone()
    };
    Outcome {
        success: false,
        title: "Payment failed",
        message,
    }
}

fn summary(model: &DisplayModel) -> Option<OrderSummary> {
    if model.fields.is_empty() {
        return None;
    }

    let present = |key: &str| model.field(key).filter(|value| !value.is_empty());
    let or_na = |key: &str| present(key).unwrap_or(NOT_AVAILABLE).to_string();

    Some(OrderSummary {
        order_ref: or_na(TXN_REF_KEY),
        order_info: present(ORDER_INFO_KEY).unwrap_or(DEFAULT_ORDER_INFO).to_string(),
        amount: present(AMOUNT_KEY).map_or_else(|| NOT_AVAILABLE.to_string(), format_amount),
        paid_at: present(PAY_DATE_KEY).map_or_else(|| NOT_AVAILABLE.to_string(), format_pay_date),
        bank_code: or_na(BANK_CODE_KEY),
        card_type: present(CARD_TYPE_KEY).map_or_else(|| NOT_AVAILABLE.to_string(), card_type_label),
        status: if model.success { "Successful" } else { "Failed" },
        gateway_transaction_no: or_na(TRANSACTION_NO_KEY),
    })
}

fn card_type_label(card_type: &str) -> String {
    match card_type {
        "ATM" => "Domestic ATM card".to_string(),
        "CREDIT" => "Credit/debit card".to_string(),
        other => other.to_string(),
    }
}

fn actions(success: bool, support_email: &str) -> Vec<NavigationAction> {
    let action = |label, target: &str, primary| NavigationAction {
        label,
        target: target.to_string(),
        primary,
    };

    if success {
        vec![
            action("View my packages", "/subscription/my-packages", true),
            action("Post a job", "/admin/job/upsert", true),
            action("Return home", "/", false),
        ]
    } else {
        vec![
            action("Retry payment", "/subscription", true),
            action("Return home", "/", true),
            action("Contact support", &format!("mailto:{}", support_email), false),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::callback::RawCallbackParams;
    use crate::models::transaction::{TransactionRecord, TransactionStatus};
    use crate::services::reconciler::{from_callback, from_record, not_found, LookupTarget};

    #[test]
    fn successful_record_completes_every_step() {
        let record = TransactionRecord {
            order_id: Some("1".to_string()),
            status: Some(TransactionStatus::Success),
            response_code: Some("00".to_string()),
            ..TransactionRecord::default()
        };
        let page = render(&from_record(&record), "support@hsjob.com");

        let states: Vec<StepState> = page.steps.iter().map(|s| s.state).collect();
        assert_eq!(states, vec![StepState::Complete; 3]);
        assert_eq!(page.actions[0].target, "/subscription/my-packages");
    }

    #[test]
    fn failure_marks_paid_failed_and_activation_waiting() {
        let page = render(
            &from_callback(&RawCallbackParams::parse("vnp_ResponseCode=24")),
            "help@example.com",
        );

        let states: Vec<StepState> = page.steps.iter().map(|s| s.state).collect();
        assert_eq!(states, vec![StepState::Complete, StepState::Failed, StepState::Waiting]);
        assert_eq!(page.actions.last().unwrap().target, "mailto:help@example.com");
        assert!(!page.outcome.success);
    }

    #[test]
    fn summary_is_formatted_while_details_stay_raw() {
        let params = RawCallbackParams::parse(
            "vnp_Amount=10000000&vnp_PayDate=20240115103045&vnp_ResponseCode=00&vnp_CardType=ATM&vnp_TxnRef=42",
        );
        let page = render(&from_callback(&params), "support@hsjob.com");
        let summary = page.summary.unwrap();

        assert_eq!(summary.amount, "100.000\u{a0}₫");
        assert_eq!(summary.paid_at, "15/01/2024 10:30:45");
        assert_eq!(summary.card_type, "Domestic ATM card");
        assert_eq!(summary.order_ref, "42");
        assert_eq!(summary.order_info, DEFAULT_ORDER_INFO);
        assert_eq!(summary.bank_code, NOT_AVAILABLE);

        assert_eq!(page.details[0].value, "10000000");
        assert_eq!(page.details[1].value, "20240115103045");
    }

    #[test]
    fn malformed_values_degrade_to_raw() {
        let params = RawCallbackParams::parse("vnp_Amount=abc&vnp_PayDate=2024&vnp_ResponseCode=00");
        let summary = render(&from_callback(&params), "s@x").summary.unwrap();
        assert_eq!(summary.amount, "abc");
        assert_eq!(summary.paid_at, "2024");
    }

    #[test]
    fn not_found_has_no_summary_but_a_message() {
        let page = render(&not_found(&LookupTarget::Order("x".to_string())), "s@x");
        assert!(page.summary.is_none());
        assert!(page.details.is_empty());
        assert!(page.outcome.message.contains("order id"));
    }

    #[test]
    fn empty_error_message_uses_default() {
        let model = DisplayModel {
            success: false,
            error_message: String::new(),
            fields: Vec::new(),
        };
        assert_eq!(render(&model, "s@x").outcome.message, DEFAULT_FAILURE_MESSAGE);
    }
}
