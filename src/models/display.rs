// models/display.rs
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

/// Normalized payment outcome, whichever way it was acquired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub success: bool,
    pub error_message: String,
    pub fields: Vec<DetailField>,
}

impl DisplayModel {
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Complete,
    Failed,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressStep {
    pub title: &'static str,
    pub state: StepState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub title: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub order_ref: String,
    pub order_info: String,
    pub amount: String,
    pub paid_at: String,
    pub bank_code: String,
    pub card_type: String,
    pub status: &'static str,
    pub gateway_transaction_no: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationAction {
    pub label: &'static str,
    pub target: String,
    pub primary: bool,
}

/// Everything the result page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPage {
    pub outcome: Outcome,
    pub steps: Vec<ProgressStep>,
    pub summary: Option<OrderSummary>,
    pub actions: Vec<NavigationAction>,
    pub details: Vec<DetailField>,
}
