// models/session.rs

/// Who is looking at the result page. Passed explicitly into every view and
/// forwarded to the backend so "most recent transaction" resolves per user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub bearer_token: Option<String>,
    pub user_id: Option<String>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        SessionContext {
            bearer_token: Some(token.into()),
            user_id: None,
        }
    }

    pub fn authorization_header(&self) -> Option<String> {
        self.bearer_token
            .as_deref()
            .map(|token| format!("Bearer {}", token))
    }
}
