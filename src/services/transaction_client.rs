// services/transaction_client.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::errors::{AppError, Result};
use crate::middleware::session::USER_ID_HEADER;
use crate::models::session::SessionContext;
use crate::models::transaction::{normalize_by_id_response, normalize_last_response, TransactionRecord};
use crate::services::reconciler::LookupTarget;

/// Read access to the backend's transaction records.
#[async_trait]
pub trait TransactionLookup: Send + Sync {
    async fn transaction_by_id(
        &self,
        order_id: &str,
        session: &SessionContext,
    ) -> Result<Option<TransactionRecord>>;

    /// Most recent transaction of whoever `session` belongs to.
    async fn last_transaction(&self, session: &SessionContext) -> Result<Option<TransactionRecord>>;

    async fn find(
        &self,
        target: &LookupTarget,
        session: &SessionContext,
    ) -> Result<Option<TransactionRecord>> {
        match target {
            LookupTarget::Last => self.last_transaction(session).await,
            LookupTarget::Order(order_id) => self.transaction_by_id(order_id, session).await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendTransactionClient {
    base_url: Url,
    client: Client,
    timeout: Duration,
}

impl BackendTransactionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::http_client(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "BACKEND_BASE_URL cannot be used as a base: {}",
                base_url
            )));
        }

        Ok(BackendTransactionClient {
            base_url,
            client,
            timeout,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("BACKEND_BASE_URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `None` when the backend answers 404.
    async fn get_json(&self, url: Url, session: &SessionContext) -> Result<Option<Value>> {
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json");
        if let Some(authorization) = session.authorization_header() {
            request = request.header(header::AUTHORIZATION, authorization);
        }
        if let Some(user_id) = session.user_id.as_deref() {
            request = request.header(USER_ID_HEADER, user_id);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::LookupTimeout(self.timeout.as_millis())
            } else {
                AppError::from(e)
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Transaction lookup failed: {} - {}", status, body);
            return Err(AppError::backend(format!("{} returned {}", url.path(), status)));
        }

        Ok(Some(response.json::<Value>().await?))
    }
}

#[async_trait]
impl TransactionLookup for BackendTransactionClient {
    async fn transaction_by_id(
        &self,
        order_id: &str,
        session: &SessionContext,
    ) -> Result<Option<TransactionRecord>> {
        let url = self.endpoint(&["transactions", order_id])?;
        match self.get_json(url, session).await? {
            Some(body) => normalize_by_id_response(order_id, body),
            None => Ok(None),
        }
    }

    async fn last_transaction(&self, session: &SessionContext) -> Result<Option<TransactionRecord>> {
        let url = self.endpoint(&["transactions", "last"])?;
        match self.get_json(url, session).await? {
            Some(body) => normalize_last_response(body),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_encoded_segments() {
        let client =
            BackendTransactionClient::new("http://backend.local/api/v1/", Duration::from_secs(1)).unwrap();

        let url = client.endpoint(&["transactions", "17/42 x"]).unwrap();
        assert_eq!(url.as_str(), "http://backend.local/api/v1/transactions/17%2F42%20x");

        let last = client.endpoint(&["transactions", "last"]).unwrap();
        assert_eq!(last.path(), "/api/v1/transactions/last");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(BackendTransactionClient::new("mailto:ops@example.com", Duration::from_secs(1)).is_err());
        assert!(BackendTransactionClient::new("not a url", Duration::from_secs(1)).is_err());
    }
}
