use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::result_view::ViewSettings;
use crate::services::transaction_client::{BackendTransactionClient, TransactionLookup};
use crate::services::view_registry::ViewRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub view_settings: Arc<ViewSettings>,
    pub transactions: Arc<dyn TransactionLookup>,
    pub views: ViewRegistry,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = BackendTransactionClient::new(&config.backend_base_url, config.lookup_timeout)?;
        Ok(AppState::with_lookup(config, Arc::new(client)))
    }

    pub fn with_lookup(config: AppConfig, transactions: Arc<dyn TransactionLookup>) -> Self {
        AppState {
            view_settings: Arc::new(ViewSettings::from(&config)),
            config: Arc::new(config),
            transactions,
            views: ViewRegistry::new(),
        }
    }
}
