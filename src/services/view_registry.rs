// services/view_registry.rs
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::services::result_view::ResultView;

/// Views the browser can still poll or act on.
#[derive(Clone, Default)]
pub struct ViewRegistry {
    views: Arc<RwLock<HashMap<Uuid, ResultView>>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, view: ResultView) {
        self.views.write().await.insert(view.id(), view);
    }

    pub async fn get(&self, view_id: Uuid) -> Result<ResultView> {
        self.views
            .read()
            .await
            .get(&view_id)
            .cloned()
            .ok_or_else(|| AppError::ViewNotFound(view_id.to_string()))
    }

    /// Removes the view and tears it down so late lookups are dropped.
    pub async fn remove(&self, view_id: Uuid) -> Result<()> {
        let view = self
            .views
            .write()
            .await
            .remove(&view_id)
            .ok_or_else(|| AppError::ViewNotFound(view_id.to_string()))?;
        view.teardown();
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }

    /// Tears down every view older than `ttl`. Returns how many went away.
    pub async fn sweep(&self, ttl: Duration) -> usize {
        let mut views = self.views.write().await;
        let before = views.len();
        views.retain(|_, view| {
            let keep = view.age() < ttl;
            if !keep {
                view.teardown();
            }
            keep
        });
        before - views.len()
    }

    /// Sweeps every quarter TTL (at least once a second) until the process ends.
    pub fn spawn_sweeper(&self, ttl: Duration) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        let period = (ttl / 4).max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = registry.sweep(ttl).await;
                if removed > 0 {
                    info!("🧹 Swept {} expired payment result views", removed);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::callback::RawCallbackParams;
    use crate::models::session::SessionContext;
    use crate::models::transaction::TransactionRecord;
    use crate::services::result_view::ViewSettings;
    use crate::services::transaction_client::TransactionLookup;
    use async_trait::async_trait;

    struct EmptyLookup;

    #[async_trait]
    impl TransactionLookup for EmptyLookup {
        async fn transaction_by_id(&self, _: &str, _: &SessionContext) -> Result<Option<TransactionRecord>> {
            Ok(None)
        }

        async fn last_transaction(&self, _: &SessionContext) -> Result<Option<TransactionRecord>> {
            Ok(None)
        }
    }

    async fn callback_view() -> ResultView {
        ResultView::open(
            RawCallbackParams::parse("vnp_ResponseCode=00"),
            SessionContext::anonymous(),
            Arc::new(EmptyLookup),
            Arc::new(ViewSettings::default()),
        )
        .await
    }

    #[tokio::test(start_paused = true)]
    async fn remove_tears_down() {
        let registry = ViewRegistry::new();
        let view = callback_view().await;
        let id = view.id();
        registry.insert(view.clone()).await;

        assert!(registry.get(id).await.is_ok());
        registry.remove(id).await.unwrap();

        assert!(view.is_torn_down());
        assert!(matches!(registry.get(id).await, Err(AppError::ViewNotFound(_))));
        assert!(registry.remove(id).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_drops_only_expired_views() {
        let registry = ViewRegistry::new();
        let old = callback_view().await;
        registry.insert(old.clone()).await;

        tokio::time::advance(Duration::from_secs(600)).await;
        let fresh = callback_view().await;
        registry.insert(fresh.clone()).await;

        assert_eq!(registry.sweep(Duration::from_secs(300)).await, 1);
        assert_eq!(registry.len().await, 1);
        assert!(old.is_torn_down());
        assert!(!fresh.is_torn_down());
    }
}
