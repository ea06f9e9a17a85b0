// services/result_view.rs
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::callback::{RawCallbackParams, TXN_REF_KEY};
use crate::models::display::{DisplayModel, ResultPage};
use crate::models::session::SessionContext;
use crate::models::transaction::TransactionRecord;
use crate::services::reconciler::{self, LookupTarget};
use crate::services::result_page;
use crate::services::signature;
use crate::services::transaction_client::TransactionLookup;

#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub lookup_timeout: Duration,
    pub auto_check_delay: Duration,
    pub hash_secret: Option<String>,
    pub confirm_callback_with_record: bool,
    pub support_email: String,
}

impl From<&AppConfig> for ViewSettings {
    fn from(config: &AppConfig) -> Self {
        ViewSettings {
            lookup_timeout: config.lookup_timeout,
            auto_check_delay: config.auto_check_delay,
            hash_secret: config.vnpay_hash_secret.clone(),
            confirm_callback_with_record: config.confirm_callback_with_record,
            support_email: config.support_email.clone(),
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        ViewSettings::from(&AppConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewPhase {
    AwaitingAction,
    Checking,
    Resolved,
}

/// How the current result was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Callback,
    Record,
    NotFound,
    LookupFailed,
}

impl Resolution {
    /// Callback and record results never change; the other two invite a retry.
    pub fn is_final(self) -> bool {
        matches!(self, Resolution::Callback | Resolution::Record)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Applied,
    /// A newer lookup started before this one finished.
    Superseded,
    /// The view was torn down while the lookup was in flight.
    Discarded,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub view_id: Uuid,
    pub phase: ViewPhase,
    pub notice: Option<String>,
    pub auto_check_delay_ms: Option<u64>,
    pub can_check: bool,
    pub page: Option<ResultPage>,
    pub timestamp: String,
}

#[derive(Debug)]
struct ViewState {
    phase: ViewPhase,
    generation: u64,
    checking: Option<LookupTarget>,
    resolution: Option<Resolution>,
    display: Option<DisplayModel>,
    auto_check_pending: bool,
}

struct ViewInner {
    id: Uuid,
    opened_at: Instant,
    from_callback: bool,
    session: SessionContext,
    lookup: Arc<dyn TransactionLookup>,
    settings: Arc<ViewSettings>,
    state: RwLock<ViewState>,
    teardown: CancellationToken,
    auto_check: CancellationToken,
}

/// One visit of the payment result page.
///
/// The acquisition path is picked once, when the view opens. Lookups started
/// later are numbered; only the newest one may write its result, and nothing
/// is written after [`ResultView::teardown`].
#[derive(Clone)]
pub struct ResultView {
    inner: Arc<ViewInner>,
}

impl ResultView {
    pub async fn open(
        params: RawCallbackParams,
        session: SessionContext,
        lookup: Arc<dyn TransactionLookup>,
        settings: Arc<ViewSettings>,
    ) -> ResultView {
        let from_callback = params.has_callback();
        let teardown = CancellationToken::new();
        let auto_check = teardown.child_token();

        let view = ResultView {
            inner: Arc::new(ViewInner {
                id: Uuid::new_v4(),
                opened_at: Instant::now(),
                from_callback,
                session,
                lookup,
                settings,
                state: RwLock::new(ViewState {
                    phase: if from_callback { ViewPhase::Checking } else { ViewPhase::AwaitingAction },
                    generation: 0,
                    checking: None,
                    resolution: None,
                    display: None,
                    auto_check_pending: !from_callback,
                }),
                teardown,
                auto_check,
            }),
        };

        if from_callback {
            info!("📥 View {} opened with gateway callback ({} params)", view.id(), params.len());
            view.resolve_callback(&params).await;
        } else {
            info!(
                "📭 View {} opened without callback, auto check in {:?}",
                view.id(),
                view.inner.settings.auto_check_delay
            );
            view.schedule_auto_check();
        }

        view
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn age(&self) -> Duration {
        self.inner.opened_at.elapsed()
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.teardown.is_cancelled()
    }

    /// Cancels the pending auto check and discards any in-flight lookup.
    pub fn teardown(&self) {
        if !self.inner.teardown.is_cancelled() {
            debug!("View {} torn down", self.id());
            self.inner.teardown.cancel();
        }
    }

    /// User-triggered lookup. Cancels the pending auto check.
    pub async fn check(&self, target: LookupTarget) -> Result<LookupOutcome> {
        if self.inner.from_callback {
            return Err(AppError::ViewResolved(self.id().to_string()));
        }
        self.inner.auto_check.cancel();
        self.run_lookup(target).await
    }

    pub async fn display(&self) -> Option<DisplayModel> {
        self.inner.state.read().await.display.clone()
    }

    pub async fn phase(&self) -> ViewPhase {
        self.inner.state.read().await.phase
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        let state = self.inner.state.read().await;
        let settings = &self.inner.settings;

        ViewSnapshot {
            view_id: self.id(),
            phase: state.phase,
            notice: self.notice(&state),
            auto_check_delay_ms: state
                .auto_check_pending
                .then(|| u64::try_from(settings.auto_check_delay.as_millis()).unwrap_or(u64::MAX)),
            can_check: !self.inner.from_callback
                && state.phase != ViewPhase::Checking
                && !state.resolution.map_or(false, Resolution::is_final),
            page: state
                .display
                .as_ref()
                .map(|model| result_page::render(model, &settings.support_email)),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn notice(&self, state: &ViewState) -> Option<String> {
        match (state.phase, &state.checking) {
            (ViewPhase::AwaitingAction, _) => Some(
                "No payment information was found automatically. Check your most recent transaction or enter your order id."
                    .to_string(),
            ),
            (ViewPhase::Checking, _) if self.inner.from_callback => {
                Some("Processing payment result...".to_string())
            }
            (ViewPhase::Checking, Some(LookupTarget::Order(order_id))) => {
                Some(format!("Checking order {}...", order_id))
            }
            (ViewPhase::Checking, _) => Some("Checking your most recent transaction...".to_string()),
            (ViewPhase::Resolved, _) => None,
        }
    }

    fn schedule_auto_check(&self) {
        let view = self.clone();
        let token = self.inner.auto_check.clone();
        let delay = self.inner.settings.auto_check_delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Auto check for view {} cancelled", view.id());
                }
                _ = tokio::time::sleep(delay) => {
                    token.cancel();
                    info!("⏱️ No action on view {}, checking most recent transaction", view.id());
                    if let Err(e) = view.run_lookup(LookupTarget::Last).await {
                        debug!("Auto check for view {} skipped: {}", view.id(), e);
                    }
                }
            }
        });
    }

    async fn resolve_callback(&self, params: &RawCallbackParams) {
        let settings = Arc::clone(&self.inner.settings);
        let mut model = reconciler::from_callback(params);

        let mut trusted = true;
        if let Some(secret) = settings.hash_secret.as_deref() {
            let check = signature::verify(secret, params);
            if !check.is_valid() {
                warn!("⚠️ View {}: callback signature check failed ({:?})", self.id(), check);
                trusted = false;
            }
            model = reconciler::apply_signature_check(model, check);
        }

        // An unverified vnp_TxnRef could point at someone else's order.
        if trusted && settings.confirm_callback_with_record {
            if let Some(order_id) = params.value(TXN_REF_KEY) {
                let target = LookupTarget::Order(order_id.to_string());
                match self.bounded_lookup(&target).await {
                    None => return,
                    Some(Ok(Some(record))) => {
                        model = reconciler::confirm_with_record(model, &record);
                    }
                    Some(Ok(None)) => {
                        debug!("View {}: no backend record for {}", self.id(), target);
                    }
                    Some(Err(e)) => {
                        warn!("View {}: could not confirm {}: {}", self.id(), target, e);
                    }
                }
            }
        }

        self.apply(0, model, Resolution::Callback).await;
    }

    async fn run_lookup(&self, target: LookupTarget) -> Result<LookupOutcome> {
        let generation = {
            let mut state = self.inner.state.write().await;
            if self.is_torn_down() {
                return Ok(LookupOutcome::Discarded);
            }
            if state.resolution.map_or(false, Resolution::is_final) {
                return Err(AppError::ViewResolved(self.id().to_string()));
            }
            state.generation += 1;
            state.phase = ViewPhase::Checking;
            state.checking = Some(target.clone());
            state.auto_check_pending = false;
            state.generation
        };

        info!("🔎 View {}: checking {}", self.id(), target);
        let (model, resolution) = match self.bounded_lookup(&target).await {
            None => {
                debug!("View {}: result for {} dropped after teardown", self.id(), target);
                return Ok(LookupOutcome::Discarded);
            }
            Some(Ok(Some(record))) => (reconciler::from_record(&record), Resolution::Record),
            Some(Ok(None)) => (reconciler::not_found(&target), Resolution::NotFound),
            Some(Err(e)) => {
                warn!("View {}: lookup of {} failed: {}", self.id(), target, e);
                (reconciler::lookup_failed(&target), Resolution::LookupFailed)
            }
        };

        Ok(self.apply(generation, model, resolution).await)
    }

    /// `None` when the view is torn down first.
    async fn bounded_lookup(&self, target: &LookupTarget) -> Option<Result<Option<TransactionRecord>>> {
        let timeout = self.inner.settings.lookup_timeout;
        let lookup = self.inner.lookup.find(target, &self.inner.session);

        tokio::select! {
            _ = self.inner.teardown.cancelled() => None,
            result = tokio::time::timeout(timeout, lookup) => Some(
                result.unwrap_or_else(|_| Err(AppError::LookupTimeout(timeout.as_millis())))
            ),
        }
    }

    async fn apply(&self, generation: u64, model: DisplayModel, resolution: Resolution) -> LookupOutcome {
        let mut state = self.inner.state.write().await;
        if self.is_torn_down() {
            return LookupOutcome::Discarded;
        }
        if state.generation != generation {
            debug!(
                "View {}: result of lookup #{} superseded by #{}",
                self.id(),
                generation,
                state.generation
            );
            return LookupOutcome::Superseded;
        }

        info!(
            "✅ View {} resolved ({:?}, success: {})",
            self.id(),
            resolution,
            model.success
        );
        state.phase = ViewPhase::Resolved;
        state.checking = None;
        state.resolution = Some(resolution);
        state.display = Some(model);
        LookupOutcome::Applied
    }
}
