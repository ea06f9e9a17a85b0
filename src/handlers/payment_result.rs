// handlers/payment_result.rs
use axum::{
    extract::{Json, Path, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use tracing::info;
use uuid::Uuid;

use crate::dtos::payment_result_dtos::OrderLookupRequest;
use crate::errors::Result;
use crate::models::callback::RawCallbackParams;
use crate::models::session::SessionContext;
use crate::services::reconciler::LookupTarget;
use crate::services::result_view::{ResultView, ViewPhase, ViewSnapshot};
use crate::state::AppState;

/// Landing point of the gateway redirect. Opens a view and picks the
/// acquisition path from the query string.
pub async fn open_view(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    let params = RawCallbackParams::parse(query.as_deref().unwrap_or_default());

    let view = ResultView::open(
        params,
        session,
        state.transactions.clone(),
        state.view_settings.clone(),
    )
    .await;
    state.views.insert(view.clone()).await;

    Ok(snapshot_response(view.snapshot().await))
}

pub async fn get_view(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let view = state.views.get(view_id).await?;
    Ok(snapshot_response(view.snapshot().await))
}

pub async fn check_last_transaction(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let view = state.views.get(view_id).await?;
    view.check(LookupTarget::Last).await?;
    Ok(snapshot_response(view.snapshot().await))
}

pub async fn check_order(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Json(request): Json<OrderLookupRequest>,
) -> Result<impl IntoResponse> {
    let order_id = request.order_id()?;
    let view = state.views.get(view_id).await?;

    info!("Manual order check on view {}: {}", view_id, order_id);
    view.check(LookupTarget::Order(order_id)).await?;
    Ok(snapshot_response(view.snapshot().await))
}

pub async fn close_view(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.views.remove(view_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "view_id": view_id,
    })))
}

fn snapshot_response(snapshot: ViewSnapshot) -> (StatusCode, Json<ViewSnapshot>) {
    let status = match snapshot.phase {
        ViewPhase::Resolved => StatusCode::OK,
        ViewPhase::AwaitingAction | ViewPhase::Checking => StatusCode::ACCEPTED,
    };
    (status, Json(snapshot))
}
