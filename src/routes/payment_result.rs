use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::payment_result;
use crate::state::AppState;

pub fn payment_result_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(payment_result::open_view))
        .route(
            "/views/:view_id",
            get(payment_result::get_view).delete(payment_result::close_view),
        )
        .route("/views/:view_id/last", post(payment_result::check_last_transaction))
        .route("/views/:view_id/order", post(payment_result::check_order))
}
