use axum::{Router, routing::get};

use super::controller::{create_fees, delete_fees, get_fees, get_fees_history, update_fees};
use crate::state::AppState;

pub fn init_fees_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_fees_history).post(create_fees))
        .route("/{id}", get(get_fees).put(update_fees).delete(delete_fees))
}
