use axum::{Router, routing::get};

use super::controller::{create_loan, delete_loan, get_loan, get_loans, update_loan};
use crate::state::AppState;

pub fn init_library_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_loans).post(create_loan))
        .route("/{id}", get(get_loan).put(update_loan).delete(delete_loan))
}
