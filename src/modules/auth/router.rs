use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_users, login_user, register_user};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/register", post(register_user))
        .route("/login", post(login_user))
}
