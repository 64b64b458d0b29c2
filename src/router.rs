use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::require_auth;
use crate::modules::auth::router::init_auth_router;
use crate::modules::fees::router::init_fees_router;
use crate::modules::library::router::init_library_router;
use crate::modules::students::router::init_students_router;
use crate::modules::user::router::init_user_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::get;
use axum::{Router, middleware};
use schooldesk_core::AppError;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub const API_WORKING: &str = "API is working...";
pub const RESOURCE_NOT_FOUND: &str = "Resource not found";

pub fn init_router(state: AppState) -> Router {
    let gate = || middleware::from_fn_with_state(state.clone(), require_auth);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/", get(|| async { API_WORKING }))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/user", init_user_router().route_layer(gate()))
                .nest("/users", init_users_router().route_layer(gate()))
                .nest("/student", init_students_router().route_layer(gate()))
                .nest("/fees", init_fees_router().route_layer(gate()))
                .nest("/library", init_library_router().route_layer(gate())),
        )
        .fallback(|| async { AppError::not_found(RESOURCE_NOT_FOUND) })
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config.allowed_origins))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
}
