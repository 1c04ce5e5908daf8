use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::header::CONTENT_TYPE,
    http::Method,
    routing::get,
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    app::{errors::DefaultApiError, models::api_error::ApiError},
    posts::store::PostStore,
};

pub mod app;
pub mod client;
pub mod posts;

pub struct AppState {
    pub store: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }
}

/// Routes plus CORS and request tracing. Rate limiting is added separately by
/// [`with_rate_limit`] so tests can drive the bare router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET, Method::PATCH, Method::DELETE]);

    Router::new()
        .route("/", get(app::controller::get_root))
        // posts
        .route(
            "/api/route",
            get(posts::controller::get_posts).post(posts::controller::create_post),
        )
        .route(
            "/api/route/:id",
            get(posts::controller::get_post_by_id)
                .patch(posts::controller::edit_post_by_id)
                .delete(posts::controller::delete_post_by_id),
        )
        // layers
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Puts the whole router behind one buffer and one rate limiter, so the limit
/// is shared by every route and method.
pub fn with_rate_limit(router: Router, per_second: u64) -> Router {
    let limited = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_limiter_error))
        .layer(BufferLayer::new(1024))
        .layer(RateLimitLayer::new(per_second, Duration::from_secs(1)))
        .service(router);

    Router::new().fallback_service(limited)
}

async fn handle_limiter_error(err: BoxError) -> ApiError {
    tracing::warn!(%err, "request rejected by rate limiter");
    DefaultApiError::Overloaded.value()
}
