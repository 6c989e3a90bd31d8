use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::{path::Path, sync::Arc};
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod session;
pub mod views;

pub use config::Config;
pub use services::AppState;

/// CSP middleware adds Content-Security-Policy header to all responses
async fn csp_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(
            "default-src 'self'; \
             script-src 'self'; \
             style-src 'self' 'unsafe-inline'; \
             img-src 'self' data:; \
             manifest-src 'self'; \
             worker-src 'self'",
        ),
    );
    response
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let static_dir = Path::new(&app_state.config.static_dir);
    let static_files = ServeDir::new(static_dir);
    // Root path so the worker's default scope is the whole site
    let service_worker = ServeFile::new(static_dir.join("js/sw.js"));

    Router::new()
        // Trainer pages
        .route("/", get(handlers::scenario::show_scenario))
        .route("/new", get(handlers::scenario::new_scenario))
        .route("/submit", post(handlers::scenario::submit_answers))
        // Operational endpoints
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(handlers::metrics_handler)
                .layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    handlers::metrics_auth_middleware,
                )),
        )
        .route_service(views::SERVICE_WORKER_PATH, service_worker)
        .nest_service("/static", static_files)
        .with_state(app_state)
        .layer(middleware::from_fn(csp_middleware))
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
