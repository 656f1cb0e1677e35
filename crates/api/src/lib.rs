//! HTTP API server for the NF-e issuing service.
//!
//! Exposes invoice issue, lookup, listing and cancellation over REST, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::InvoiceService;
use invoice_store::InvoiceRepository;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::invoices::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: InvoiceRepository + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/", get(routes::system::health))
        .route("/health", get(routes::system::health))
        .route(
            "/nfe",
            post(routes::invoices::create::<R>).get(routes::invoices::list::<R>),
        )
        .route("/nfe/{key}", get(routes::invoices::get::<R>))
        .route("/nfe/{key}/cancel", post(routes::invoices::cancel::<R>))
        .with_state(state)
        .merge(metrics_router)
        .fallback(routes::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around an invoice repository.
pub fn create_state<R: InvoiceRepository + 'static>(repository: R) -> Arc<AppState<R>> {
    Arc::new(AppState {
        invoice_service: InvoiceService::new(repository),
    })
}
