use crate::handlers::{
    counties::search_counties, health::health_check, industries::get_industries, trend::get_trend,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let data_files = ServeDir::new(&state.data_dir);
    let web_files = ServeDir::new(&state.web_dir);

    let router = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Catalogue and search
        .route("/api/v1/industries", get(get_industries))
        .route("/api/v1/counties/search", get(search_counties))
        // Analysis
        .route(
            "/api/v1/counties/:fips/industries/:code/trend",
            get(get_trend),
        )
        // Static tables, fetched directly by the frontend
        .nest_service("/data", data_files)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let router = with_metrics(router);

    router
        // Frontend bundle
        .fallback_service(web_files)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Prometheus request metrics under `/metrics`.
///
/// The recorder is process-global, so tests build routers without it.
#[cfg(not(test))]
fn with_metrics(router: Router<AppState>) -> Router<AppState> {
    use axum_prometheus::PrometheusMetricLayer;

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    router
        .route("/metrics", get(move || async move { metric_handle.render() }))
        .layer(prometheus_layer)
}

#[cfg(test)]
fn with_metrics(router: Router<AppState>) -> Router<AppState> {
    router
}
