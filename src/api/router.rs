use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::catalog;
use super::health;
use super::state::AppState;

/// Router with the state-free probes only
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Full router: probes plus the catalog API under `/api/v1`
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/api/v1", catalog::create_catalog_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::cache::CacheFactory;
    use crate::infrastructure::catalog::{CatalogServices, ReadCacheSettings};
    use crate::infrastructure::storage::StorageFactory;

    #[tokio::test]
    async fn test_health_without_state() {
        let response = create_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_checks_store_and_cache() {
        let services = CatalogServices::new(
            StorageFactory::in_memory_catalog(),
            CacheFactory::new().create_in_memory(),
            ReadCacheSettings::default(),
        );
        let app = create_router_with_state(AppState::new(services));

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["checks"].as_array().unwrap().len(), 2);
    }
}
