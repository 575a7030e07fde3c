use std::path::Path;

use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{features, openapi::ApiDoc, state::AppState};

/// Full application router. The payload directory is served under `/data`.
pub fn app(state: AppState, data_dir: &Path) -> Router {
    Router::new()
        .merge(features::leaderboard::routes::routes())
        .nest("/auth", features::auth::routes::routes())
        .nest_service("/data", ServeDir::new(data_dir))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::test_support::{app_with_payload, payload_of_five, read_body};

    #[tokio::test]
    async fn test_serves_data_file() {
        let (app, _dir) = app_with_payload(payload_of_five()).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/data/leaderboard.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload: Value = serde_json::from_str(&read_body(response).await).unwrap();
        assert_eq!(payload["users"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_openapi_lists_routes() {
        let (app, _dir) = app_with_payload(payload_of_five()).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc: Value = serde_json::from_str(&read_body(response).await).unwrap();
        for path in ["/api/leaderboard", "/api/leaderboard/refresh", "/auth/start", "/auth/callback"] {
            assert!(doc["paths"].get(path).is_some(), "missing {path}");
        }
    }
}
