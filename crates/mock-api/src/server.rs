//! Router and handlers for the mock API

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::rate_limit::RateLimiter;
use crate::validate;

pub struct AppState {
    users_limit: RateLimiter,
    orders_limit: RateLimiter,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            users_limit: RateLimiter::new(10, Duration::from_secs(30)),
            orders_limit: RateLimiter::new(10, Duration::from_secs(60)),
        }
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(create_user))
        .route("/orders", post(create_order))
        .route("/products", post(create_product))
        .route("/profiles", post(create_profile))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(Arc::new(AppState::default()))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}

fn require_body(body: Option<Json<Value>>) -> Result<Value, Response> {
    match body {
        Some(Json(data)) if !data.is_null() => Ok(data),
        _ => Err(error_response(
            StatusCode::BAD_REQUEST,
            "Request body is required",
        )),
    }
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Response {
    let data = match require_body(body) {
        Ok(data) => data,
        Err(response) => return response,
    };

    if !state.users_limit.check("/users:default") {
        return error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded: maximum 10 requests per 30 seconds for user creation",
        );
    }

    match validate::create_user(&data) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(message) => error_response(StatusCode::BAD_REQUEST, &message),
    }
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Response {
    let data = match require_body(body) {
        Ok(data) => data,
        Err(response) => return response,
    };

    if !state.orders_limit.check("/orders:default") {
        return error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded: maximum 10 orders per minute",
        );
    }

    match validate::create_order(&data) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(message) => error_response(StatusCode::BAD_REQUEST, &message),
    }
}

async fn create_product(body: Option<Json<Value>>) -> Response {
    let data = match require_body(body) {
        Ok(data) => data,
        Err(response) => return response,
    };

    match validate::create_product(&data) {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(message) => error_response(StatusCode::BAD_REQUEST, &message),
    }
}

async fn create_profile(body: Option<Json<Value>>) -> Response {
    let data = match require_body(body) {
        Ok(data) => data,
        Err(response) => return response,
    };

    match validate::create_profile(&data) {
        Ok(profile) => (StatusCode::CREATED, Json(profile)).into_response(),
        Err(message) => error_response(StatusCode::BAD_REQUEST, &message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = router();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn user_creation_round_trip() {
        let app = router();
        let response = app
            .oneshot(post_json(
                "/users",
                r#"{"name": "John Doe", "username": "johndoe", "email": "john@example.com"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let user = body_json(response).await;
        assert_eq!(user["id"], 123);
        assert_eq!(user["username"], "johndoe");
    }

    #[tokio::test]
    async fn validation_failure_is_a_400_with_an_error_message() {
        let app = router();
        let response = app
            .oneshot(post_json(
                "/users",
                r#"{"name": "John Doe", "username": "johndoe"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "Either email or phone must be provided as contact method"
        );
    }

    #[tokio::test]
    async fn missing_body_is_a_400() {
        let app = router();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/profiles")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Request body is required");
    }

    #[tokio::test]
    async fn eleventh_user_request_in_the_window_is_rate_limited() {
        let app = router();
        let payload =
            r#"{"name": "John Doe", "username": "johndoe", "email": "john@example.com"}"#;

        for _ in 0..10 {
            let response = app.clone().oneshot(post_json("/users", payload)).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app.oneshot(post_json("/users", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
