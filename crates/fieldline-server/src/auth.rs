//! Simple API Key Authentication (Bearer Token)

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

/// API key guarding `/api/*`; `None` disables authentication
#[derive(Clone, Default)]
pub struct ApiKey(Option<Arc<str>>);

impl ApiKey {
    pub fn new(key: Option<String>) -> Self {
        Self(key.filter(|k| !k.is_empty()).map(Arc::from))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }
}

/// Authentication middleware
/// Validates Bearer token against the API key
pub async fn auth_middleware(
    State(api_key): State<ApiKey>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = api_key.0.as_deref() else {
        return Ok(next.run(request).await);
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header.map(|h| h.strip_prefix("Bearer ")) {
        Some(Some(token)) if token == expected => Ok(next.run(request).await),
        Some(Some(_)) => {
            tracing::warn!("Invalid API key attempted");
            Err(StatusCode::UNAUTHORIZED)
        }
        Some(None) => {
            tracing::warn!("Invalid Authorization header format");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("Missing Authorization header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app(key: Option<&str>) -> Router {
        Router::new()
            .route("/api/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn_with_state(
                ApiKey::new(key.map(str::to_string)),
                auth_middleware,
            ))
    }

    async fn status(app: Router, authorization: Option<&str>) -> StatusCode {
        let mut request = Request::builder().uri("/api/ping");
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        app.oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_key_passes() {
        assert_eq!(status(app(Some("k")), Some("Bearer k")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_or_missing_key_is_unauthorized() {
        assert_eq!(
            status(app(Some("k")), Some("Bearer nope")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status(app(Some("k")), Some("k")).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status(app(Some("k")), None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_no_key_disables_auth() {
        assert!(!ApiKey::new(Some(String::new())).is_enabled());
        assert_eq!(status(app(None), None).await, StatusCode::OK);
    }
}
