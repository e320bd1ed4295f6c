use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::v1;

/// Builds the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/api/v1", v1::create_v1_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::cache::{CacheStore, MockCacheStore};
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::{PromptCatalog, ProviderConfig};
    use crate::infrastructure::cache::{FileCacheStore, InMemoryCacheStore};
    use crate::infrastructure::llm::ProviderRegistry;
    use crate::infrastructure::services::GenerationService;
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository, UserService};

    fn app_with(provider: MockLlmProvider) -> Router {
        app_from(provider, Arc::new(InMemoryCacheStore::new()))
    }

    fn app_from(provider: MockLlmProvider, cache: Arc<dyn CacheStore>) -> Router {
        let generation =
            GenerationService::new(Arc::new(provider), cache, PromptCatalog::builtin());
        let registry = ProviderRegistry::new(
            vec![ProviderConfig::new(
                "openai",
                "https://api.openai.com/v1/chat/completions",
                "key",
                "gpt-4o-mini",
            )],
            "openai",
        )
        .unwrap();
        let users = UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2Hasher::new()),
        );

        create_router(AppState::new(generation, registry, users))
    }

    fn app() -> Router {
        app_with(MockLlmProvider::replying("A wise old elf."))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    fn gandalf_request() -> Value {
        json!({
            "template": "character_description",
            "context": { "name": "Gandalf", "race": "elf", "class": "wizard", "level": 5 }
        })
    }

    #[tokio::test]
    async fn test_health_and_live() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, _) = send(&app, Method::GET, "/live", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_reports_cache_backend() {
        let (status, body) = send(&app(), Method::GET, "/ready", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"][0]["name"], "cache:memory");
        assert_eq!(body["checks"][0]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_degraded_when_cache_fails() {
        let app = app_from(
            MockLlmProvider::replying("x"),
            Arc::new(MockCacheStore::new().with_error("disk full")),
        );

        let (status, body) = send(&app, Method::GET, "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
    }

    #[tokio::test]
    async fn test_ready_degraded_when_cache_directory_unwritable() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let app = app_from(
            MockLlmProvider::replying("x"),
            Arc::new(FileCacheStore::new(blocker.path())),
        );

        let (status, body) = send(&app, Method::GET, "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"][0]["name"], "cache:file");
    }

    #[tokio::test]
    async fn test_ready_probe_leaves_no_entry_behind() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = app_from(
            MockLlmProvider::replying("x"),
            Arc::new(FileCacheStore::new(dir.path())),
        );

        let (_, body) = send(&app, Method::GET, "/ready", None).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_list_templates() {
        let (status, body) = send(&app(), Method::GET, "/api/v1/templates", None).await;

        assert_eq!(status, StatusCode::OK);
        let templates = body["templates"].as_array().unwrap();
        assert!(templates.contains(&json!("character_description")));
        assert!(templates.contains(&json!("potion_description")));
    }

    #[tokio::test]
    async fn test_generate_then_cache_hit() {
        let app = app();

        let (status, first) =
            send(&app, Method::POST, "/api/v1/generate", Some(gandalf_request())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["source"], "provider");
        assert_eq!(first["text"], "A wise old elf.");
        assert!(first.get("error").is_none());

        let (_, second) =
            send(&app, Method::POST, "/api/v1/generate", Some(gandalf_request())).await;
        assert_eq!(second["source"], "cache");
        assert_eq!(second["text"], "A wise old elf.");
    }

    #[tokio::test]
    async fn test_generate_falls_back_on_provider_failure() {
        let app = app_with(MockLlmProvider::failing(500));

        let (status, body) =
            send(&app, Method::POST, "/api/v1/generate", Some(gandalf_request())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert!(!body["text"].as_str().unwrap().is_empty());
        assert!(body["error"].as_str().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_generate_unknown_template_is_404() {
        let request = json!({ "template": "dragon_hoard", "context": {} });
        let (status, body) = send(&app(), Method::POST, "/api/v1/generate", Some(request)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found_error");
        assert_eq!(body["error"]["param"], "template");
    }

    #[tokio::test]
    async fn test_generate_unknown_provider_is_404() {
        let mut request = gandalf_request();
        request["provider"] = json!("nonexistent");

        let (status, body) = send(&app(), Method::POST, "/api/v1/generate", Some(request)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["param"], "provider");
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_json() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ nope"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_user_register_login_and_get() {
        let app = app();
        let credentials = json!({ "username": "bilbo", "password": "there-and-back" });

        let (status, created) =
            send(&app, Method::POST, "/api/v1/users", Some(credentials.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["username"], "bilbo");
        assert!(created.get("password_hash").is_none());

        let (status, logged_in) =
            send(&app, Method::POST, "/api/v1/users/login", Some(credentials)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(logged_in["last_login_at"].is_string());

        let id = created["id"].as_str().unwrap();
        let uri = format!("/api/v1/users/{}", id);
        let (status, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["username"], "bilbo");
    }

    #[tokio::test]
    async fn test_user_errors() {
        let app = app();
        let credentials = json!({ "username": "bilbo", "password": "there-and-back" });
        send(&app, Method::POST, "/api/v1/users", Some(credentials.clone())).await;

        let (status, _) = send(&app, Method::POST, "/api/v1/users", Some(credentials)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let wrong = json!({ "username": "bilbo", "password": "wrong-password" });
        let (status, body) = send(&app, Method::POST, "/api/v1/users/login", Some(wrong)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["type"], "authentication_error");

        let short = json!({ "username": "al", "password": "there-and-back" });
        let (status, _) = send(&app, Method::POST, "/api/v1/users", Some(short)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/v1/users/missing-user", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
