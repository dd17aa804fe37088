use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    middleware_layer::request_id::request_id,
    routes::{
        add_document::add_document_route::add_document,
        ask::ask_question_route::{ask_question, ask_question_no_refs},
        heartbeat::heartbeat_route::heartbeat,
    },
};

const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";

/// Base64 inflates uploads by a third; PDFs of a few tens of MB must fit.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

    let state = AppState::from_env().await.map_err(AppError::Startup)?;
    let app = router(Arc::new(state));

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(|source| AppError::Bind {
            addr: host_url.clone(),
            source,
        })?;
    info!("listening on {host_url}");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// All routes over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/heartbeat", get(heartbeat))
        .route("/ask_question", post(ask_question))
        .route("/ask_question_no_refs", post(ask_question_no_refs))
        .route("/add_document", post(add_document))
        .fallback(|| async { AppError::NotFound })
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            // Without a signal handler the server just runs until killed.
            error!("failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;

    use ai_llm_service::error_handler::AiLlmError;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use base64::{Engine, engine::general_purpose::STANDARD};
    use contextor::{CompletionBackend, Contextor, ContextorConfig, PromptTemplate};
    use doc_loader::LoaderRegistry;
    use rag_store::RagStore;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct FixedCompletion(&'static str);

    impl CompletionBackend for FixedCompletion {
        fn complete<'a>(
            &'a self,
            _prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>> {
            Box::pin(async move { Ok(self.0.to_string()) })
        }
    }

    struct DownCompletion;

    impl CompletionBackend for DownCompletion {
        fn complete<'a>(
            &'a self,
            _prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>> {
            Box::pin(async { Err(AiLlmError::Decode("missing generated_text".into())) })
        }
    }

    async fn app_with(completion: Arc<dyn CompletionBackend>) -> Router {
        let store = Arc::new(RagStore::in_memory(128).await.unwrap());
        let ctx = Contextor::new(
            &ContextorConfig::default(),
            store,
            PromptTemplate::parse("{references}\nQ: {query}\nA:").unwrap(),
            completion,
            LoaderRegistry::default(),
        );
        router(Arc::new(AppState::new(Arc::new(ctx))))
    }

    async fn app() -> Router {
        app_with(Arc::new(FixedCompletion("Sideways."))).await
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, req).await
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn add_doc(filename: &str, content: &[u8]) -> Value {
        json!({
            "headers": {"Content-Type": "application/json", "filename": filename},
            "body": STANDARD.encode(content),
            "isBase64Encoded": true
        })
    }

    #[tokio::test]
    async fn heartbeat_is_alive() {
        let app = app_with(Arc::new(DownCompletion)).await;
        let res = app
            .clone()
            .oneshot(Request::get("/heartbeat").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));

        let (_, body) = send(&app, Request::get("/heartbeat").body(Body::empty()).unwrap()).await;
        assert_eq!(body, json!({"statusCode": 200, "body": "Alive"}));
    }

    #[tokio::test]
    async fn add_then_ask_returns_references() {
        let app = app().await;
        let (status, body) =
            post_json(&app, "/add_document", add_doc("crabs.txt", b"Crabs walk sideways.")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["body"], "Added 1 chunks");

        let (status, body) = post_json(
            &app,
            "/ask_question",
            json!({"headers": {"k": "1"}, "body": "How do crabs walk?"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["body"], "Sideways.");
        let refs = body["references"].as_array().unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0]["source"], "crabs.txt");
        assert_eq!(refs[0]["page"], 1);
        assert_eq!(refs[0]["content"], "Crabs walk sideways.");
    }

    #[tokio::test]
    async fn ask_without_references_returns_empty_list() {
        let app = app().await;
        post_json(&app, "/add_document", add_doc("crabs.txt", b"Crabs walk sideways.")).await;

        let (status, body) = post_json(
            &app,
            "/ask_question_no_refs",
            json!({"headers": {}, "body": "How do crabs walk?"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["references"], json!([]));
    }

    #[tokio::test]
    async fn unsupported_extension_is_400() {
        let app = app().await;
        let (status, body) = post_json(&app, "/add_document", add_doc("table.csv", b"a,b")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["error"], "UNSUPPORTED_FILE_TYPE");
        assert!(body["message"].as_str().unwrap().contains("table.csv"));
    }

    #[tokio::test]
    async fn boundary_validation_failures_are_400() {
        let app = app().await;

        let (status, body) =
            post_json(&app, "/add_document", json!({"headers": {}, "body": "aGk="})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BAD_REQUEST");

        let (status, _) = post_json(
            &app,
            "/add_document",
            json!({"headers": {"filename": "a.txt"}, "body": "%%%"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(
            &app,
            "/ask_question",
            json!({"headers": {"k": "lots"}, "body": "q"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let req = Request::post("/ask_question")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);
    }

    #[tokio::test]
    async fn invalid_utf8_text_is_422() {
        let app = app().await;
        let (status, body) =
            post_json(&app, "/add_document", add_doc("bad.txt", &[0xff, 0xfe, 0x00])).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "LOAD_FAILURE");
    }

    #[tokio::test]
    async fn completion_failure_is_502() {
        let app = app_with(Arc::new(DownCompletion)).await;
        let (status, body) = post_json(
            &app,
            "/ask_question",
            json!({"headers": {}, "body": "anything"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "COMPLETION_FAILURE");
    }

    #[tokio::test]
    async fn unknown_route_is_404_json() {
        let app = app().await;
        let (status, body) =
            send(&app, Request::get("/nope").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
