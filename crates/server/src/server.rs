//! Router assembly and server lifecycle.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use gurobi_classifier::{outcome::panic_message, Label};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handlers::{self, COMMAND_ROUTE, HEALTH_ROUTE, ROOT_ROUTE};
use crate::logging::{InvocationLogger, TracingInvocationLogger};

/// Shared, immutable router state.
#[derive(Clone)]
pub struct AppState {
    pub logger: Arc<dyn InvocationLogger>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(logger: Arc<dyn InvocationLogger>) -> Self {
        Self {
            logger,
            started_at: Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(TracingInvocationLogger))
    }
}

/// Build the complete router: routes, panic recovery, optional tracing and CORS.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    with_layers(routes(), state, config)
}

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route(ROOT_ROUTE, get(handlers::welcome))
        .route(HEALTH_ROUTE, get(handlers::health))
        .route(COMMAND_ROUTE, get(handlers::classify_command))
}

pub(crate) fn with_layers(
    router: Router<AppState>,
    state: AppState,
    config: &ServerConfig,
) -> Router {
    let logger = state.logger.clone();
    let mut router = router
        .layer(CatchPanicLayer::custom(move |payload: Box<dyn Any + Send>| {
            logger.fault("panic", &panic_message(payload.as_ref()));
            panic_response()
        }))
        .with_state(state);

    if config.enable_tracing {
        router = router.layer(TraceLayer::new_for_http());
    }

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

fn panic_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Label::Invalid.as_str(),
    )
        .into_response()
}

/// HTTP server for the classifier.
pub struct ClassifierServer {
    config: ServerConfig,
    logger: Arc<dyn InvocationLogger>,
}

impl ClassifierServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            logger: Arc::new(TracingInvocationLogger),
        }
    }

    /// Replace the invocation logger.
    pub fn with_logger(mut self, logger: Arc<dyn InvocationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn router(&self) -> Router {
        build_router(AppState::new(self.logger.clone()), &self.config)
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn start(&self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let port = listener
            .local_addr()
            .map(|a| a.port())
            .unwrap_or(self.config.port);
        tracing::info!("App running on port {}.", port);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::RecordingLogger;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tower::ServiceExt;

    fn quiet_config() -> ServerConfig {
        ServerConfig {
            enable_tracing: false,
            ..ServerConfig::default()
        }
    }

    async fn fetch(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn router_with(logger: Arc<RecordingLogger>) -> Router {
        build_router(AppState::new(logger), &quiet_config())
    }

    #[tokio::test]
    async fn root_says_welcome() {
        let logger = Arc::new(RecordingLogger::default());
        let (status, body) = fetch(router_with(logger.clone()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Welcome!");
        assert_eq!(logger.events(), vec!["invocation / -".to_string()]);
    }

    #[tokio::test]
    async fn classifies_valid_numbers() {
        let logger = Arc::new(RecordingLogger::default());
        let cases = [
            ("/30", "GUROBI"),
            ("/6", "GURO"),
            ("/20", "GUBI"),
            ("/15", "ROBI"),
            ("/2", "GU"),
            ("/3", "RO"),
            ("/5", "BI"),
            ("/7", "INVALID"),
        ];
        for (uri, expected) in cases {
            let (status, body) = fetch(router_with(logger.clone()), uri).await;
            assert_eq!(status, StatusCode::OK, "uri={uri}");
            assert_eq!(body, expected, "uri={uri}");
        }
    }

    #[tokio::test]
    async fn malformed_numbers_are_bad_requests() {
        let logger = Arc::new(RecordingLogger::default());
        for uri in ["/0", "/-5", "/007", "/abc", "/1.5", "/%2B5"] {
            let (status, body) = fetch(router_with(logger.clone()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "uri={uri}");
            assert_eq!(body, "INVALID", "uri={uri}");
        }
    }

    #[tokio::test]
    async fn undecodable_segment_is_a_bad_request() {
        let logger = Arc::new(RecordingLogger::default());
        let (status, body) = fetch(router_with(logger.clone()), "/%FF").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "INVALID");
    }

    #[tokio::test]
    async fn huge_numbers_are_classified_exactly() {
        let logger = Arc::new(RecordingLogger::default());
        let uri = format!("/3{}", "0".repeat(60));
        let (status, body) = fetch(router_with(logger), &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "GUROBI");
    }

    #[tokio::test]
    async fn command_route_reports_invocation_and_outcome() {
        let logger = Arc::new(RecordingLogger::default());
        fetch(router_with(logger.clone()), "/6").await;
        fetch(router_with(logger.clone()), "/abc").await;
        assert_eq!(
            logger.events(),
            vec![
                "invocation /:command 6".to_string(),
                "classified 6 ok GURO".to_string(),
                "invocation /:command abc".to_string(),
                "classified abc client_error INVALID".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn panics_become_server_errors() {
        async fn boom() -> &'static str {
            panic!("boom")
        }

        let logger = Arc::new(RecordingLogger::default());
        let router = routes().route("/debug/panic", get(boom));
        let router = with_layers(router, AppState::new(logger.clone()), &quiet_config());

        let (status, body) = fetch(router, "/debug/panic").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "INVALID");
        assert_eq!(logger.events(), vec!["fault panic boom".to_string()]);
    }

    #[tokio::test]
    async fn health_reports_version() {
        let logger = Arc::new(RecordingLogger::default());
        let (status, body) = fetch(router_with(logger), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        let health: crate::types::HealthResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn serves_over_tcp_until_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server = ClassifierServer::new(quiet_config())
            .with_logger(Arc::new(RecordingLogger::default()));
        let handle = tokio::spawn(async move {
            server
                .serve(listener, async {
                    let _ = rx.await;
                })
                .await
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /60 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        assert!(raw.starts_with("HTTP/1.1 200"), "response: {raw}");
        assert!(raw.ends_with("GUROBI"), "response: {raw}");

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
