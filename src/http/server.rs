use crate::error::{ExporterError, Result};
use crate::metrics::registry::MetricsRegistry;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

#[derive(Clone)]
struct AppState {
    registry: Arc<MetricsRegistry>,
}

pub struct HttpServer {
    addr: SocketAddr,
    state: AppState,
}

impl HttpServer {
    pub fn new(host: &str, port: u16, registry: Arc<MetricsRegistry>) -> Result<Self> {
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| ExporterError::Http(format!("invalid listen address: {e}")))?;

        Ok(Self {
            addr,
            state: AppState { registry },
        })
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        let app = router(self.state);

        info!(addr = %self.addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| ExporterError::Http(e.to_string()))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                info!("HTTP server shutting down");
            })
            .await
            .map_err(|e| ExporterError::Http(e.to_string()))?;

        Ok(())
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/", get(root_handler))
        .with_state(state)
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let metrics = state.registry.render_prometheus();
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        metrics,
    )
        .into_response()
}

async fn health_handler(State(state): State<AppState>) -> Response {
    if state.registry.is_healthy() {
        (StatusCode::OK, "OK").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Unhealthy").into_response()
    }
}

async fn ready_handler(State(state): State<AppState>) -> Response {
    // Ready once at least one poll cycle has completed
    if state.registry.has_polled() {
        (StatusCode::OK, "Ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Not ready - no poll data").into_response()
    }
}

async fn root_handler() -> Response {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Group Lag Exporter</title></head>
<body>
<h1>Group Lag Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
<p><a href="/ready">Ready</a></p>
</body>
</html>"#;

    (
        StatusCode::OK,
        [("content-type", "text/html; charset=utf-8")],
        html,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn make_app() -> (Router, Arc<MetricsRegistry>) {
        let registry = Arc::new(MetricsRegistry::new());
        let app = router(AppState {
            registry: Arc::clone(&registry),
        });
        (app, registry)
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let (app, registry) = make_app();
        registry.set_lag("g1", 42.0);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );

        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("kafka_consumergroup_group_lag{group=\"g1\"} 42"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _registry) = make_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoint_unhealthy() {
        let (app, registry) = make_app();
        registry.set_healthy(false);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_ready_endpoint_not_ready_before_first_poll() {
        let (app, _registry) = make_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_ready_endpoint_after_poll() {
        let (app, registry) = make_app();
        registry.mark_polled();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let (app, _registry) = make_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
