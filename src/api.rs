use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::metrics::Metrics;

async fn export_metrics(State(metrics): State<Metrics>) -> Response {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, Metrics::content_type())],
            body,
        )
            .into_response(),
        Err(err) => {
            log::error!("Failed to encode metrics: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to encode metrics").into_response()
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

/// Serves the metric snapshot to Prometheus scrapers.
pub struct APIServer {
    router: axum::Router,
}

impl APIServer {
    pub fn new(metrics: Metrics) -> Self {
        let router = axum::Router::new()
            .route("/metrics", get(export_metrics))
            .route("/healthz", get(healthz))
            .with_state(metrics);
        Self { router }
    }

    /// Binds the listening socket. Kept separate from [`APIServer::serve`] so that
    /// a bind failure can abort startup.
    pub async fn bind(addr: impl ToSocketAddrs) -> std::io::Result<TcpListener> {
        TcpListener::bind(addr).await
    }

    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        axum::serve(listener, self.router.into_make_service()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_path(server: &APIServer, path: &str) -> (StatusCode, Option<String>, String) {
        let response = server
            .router
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_owned());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_metrics_endpoint_serves_snapshot() {
        let metrics = Metrics::new().unwrap();
        metrics
            .ap_num_stations
            .with_label_values(&["wlan0"])
            .set(2.0);
        let server = APIServer::new(metrics);

        let (status, content_type, body) = get_path(&server, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/plain; version=0.0.4"));
        assert!(body.contains(r#"hostapd_ap_num_stations{interface="wlan0"} 2"#));
    }

    #[tokio::test]
    async fn test_metrics_endpoint_sees_later_updates() {
        let metrics = Metrics::new().unwrap();
        let server = APIServer::new(metrics.clone());

        metrics
            .sta_associations
            .with_label_values(&["wlan0", "11:22:33:44:55:66"])
            .inc();

        let (_, _, body) = get_path(&server, "/metrics").await;
        assert!(body.contains(
            r#"hostapd_sta_associations_total{interface="wlan0",mac="11:22:33:44:55:66"} 1"#
        ));
    }

    #[tokio::test]
    async fn test_healthz() {
        let server = APIServer::new(Metrics::new().unwrap());
        let (status, _, body) = get_path(&server, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let server = APIServer::new(Metrics::new().unwrap());
        let (status, _, _) = get_path(&server, "/export").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bind_and_serve() {
        let listener = APIServer::bind("127.0.0.1:0").await.unwrap();
        assert!(listener.local_addr().unwrap().port() > 0);
        let server = APIServer::new(Metrics::new().unwrap());
        let handle = tokio::spawn(server.serve(listener));
        assert!(!handle.is_finished());
        handle.abort();
    }
}
