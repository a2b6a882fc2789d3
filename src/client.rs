use crate::errors::ClientError;
use crate::models::{HistorySeries, TodaySnapshot};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const TODAY_PATH: &str = "/api/today";
pub const HISTORY_PATH: &str = "/api/history";

#[async_trait]
pub trait CounterSource: Send + Sync {
    async fn today(&self) -> Result<TodaySnapshot, ClientError>;
    async fn history(&self) -> Result<HistorySeries, ClientError>;
}

pub struct HttpCounterSource {
    client: Client,
    base_url: String,
}

impl HttpCounterSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::transport(base_url, err))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| ClientError::transport(&url, err))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| ClientError::transport(&url, err))?;
        debug!(%url, bytes = body.len(), "fetched");

        serde_json::from_slice(&body).map_err(|err| ClientError::parse(&url, err))
    }
}

#[async_trait]
impl CounterSource for HttpCounterSource {
    async fn today(&self) -> Result<TodaySnapshot, ClientError> {
        self.get_json(TODAY_PATH).await
    }

    async fn history(&self) -> Result<HistorySeries, ClientError> {
        self.get_json(HISTORY_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    async fn serve_counter_stub() -> String {
        let app = Router::new()
            .route("/healthy/api/today", get(|| async { Json(json!({"count": 5, "right_count": 2})) }))
            .route(
                "/healthy/api/history",
                get(|| async {
                    Json(json!([
                        {"day": "2026-10-18", "count": 3, "right_count": 1},
                        {"day": "2026-10-17", "count": 2, "right_count": 0}
                    ]))
                }),
            )
            .route("/garbage/api/today", get(|| async { "<html>not json</html>" }))
            .route(
                "/failing/api/history",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route(
                "/negative/api/today",
                get(|| async { Json(json!({"count": -1, "right_count": 0})) }),
            )
            .route(
                "/duplicate/api/history",
                get(|| async {
                    Json(json!([
                        {"day": "2026-10-18", "count": 3, "right_count": 1},
                        {"day": "2026-10-18", "count": 4, "right_count": 1}
                    ]))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn source(base: &str, prefix: &str) -> HttpCounterSource {
        HttpCounterSource::new(&format!("{base}/{prefix}/"), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn fetches_today_and_history() {
        let base = serve_counter_stub().await;
        let source = source(&base, "healthy");

        let today = source.today().await.unwrap();
        assert_eq!(
            today,
            TodaySnapshot {
                count: 5,
                right_count: 2
            }
        );

        let history = source.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().count, 3);
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_error() {
        let base = serve_counter_stub().await;
        let err = source(&base, "garbage").today().await.unwrap_err();
        match err {
            ClientError::Parse { url, .. } => assert_eq!(url, format!("{base}/garbage{TODAY_PATH}")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_status_is_a_transport_error() {
        let base = serve_counter_stub().await;
        let err = source(&base, "failing").history().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn negative_count_is_a_parse_error() {
        let base = serve_counter_stub().await;
        let err = source(&base, "negative").today().await.unwrap_err();
        assert!(matches!(err, ClientError::Parse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn duplicate_history_day_is_a_parse_error() {
        let base = serve_counter_stub().await;
        let err = source(&base, "duplicate").history().await.unwrap_err();
        assert!(matches!(err, ClientError::Parse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpCounterSource::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = source.today().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }), "{err:?}");
    }
}
