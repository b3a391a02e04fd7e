//! Async client for the read API. One request per call; no retry, no cache.

use anyhow::{Context, Result};
use chouraqui_core::model::BookNumber;
use chouraqui_core::wire::{ChapterPayload, ChapterResponse};
use std::fmt;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    Timeout,
    Connect,
    Status(u16),
    Malformed,
    Transport,
}

impl fmt::Display for FetchFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailureKind::Timeout => write!(f, "timeout"),
            FetchFailureKind::Connect => write!(f, "connect"),
            FetchFailureKind::Status(code) => write!(f, "status {code}"),
            FetchFailureKind::Malformed => write!(f, "malformed payload"),
            FetchFailureKind::Transport => write!(f, "transport"),
        }
    }
}

/// Any reason a chapter fetch did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FetchFailureKind,
    pub message: String,
}

impl FetchFailure {
    fn new(kind: FetchFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchFailure {}

fn classify_reqwest_error(e: reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::new(FetchFailureKind::Timeout, format!("Request timed out: {e}"))
    } else if e.is_connect() {
        FetchFailure::new(FetchFailureKind::Connect, format!("Connection failed: {e}"))
    } else {
        FetchFailure::new(FetchFailureKind::Transport, format!("Network error: {e}"))
    }
}

#[derive(Debug, Clone)]
pub struct ChapterFetchClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChapterFetchClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_chapter(
        &self,
        book: BookNumber,
        chapter: u32,
    ) -> Result<ChapterPayload, FetchFailure> {
        let url = format!("{}/api/verses", self.base_url);
        debug!(book, chapter, %url, "Fetching chapter");
        let response = self
            .http
            .get(&url)
            .query(&[("book", book), ("chapter", chapter)])
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::new(
                FetchFailureKind::Status(status.as_u16()),
                format!("Read API answered {status} for {book} {chapter}"),
            ));
        }

        let bytes = response.bytes().await.map_err(classify_reqwest_error)?;
        let parsed: ChapterResponse = serde_json::from_slice(&bytes).map_err(|err| {
            FetchFailure::new(
                FetchFailureKind::Malformed,
                format!("Unexpected body for {book} {chapter}: {err}"),
            )
        })?;
        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_router;
    use crate::data_source::test_support::fixture_source;
    use axum::{Json, Router, routing::get};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base: &str) -> ChapterFetchClient {
        ChapterFetchClient::new(base, Duration::from_millis(500)).unwrap()
    }

    #[tokio::test]
    async fn fetches_both_languages() {
        let base = spawn(build_router(Arc::new(fixture_source("fetch-ok")))).await;
        let payload = client(&base).fetch_chapter(10, 2).await.unwrap();
        assert_eq!(payload.primary_verses.len(), 2);
        assert_eq!(payload.secondary_verses.len(), 2);
        assert_eq!(payload.max_chapter, Some(2));
        assert!(!payload.has_next_chapter);
    }

    #[tokio::test]
    async fn rejected_request_is_a_status_failure() {
        let base = spawn(build_router(Arc::new(fixture_source("fetch-400")))).await;
        let failure = client(&base).fetch_chapter(10, 0).await.unwrap_err();
        assert_eq!(failure.kind, FetchFailureKind::Status(400));
    }

    #[tokio::test]
    async fn body_without_verses_is_malformed() {
        let router = Router::new().route(
            "/api/verses",
            get(|| async { Json(json!({ "chapter": 1, "hasNextChapter": false })) }),
        );
        let base = spawn(router).await;
        let failure = client(&base).fetch_chapter(10, 1).await.unwrap_err();
        assert_eq!(failure.kind, FetchFailureKind::Malformed);
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let router = Router::new().route(
            "/api/verses",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({}))
            }),
        );
        let base = spawn(router).await;
        let failure = client(&base).fetch_chapter(10, 1).await.unwrap_err();
        assert_eq!(failure.kind, FetchFailureKind::Timeout);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_connect_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let failure = client(&format!("http://{addr}/"))
            .fetch_chapter(10, 1)
            .await
            .unwrap_err();
        assert_eq!(failure.kind, FetchFailureKind::Connect);
    }
}
