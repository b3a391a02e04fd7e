//! HTTP surface: the read API the reader pages through, the book list, a
//! health probe and the server-rendered reading page.

use crate::data_source::VerseDataSource;
use crate::loader::{book_summaries, chapter_response, load_page_context};
use crate::page::{render_empty_page, render_page};
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chouraqui_core::links::{EntryParams, parse_positive};
use chouraqui_core::wire::{BookSummary, ChapterResponse, ErrorResponse};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info};

type SharedSource = Arc<VerseDataSource>;

pub async fn serve(source: VerseDataSource, bind_addr: &str) -> Result<()> {
    let addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {bind_addr:?}"))?;
    let router = build_router(Arc::new(source));
    info!(%addr, "Binding HTTP listener");
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("HTTP server exited");
    Ok(())
}

#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(err: anyhow::Error) -> Self {
        error!("Request failed: {err:#}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

pub(crate) fn build_router(source: SharedSource) -> Router {
    Router::new()
        .route("/", get(reading_page))
        .route("/api/verses", get(api_verses))
        .route("/api/books", get(api_books))
        .route("/healthz", get(health))
        .with_state(source)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Run a storage call off the async workers.
async fn with_source<T, F>(source: SharedSource, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&VerseDataSource) -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&source))
        .await
        .context("Storage task panicked")
        .and_then(|result| result)
        .map_err(ApiError::internal)
}

#[derive(Debug, Deserialize)]
struct VersesParams {
    book: Option<String>,
    chapter: Option<String>,
}

async fn api_verses(
    State(source): State<SharedSource>,
    Query(params): Query<VersesParams>,
) -> Result<Json<ChapterResponse>, ApiError> {
    let (Some(book), Some(chapter)) = (
        parse_positive(params.book.as_deref()),
        parse_positive(params.chapter.as_deref()),
    ) else {
        return Err(ApiError::bad_request("Missing parameters"));
    };
    let response = with_source(source, move |source| chapter_response(source, book, chapter)).await?;
    Ok(Json(response))
}

async fn api_books(
    State(source): State<SharedSource>,
) -> Result<Json<Vec<BookSummary>>, ApiError> {
    with_source(source, book_summaries).await.map(Json)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "chouraqui-reader" }))
}

async fn reading_page(
    State(source): State<SharedSource>,
    Query(params): Query<EntryParams>,
) -> Result<Html<String>, ApiError> {
    let context = with_source(source, move |source| load_page_context(source, &params)).await?;
    Ok(Html(match context {
        Some(context) => render_page(&context),
        None => render_empty_page(),
    }))
}
