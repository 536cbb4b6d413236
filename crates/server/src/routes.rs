//! HTTP routes.
//!
//! `POST /api/summarize` fetches (when given a URL), runs the pipeline, then
//! writes the result to both stores. The response always carries the computed
//! record; each store's outcome is reported separately.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tersa_core::{FetchConfig, Pipeline, SourceText, SummaryRecord, fetch_article};
use time::OffsetDateTime;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::{ArchiveStore, ArchivedSource, StoredSummary, SummaryStore};

/// Shared handler state.
pub struct AppState {
    pub pipeline: Pipeline,
    pub fetch: FetchConfig,
    /// `None` when the summaries store is switched off.
    pub summaries: Option<Arc<dyn SummaryStore>>,
    /// `None` when the archive is switched off.
    pub archive: Option<Arc<dyn ArchiveStore>>,
}

/// Body of `POST /api/summarize`.
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeRequest {
    pub url: Option<String>,
    pub text: Option<String>,
    pub title: Option<String>,
}

/// Outcome of one storage write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStatus {
    Ok,
    Failed,
    Disabled,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageReport {
    pub summaries: StorageStatus,
    pub archive: StorageStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub record: SummaryRecord,
    pub storage: StorageReport,
}

/// Builds the application router with its middleware stack.
pub fn router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/summarize", post(summarize))
        .route("/api/summary/{id}", get(get_summary))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn summarize(
    State(state): State<Arc<AppState>>, body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(request) = body?;
    let source = resolve_source(&state, request).await?;
    let record = state.pipeline.process(source)?;

    let id = Uuid::new_v4();
    let created_at = OffsetDateTime::now_utc();
    tracing::info!(%id, words = record.word_count, url = record.source_url.as_deref(), "summarized");

    let (summaries, archive) = tokio::join!(
        save_summary(state.summaries.as_deref(), StoredSummary::from_record(id, created_at, &record)),
        save_archive(state.archive.as_deref(), ArchivedSource::from_record(id, created_at, &record)),
    );

    Ok(Json(SummarizeResponse { id, created_at, record, storage: StorageReport { summaries, archive } }))
}

/// Turns the request into pipeline input, fetching the page when a URL is given.
async fn resolve_source(state: &AppState, request: SummarizeRequest) -> Result<SourceText, ApiError> {
    let url = request.url.filter(|u| !u.trim().is_empty());
    let text = request.text.filter(|t| !t.trim().is_empty());

    match (url, text) {
        (Some(url), _) => {
            let article = fetch_article(url.trim(), &state.fetch).await?;
            Ok(SourceText::new(article.text).with_title(article.title).with_url(url.trim()))
        }
        (None, Some(text)) => {
            let source = SourceText::new(text);
            Ok(match request.title {
                Some(title) => source.with_title(title),
                None => source,
            })
        }
        (None, None) => Err(ApiError::MissingInput),
    }
}

async fn save_summary(store: Option<&dyn SummaryStore>, summary: StoredSummary) -> StorageStatus {
    let Some(store) = store else {
        return StorageStatus::Disabled;
    };
    match store.insert(&summary).await {
        Ok(()) => StorageStatus::Ok,
        Err(e) => {
            tracing::warn!(backend = store.name(), id = %summary.id, error = %e, "failed to save summary");
            StorageStatus::Failed
        }
    }
}

async fn save_archive(store: Option<&dyn ArchiveStore>, source: ArchivedSource) -> StorageStatus {
    let Some(store) = store else {
        return StorageStatus::Disabled;
    };
    match store.archive(&source).await {
        Ok(()) => StorageStatus::Ok,
        Err(e) => {
            tracing::warn!(backend = store.name(), key = %source.key, error = %e, "failed to archive source");
            StorageStatus::Failed
        }
    }
}

async fn get_summary(
    State(state): State<Arc<AppState>>, Path(id): Path<Uuid>,
) -> Result<Json<StoredSummary>, ApiError> {
    let store = state.summaries.as_deref().ok_or(ApiError::NotFound)?;
    store.get(id).await?.map(Json).ok_or(ApiError::NotFound)
}
