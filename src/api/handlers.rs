//! Metadata route handlers
//!
//! Each handler validates its parameters, performs one extractor call, and
//! wraps the payload. Downstream failures propagate as-is through
//! [`AppError`] and surface as 500s with the probe's message.

use crate::api::models::*;
use crate::error::AppError;
use crate::extractor::{SearchFilters, SearchOrder};
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Search for videos
#[utoipa::path(
    get,
    path = "/api/search",
    tag = "Search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching video summaries", body = SearchResponse),
        (status = 400, description = "Missing or malformed parameter", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = require(params.query, "query")?;
    let order = SearchOrder::parse(params.order.as_deref()).ok_or_else(|| {
        AppError::InvalidRequest(format!(
            "invalid order '{}': expected relevance, viewCount, or date",
            params.order.unwrap_or_default()
        ))
    })?;
    let filters = SearchFilters {
        min_views: params.min_views,
        order,
    };

    info!(query = %query, "received search request");

    let result = state.extractor.search_videos(&query, &filters).await?;

    info!(query = %query, results = result.len(), "search completed");

    Ok(Json(SearchResponse { result }))
}

/// Trending feed for a region
#[utoipa::path(
    get,
    path = "/api/home",
    tag = "Search",
    params(HomeParams),
    responses(
        (status = 200, description = "Trending video summaries", body = HomeResponse),
        (status = 400, description = "Missing region", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn home_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HomeParams>,
) -> Result<Json<HomeResponse>, AppError> {
    let region = require(params.region, "region")?;

    info!(region = %region, "received home feed request");

    let result = state.extractor.home_feed(&region).await?;
    Ok(Json(HomeResponse { result }))
}

/// Full metadata for a video
#[utoipa::path(
    get,
    path = "/api/video",
    tag = "Metadata",
    params(VideoParams),
    responses(
        (status = 200, description = "Video metadata", body = VideoResponse),
        (status = 400, description = "Missing videoId", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn video(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoParams>,
) -> Result<Json<VideoResponse>, AppError> {
    let video_id = require(params.video_id, "videoId")?;

    info!(video_id = %video_id, "received video metadata request");

    let result = state.extractor.video_info(&video_id).await?;
    Ok(Json(VideoResponse { result }))
}

/// Channel metadata and uploads
#[utoipa::path(
    get,
    path = "/api/channel",
    tag = "Metadata",
    params(ChannelParams),
    responses(
        (status = 200, description = "Channel metadata", body = ChannelResponse),
        (status = 400, description = "Missing channelLink", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn channel(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChannelParams>,
) -> Result<Json<ChannelResponse>, AppError> {
    let channel_link = require(params.channel_link, "channelLink")?;

    info!(channel_link = %channel_link, "received channel request");

    let result = state.extractor.channel_info(&channel_link).await?;
    Ok(Json(ChannelResponse { result }))
}

/// Playlist metadata and entries
#[utoipa::path(
    get,
    path = "/api/playlist",
    tag = "Metadata",
    params(PlaylistParams),
    responses(
        (status = 200, description = "Playlist metadata", body = PlaylistResponse),
        (status = 400, description = "Missing playlistLink", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn playlist(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlaylistParams>,
) -> Result<Json<PlaylistResponse>, AppError> {
    let playlist_link = require(params.playlist_link, "playlistLink")?;

    info!(playlist_link = %playlist_link, "received playlist request");

    let result = state.extractor.playlist_info(&playlist_link).await?;
    Ok(Json(PlaylistResponse { result }))
}

/// Comments on a video
#[utoipa::path(
    get,
    path = "/api/comments",
    tag = "Metadata",
    params(VideoParams),
    responses(
        (status = 200, description = "Comment list", body = CommentsResponse),
        (status = 400, description = "Missing videoId", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn comments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoParams>,
) -> Result<Json<CommentsResponse>, AppError> {
    let video_id = require(params.video_id, "videoId")?;

    info!(video_id = %video_id, "received comments request");

    let result = state.extractor.video_comments(&video_id).await?;
    Ok(Json(CommentsResponse { result }))
}

/// Transcript of a video
#[utoipa::path(
    get,
    path = "/api/transcript",
    tag = "Metadata",
    params(VideoParams),
    responses(
        (status = 200, description = "Transcript segments", body = TranscriptResponse),
        (status = 400, description = "Missing videoId", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn transcript(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoParams>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let video_id = require(params.video_id, "videoId")?;

    info!(video_id = %video_id, "received transcript request");

    let result = state.extractor.video_transcript(&video_id).await?;
    Ok(Json(TranscriptResponse { result }))
}

/// Videos related to a video
#[utoipa::path(
    get,
    path = "/api/related",
    tag = "Metadata",
    params(VideoParams),
    responses(
        (status = 200, description = "Related video list", body = RelatedResponse),
        (status = 400, description = "Missing videoId", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn related(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoParams>,
) -> Result<Json<RelatedResponse>, AppError> {
    let video_id = require(params.video_id, "videoId")?;

    info!(video_id = %video_id, "received related videos request");

    let result = state.extractor.related_videos(&video_id).await?;
    Ok(Json(RelatedResponse { result }))
}

/// Formats available for a video
#[utoipa::path(
    get,
    path = "/api/formats",
    tag = "Metadata",
    params(FormatsParams),
    responses(
        (status = 200, description = "Available formats", body = FormatsResponse),
        (status = 400, description = "Missing query", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn formats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FormatsParams>,
) -> Result<Json<FormatsResponse>, AppError> {
    let query = require(params.query, "query")?;

    info!(query = %query, "received formats request");

    let result = state.extractor.list_formats(&query).await?;
    Ok(Json(FormatsResponse { result }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Gateway health", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let probe_version = state.extractor.probe_version().await.ok();

    Json(HealthResponse {
        status: if probe_version.is_some() {
            "healthy"
        } else {
            "degraded"
        }
        .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        probe_version,
        timestamp: Utc::now(),
    })
}
