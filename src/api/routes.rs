//! HTTP route definitions

use crate::api::models::*;
use crate::api::{download_handlers, handlers, views};
use crate::extractor::{
    ChannelInfo, Comment, DownloadOptions, DownloadResult, FormatInfo, PlaylistInfo, RelatedVideo,
    TranscriptSegment, VideoInfo, VideoSummary,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ytdlx-gateway API",
        version = "0.1.0",
        description = "JSON gateway over the yt-dlx media probe: search, metadata, comments, transcripts, related videos, formats, and downloads.",
        license(name = "MIT"),
    ),
    paths(
        handlers::search,
        handlers::home_feed,
        handlers::video,
        handlers::channel,
        handlers::playlist,
        handlers::comments,
        handlers::transcript,
        handlers::related,
        handlers::formats,
        handlers::health_check,
        download_handlers::download_custom,
        download_handlers::download_lowest,
    ),
    components(schemas(
        VideoSummary,
        VideoInfo,
        ChannelInfo,
        PlaylistInfo,
        Comment,
        TranscriptSegment,
        RelatedVideo,
        FormatInfo,
        DownloadOptions,
        DownloadResult,
        DownloadBody,
        SearchResponse,
        HomeResponse,
        VideoResponse,
        ChannelResponse,
        PlaylistResponse,
        CommentsResponse,
        TranscriptResponse,
        RelatedResponse,
        FormatsResponse,
        DownloadResponse,
        ErrorBody,
        HealthResponse,
    )),
    tags(
        (name = "Search", description = "Search and trending endpoints"),
        (name = "Metadata", description = "Video, channel, and playlist metadata endpoints"),
        (name = "Download", description = "Media download endpoints"),
        (name = "Health", description = "Health and monitoring endpoints"),
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub async fn create_router(state: Arc<crate::AppState>) -> Router {
    let downloads_dir = {
        let config = state.settings.read().await;
        config.storage.base_path.clone()
    };

    let api_routes = Router::new()
        .route("/search", get(handlers::search))
        .route("/home", get(handlers::home_feed))
        .route("/video", get(handlers::video))
        .route("/channel", get(handlers::channel))
        .route("/playlist", get(handlers::playlist))
        .route("/comments", get(handlers::comments))
        .route("/transcript", get(handlers::transcript))
        .route("/related", get(handlers::related))
        .route("/formats", get(handlers::formats))
        .route("/download/custom", post(download_handlers::download_custom))
        .route("/download/lowest", post(download_handlers::download_lowest));

    let view_routes = Router::new()
        .route("/comments", get(views::comment_list))
        .route("/related", get(views::related_list));

    Router::new()
        // Health check endpoint (no envelope, always 200)
        .route("/health", get(handlers::health_check))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Completed downloads
        .nest_service(
            "/files",
            tower_http::services::ServeDir::new(downloads_dir),
        )
        // JSON API
        .nest("/api", api_routes)
        // Server-rendered list views
        .nest("/view", view_routes)
        .with_state(state)
        // Browser front-end lives on another origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
