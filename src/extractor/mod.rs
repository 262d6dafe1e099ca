//! Extractor module - the seam between HTTP plumbing and the media probe

pub mod link;
pub mod probe;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ExtractorConfig;

pub use probe::YtProbe;
pub use types::{
    ChannelInfo, Comment, DownloadOptions, DownloadRequest, DownloadResult, FormatInfo,
    PlaylistInfo, RelatedVideo, SearchFilters, SearchOrder, TranscriptSegment, VideoInfo,
    VideoSummary,
};

pub type Result<T> = std::result::Result<T, ExtractorError>;

/// Failures reported by the media probe or its supervision
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("failed to launch probe '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// Probe exited non-zero; carries its (normalized) stderr message
    #[error("{0}")]
    Probe(String),

    #[error("failed to parse probe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("probe timed out after {0} seconds")]
    Timeout(u64),

    #[error("probe produced no output")]
    EmptyOutput,

    #[error("unsupported link: {0}")]
    UnsupportedLink(String),

    #[error("{0}")]
    InvalidFilename(String),
}

/// Interface to the external media-extraction engine.
///
/// One method per gateway operation; every call is request-scoped and the
/// payload is discarded once the response is sent.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    async fn search_videos(&self, query: &str, filters: &SearchFilters)
        -> Result<Vec<VideoSummary>>;

    async fn home_feed(&self, region: &str) -> Result<Vec<VideoSummary>>;

    async fn video_info(&self, video_id: &str) -> Result<VideoInfo>;

    async fn channel_info(&self, channel_link: &str) -> Result<ChannelInfo>;

    async fn playlist_info(&self, playlist_link: &str) -> Result<PlaylistInfo>;

    async fn video_comments(&self, video_id: &str) -> Result<Vec<Comment>>;

    async fn video_transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>>;

    async fn related_videos(&self, video_id: &str) -> Result<Vec<RelatedVideo>>;

    async fn list_formats(&self, query: &str) -> Result<Vec<FormatInfo>>;

    async fn download_custom(&self, request: &DownloadRequest) -> Result<DownloadResult>;

    async fn download_lowest(
        &self,
        video_url: &str,
        options: &DownloadOptions,
    ) -> Result<DownloadResult>;

    async fn probe_version(&self) -> Result<String>;
}

/// Build the production extractor from configuration
pub fn create_extractor(config: &ExtractorConfig, download_dir: &str) -> Arc<dyn MediaExtractor> {
    Arc::new(YtProbe::new(config, download_dir))
}
