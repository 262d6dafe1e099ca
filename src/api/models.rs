//! API request parameters and response envelopes
//!
//! Every successful response is `{"result": <payload>}`; failures are
//! `{"error": <message>}` (see [`crate::error::AppError`]).

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::extractor::{
    ChannelInfo, Comment, DownloadResult, FormatInfo, PlaylistInfo, RelatedVideo,
    TranscriptSegment, VideoInfo, VideoSummary,
};

/// Reject absent or blank required parameters with a 400.
pub fn require(value: Option<String>, name: &'static str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::MissingParam(name)),
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Search query text
    pub query: Option<String>,
    /// Drop results with fewer views
    pub min_views: Option<u64>,
    /// One of: relevance, viewCount, date
    pub order: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HomeParams {
    /// Two-letter region code, e.g. "US"
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VideoParams {
    /// Video id or any watch/short link
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ChannelParams {
    /// Channel URL, @handle, or channel id
    pub channel_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PlaylistParams {
    /// Playlist URL or playlist id
    pub playlist_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FormatsParams {
    /// Video link, id, or free-text search query
    pub query: Option<String>,
}

/// Body of the custom-quality download route.
///
/// `options` arrives as a JSON string, exactly as the browser sends it.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadBody {
    pub video_url: Option<String>,
    /// e.g. "720p"; omitted means best available
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub options: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub result: Vec<VideoSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    pub result: Vec<VideoSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub result: VideoInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChannelResponse {
    pub result: ChannelInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlaylistResponse {
    pub result: PlaylistInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentsResponse {
    pub result: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranscriptResponse {
    pub result: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RelatedResponse {
    pub result: Vec<RelatedVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormatsResponse {
    pub result: Vec<FormatInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DownloadResponse {
    pub result: DownloadResult,
}

/// Error envelope (400 and 500 responses)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Probe version string, absent when the probe is unreachable
    pub probe_version: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_and_blank() {
        assert!(require(None, "query").is_err());
        assert!(require(Some("   ".to_string()), "query").is_err());
    }

    #[test]
    fn require_trims_value() {
        let value = require(Some("  rust  ".to_string()), "query").unwrap();
        assert_eq!(value, "rust");
    }

    #[test]
    fn require_error_names_the_parameter() {
        let err = require(None, "videoId").unwrap_err();
        assert_eq!(err.to_string(), "missing required parameter: videoId");
    }
}
