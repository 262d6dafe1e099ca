//! Result models for the media probe
//!
//! These mirror the JSON documents the probe dumps on stdout. Fields the
//! probe may omit are defaulted so partial metadata never fails a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single entry from a search, trending, channel, or playlist listing
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct VideoSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "uploader")]
    pub channel: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, alias = "url")]
    pub webpage_url: Option<String>,
    /// YYYYMMDD as emitted by the probe
    #[serde(default)]
    pub upload_date: Option<String>,
}

/// Full metadata for a single video
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct VideoInfo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "uploader")]
    pub channel: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Channel metadata together with its (flat) video listing
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChannelInfo {
    #[serde(default, alias = "channel_id")]
    pub id: String,
    #[serde(default, alias = "channel", alias = "uploader")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "channel_follower_count")]
    pub subscriber_count: Option<u64>,
    #[serde(default, alias = "entries")]
    pub videos: Vec<VideoSummary>,
}

/// Playlist metadata together with its (flat) entries
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PlaylistInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default, alias = "entries")]
    pub videos: Vec<VideoSummary>,
}

/// A single comment on a video
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub like_count: Option<u64>,
    /// Unix timestamp of publication
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// "root" for top-level comments, otherwise the parent comment id
    #[serde(default)]
    pub parent: Option<String>,
}

/// One caption segment of a transcript
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TranscriptSegment {
    #[serde(default)]
    pub text: String,
    /// Segment start offset in seconds
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
}

/// A video recommended alongside another one
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RelatedVideo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "uploader")]
    pub channel: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// A downloadable format advertised by the probe
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct FormatInfo {
    #[serde(default)]
    pub format_id: String,
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub filesize: Option<u64>,
    /// Total bitrate in KBit/s
    #[serde(default)]
    pub tbr: Option<f64>,
    #[serde(default)]
    pub format_note: Option<String>,
}

/// Search post-processing knobs
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub min_views: Option<u64>,
    pub order: SearchOrder,
}

/// Ordering applied to search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    /// Keep the probe's own ranking
    #[default]
    Relevance,
    ViewCount,
    Date,
}

impl SearchOrder {
    /// Parse the query-string value; `None` means relevance.
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value {
            None => Some(SearchOrder::Relevance),
            Some("relevance") => Some(SearchOrder::Relevance),
            Some("viewCount") => Some(SearchOrder::ViewCount),
            Some("date") => Some(SearchOrder::Date),
            Some(_) => None,
        }
    }
}

impl SearchFilters {
    /// Apply the filter and ordering to a probe result listing.
    pub fn apply(&self, mut videos: Vec<VideoSummary>) -> Vec<VideoSummary> {
        if let Some(min) = self.min_views {
            videos.retain(|v| v.view_count.unwrap_or(0) >= min);
        }
        match self.order {
            SearchOrder::Relevance => {}
            SearchOrder::ViewCount => {
                videos.sort_by(|a, b| b.view_count.unwrap_or(0).cmp(&a.view_count.unwrap_or(0)));
            }
            SearchOrder::Date => {
                videos.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
            }
        }
        videos
    }
}

/// Options accepted by the download routes (arrives as a JSON string)
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadOptions {
    /// Drop the video stream and keep the best audio only
    #[serde(default)]
    pub audio_only: bool,
    /// Output filename stem; a uuid is used when absent
    #[serde(default)]
    pub filename: Option<String>,
    /// Ask the probe to embed metadata into the container
    #[serde(default)]
    pub embed_metadata: bool,
}

impl DownloadOptions {
    /// Reject filename stems that could escape the download directory or
    /// smuggle output-template directives into the probe invocation.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(name) = &self.filename {
            if name.trim().is_empty() {
                return Err("filename must not be blank".to_string());
            }
            if name.contains('/') || name.contains('\\') || name.contains("..") {
                return Err(format!("filename must not contain path segments: {name}"));
            }
            if name.contains('%') {
                return Err(format!("filename must not contain template directives: {name}"));
            }
        }
        Ok(())
    }
}

/// Fully validated download request handed to the extractor
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub video_url: String,
    /// Maximum video height, e.g. 720 for "720p"; `None` means best
    pub max_height: Option<u32>,
    pub options: DownloadOptions,
}

/// Outcome of a completed download
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DownloadResult {
    pub id: Uuid,
    pub source_url: String,
    pub file_path: String,
    /// Format selector handed to the probe
    pub format: String,
    pub size_bytes: Option<u64>,
    pub completed_at: DateTime<Utc>,
}
