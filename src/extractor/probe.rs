//! Subprocess client for the bundled yt-dlx probe
//!
//! The probe is invoked as `<binary> --ytprobe <args...>` and dumps JSON on
//! stdout: one document for single-target operations, one document per line
//! for flat listings. Stderr carries human-readable failure messages.

use async_trait::async_trait;
use parking_lot::RwLock;
use regex::Regex;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ExtractorConfig;
use crate::extractor::link;
use crate::extractor::types::*;
use crate::extractor::{ExtractorError, MediaExtractor, Result};

/// Production extractor backed by the probe binary
pub struct YtProbe {
    binary: String,
    timeout: Duration,
    proxy: Option<String>,
    search_limit: u32,
    extra_args: Vec<String>,
    download_dir: PathBuf,
    version: RwLock<Option<String>>,
}

impl YtProbe {
    pub fn new(config: &ExtractorConfig, download_dir: &str) -> Self {
        Self {
            binary: config.binary.clone(),
            timeout: config.timeout(),
            proxy: config.proxy.clone(),
            search_limit: config.search_limit,
            extra_args: config.extra_args.clone(),
            download_dir: PathBuf::from(download_dir),
            version: RwLock::new(None),
        }
    }

    /// Run one probe invocation and return its stdout, with the upstream
    /// tool name rewritten on both streams the way the bundled launcher
    /// does.
    async fn run(&self, args: &[String]) -> Result<String> {
        let mut command = Command::new(&self.binary);
        command.arg("--ytprobe");
        if let Some(proxy) = &self.proxy {
            command.arg("--proxy").arg(proxy);
        }
        command.args(&self.extra_args);
        command.args(args);
        command.kill_on_drop(true);

        debug!(binary = %self.binary, ?args, "invoking probe");

        let result = timeout(self.timeout, command.output())
            .await
            .map_err(|_| ExtractorError::Timeout(self.timeout.as_secs()))?;

        let output = result.map_err(|source| ExtractorError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;

        if !output.status.success() {
            let message = normalize_stderr(&output.stderr, &output.status.to_string());
            warn!(binary = %self.binary, status = %output.status, error = %message, "probe failed");
            return Err(ExtractorError::Probe(message));
        }

        Ok(rewrite_tool_name(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Run the probe and parse a single JSON document from stdout.
    async fn run_json(&self, args: &[String]) -> Result<Value> {
        let stdout = self.run(args).await?;
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            return Err(ExtractorError::EmptyOutput);
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    /// Run the probe and parse one JSON document per stdout line.
    async fn run_json_lines(&self, args: &[String]) -> Result<Vec<Value>> {
        let stdout = self.run(args).await?;
        let mut values = Vec::new();
        for line in stdout.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            values.push(serde_json::from_str(line)?);
        }
        Ok(values)
    }

    async fn dump_flat(&self, target: &str) -> Result<Vec<VideoSummary>> {
        let args = args(&["--dump-json", "--flat-playlist", "--skip-download", target]);
        let values = self.run_json_lines(&args).await?;
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(ExtractorError::from))
            .collect()
    }

    /// Pull a named array out of a dumped metadata object; a missing key
    /// means the probe had nothing to report, not a failure.
    fn take_array<T: serde::de::DeserializeOwned>(value: &Value, key: &str) -> Result<Vec<T>> {
        match value.get(key) {
            Some(array) => Ok(serde_json::from_value(array.clone())?),
            None => Ok(Vec::new()),
        }
    }

    async fn download(
        &self,
        video_url: &str,
        format: String,
        options: &DownloadOptions,
    ) -> Result<DownloadResult> {
        options.validate().map_err(ExtractorError::InvalidFilename)?;

        let id = Uuid::new_v4();
        let stem = options
            .filename
            .clone()
            .unwrap_or_else(|| id.to_string());
        let template = format!("{}/{}.%(ext)s", self.download_dir.display(), stem);

        let mut probe_args = vec![
            "-f".to_string(),
            format.clone(),
            "--no-playlist".to_string(),
            "-o".to_string(),
            template,
            "--print".to_string(),
            "after_move:filepath".to_string(),
        ];
        if options.embed_metadata {
            probe_args.push("--embed-metadata".to_string());
        }
        probe_args.push(video_url.to_string());

        let stdout = self.run(&probe_args).await?;
        let file_path = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or(ExtractorError::EmptyOutput)?
            .to_string();

        let size_bytes = tokio::fs::metadata(&file_path).await.ok().map(|m| m.len());

        Ok(DownloadResult {
            id,
            source_url: video_url.to_string(),
            file_path,
            format,
            size_bytes,
            completed_at: chrono::Utc::now(),
        })
    }
}

#[async_trait]
impl MediaExtractor for YtProbe {
    async fn search_videos(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<VideoSummary>> {
        let target = format!("ytsearch{}:{}", self.search_limit, query);
        let videos = self.dump_flat(&target).await?;
        Ok(filters.apply(videos))
    }

    async fn home_feed(&self, region: &str) -> Result<Vec<VideoSummary>> {
        let target = format!("https://www.youtube.com/feed/trending?gl={}", region);
        self.dump_flat(&target).await
    }

    async fn video_info(&self, video_id: &str) -> Result<VideoInfo> {
        let id = link::extract_video_id(video_id)?;
        let args = args(&["--dump-single-json", "--no-playlist", &link::watch_url(&id)]);
        let value = self.run_json(&args).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn channel_info(&self, channel_link: &str) -> Result<ChannelInfo> {
        let url = link::channel_url(channel_link);
        let args = args(&["--dump-single-json", "--flat-playlist", &url]);
        let value = self.run_json(&args).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn playlist_info(&self, playlist_link: &str) -> Result<PlaylistInfo> {
        let url = link::playlist_url(playlist_link);
        let args = args(&["--dump-single-json", "--flat-playlist", &url]);
        let value = self.run_json(&args).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn video_comments(&self, video_id: &str) -> Result<Vec<Comment>> {
        let id = link::extract_video_id(video_id)?;
        let args = args(&[
            "--dump-single-json",
            "--skip-download",
            "--write-comments",
            &link::watch_url(&id),
        ]);
        let value = self.run_json(&args).await?;
        Self::take_array(&value, "comments")
    }

    async fn video_transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        let id = link::extract_video_id(video_id)?;
        let args = args(&[
            "--dump-single-json",
            "--skip-download",
            "--include-transcript",
            &link::watch_url(&id),
        ]);
        let value = self.run_json(&args).await?;
        Self::take_array(&value, "transcript")
    }

    async fn related_videos(&self, video_id: &str) -> Result<Vec<RelatedVideo>> {
        let id = link::extract_video_id(video_id)?;
        let args = args(&[
            "--dump-single-json",
            "--skip-download",
            "--include-related",
            &link::watch_url(&id),
        ]);
        let value = self.run_json(&args).await?;
        Self::take_array(&value, "related_videos")
    }

    async fn list_formats(&self, query: &str) -> Result<Vec<FormatInfo>> {
        // Accept anything a user might paste: a link, an id, or free text
        let target = if let Ok(id) = link::extract_video_id(query) {
            link::watch_url(&id)
        } else if query.starts_with("http://") || query.starts_with("https://") {
            query.to_string()
        } else {
            format!("ytsearch1:{}", query)
        };
        let args = args(&["--dump-single-json", "--skip-download", &target]);
        let value = self.run_json(&args).await?;
        Self::take_array(&value, "formats")
    }

    async fn download_custom(&self, request: &DownloadRequest) -> Result<DownloadResult> {
        let format = if request.options.audio_only {
            "bestaudio/best".to_string()
        } else {
            match request.max_height {
                Some(h) => format!("bestvideo[height<={h}]+bestaudio/best[height<={h}]"),
                None => "bestvideo+bestaudio/best".to_string(),
            }
        };
        self.download(&request.video_url, format, &request.options)
            .await
    }

    async fn download_lowest(
        &self,
        video_url: &str,
        options: &DownloadOptions,
    ) -> Result<DownloadResult> {
        let format = if options.audio_only {
            "worstaudio/worst".to_string()
        } else {
            "worstvideo+worstaudio/worst".to_string()
        };
        self.download(video_url, format, options).await
    }

    async fn probe_version(&self) -> Result<String> {
        if let Some(version) = self.version.read().clone() {
            return Ok(version);
        }

        let args = args(&["--version"]);
        let stdout = self.run(&args).await?;
        let version = stdout.trim().to_string();
        if version.is_empty() {
            return Err(ExtractorError::EmptyOutput);
        }

        *self.version.write() = Some(version.clone());
        Ok(version)
    }
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Rewrite any spelling of the upstream tool name to the project's own,
/// matching case-insensitively like the bundled launcher does.
fn rewrite_tool_name(text: &str) -> String {
    let dashed = Regex::new(r"(?i)yt-dlp").unwrap();
    let underscored = Regex::new(r"(?i)yt_dlp").unwrap();
    underscored
        .replace_all(&dashed.replace_all(text, "yt-dlx"), "yt_dlx")
        .into_owned()
}

/// Surface the probe's stderr with the upstream tool name rewritten.
fn normalize_stderr(stderr: &[u8], status: &str) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.is_empty() {
        return format!("probe exited with {}", status);
    }
    rewrite_tool_name(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_rewrites_upstream_name() {
        let message = normalize_stderr(b"ERROR: yt-dlp could not extract", "exit status: 1");
        assert_eq!(message, "ERROR: yt-dlx could not extract");
    }

    #[test]
    fn rewrite_ignores_case_and_separator() {
        assert_eq!(rewrite_tool_name("YT-DLP failed"), "yt-dlx failed");
        assert_eq!(rewrite_tool_name("module Yt_Dlp missing"), "module yt_dlx missing");
        assert_eq!(
            rewrite_tool_name("yt-dlp and YT-DLP and yt_dlp"),
            "yt-dlx and yt-dlx and yt_dlx"
        );
    }

    #[test]
    fn empty_stderr_reports_exit_status() {
        let message = normalize_stderr(b"", "exit status: 1");
        assert_eq!(message, "probe exited with exit status: 1");
    }
}
