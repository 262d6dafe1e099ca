//! Download route handlers

use crate::api::models::{require, DownloadBody, DownloadResponse, ErrorBody};
use crate::error::AppError;
use crate::extractor::{DownloadOptions, DownloadRequest};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::info;

/// Parse the body's `options` JSON string; malformed input or an unsafe
/// filename is a 400.
fn parse_options(options: Option<&str>) -> Result<DownloadOptions, AppError> {
    let options: DownloadOptions = match options {
        None => DownloadOptions::default(),
        Some(raw) if raw.trim().is_empty() => DownloadOptions::default(),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidRequest(format!("invalid options JSON: {}", e)))?,
    };
    options.validate().map_err(AppError::InvalidRequest)?;
    Ok(options)
}

/// Parse a "720p"-style resolution into a height cap.
fn parse_resolution(resolution: Option<&str>) -> Result<Option<u32>, AppError> {
    match resolution {
        None => Ok(None),
        Some(raw) => {
            let digits = raw.trim().trim_end_matches('p');
            digits
                .parse::<u32>()
                .map(Some)
                .map_err(|_| {
                    AppError::InvalidRequest(format!("invalid resolution '{}': expected e.g. 720p", raw))
                })
        }
    }
}

/// Download at a caller-chosen quality
#[utoipa::path(
    post,
    path = "/api/download/custom",
    tag = "Download",
    request_body = DownloadBody,
    responses(
        (status = 200, description = "Completed download", body = DownloadResponse),
        (status = 400, description = "Missing videoUrl or malformed options/resolution", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn download_custom(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DownloadBody>,
) -> Result<Json<DownloadResponse>, AppError> {
    let video_url = require(body.video_url, "videoUrl")?;
    let max_height = parse_resolution(body.resolution.as_deref())?;
    let options = parse_options(body.options.as_deref())?;

    info!(video_url = %video_url, ?max_height, "received custom download request");

    let request = DownloadRequest {
        video_url,
        max_height,
        options,
    };
    let result = state.extractor.download_custom(&request).await?;

    info!(file = %result.file_path, "download completed");

    Ok(Json(DownloadResponse { result }))
}

/// Download at the lowest available quality
#[utoipa::path(
    post,
    path = "/api/download/lowest",
    tag = "Download",
    request_body = DownloadBody,
    responses(
        (status = 200, description = "Completed download", body = DownloadResponse),
        (status = 400, description = "Missing videoUrl or malformed options", body = ErrorBody),
        (status = 500, description = "Extractor failure", body = ErrorBody),
    )
)]
pub async fn download_lowest(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DownloadBody>,
) -> Result<Json<DownloadResponse>, AppError> {
    let video_url = require(body.video_url, "videoUrl")?;
    let options = parse_options(body.options.as_deref())?;

    info!(video_url = %video_url, "received lowest-quality download request");

    let result = state.extractor.download_lowest(&video_url, &options).await?;

    info!(file = %result.file_path, "download completed");

    Ok(Json(DownloadResponse { result }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_when_absent() {
        let options = parse_options(None).unwrap();
        assert!(!options.audio_only);
    }

    #[test]
    fn options_parse_camel_case_fields() {
        let options = parse_options(Some(r#"{"audioOnly": true, "filename": "clip"}"#)).unwrap();
        assert!(options.audio_only);
        assert_eq!(options.filename.as_deref(), Some("clip"));
    }

    #[test]
    fn malformed_options_are_invalid_request() {
        let err = parse_options(Some("{not json")).unwrap_err();
        assert!(err.to_string().starts_with("invalid options JSON"));
    }

    #[test]
    fn path_escaping_filename_is_invalid_request() {
        let err = parse_options(Some(r#"{"filename": "../../etc/owned"}"#)).unwrap_err();
        assert!(err.to_string().contains("path segments"));

        let err = parse_options(Some(r#"{"filename": "%(title)s"}"#)).unwrap_err();
        assert!(err.to_string().contains("template directives"));
    }

    #[test]
    fn resolution_parses_with_and_without_suffix() {
        assert_eq!(parse_resolution(Some("720p")).unwrap(), Some(720));
        assert_eq!(parse_resolution(Some("1080")).unwrap(), Some(1080));
        assert_eq!(parse_resolution(None).unwrap(), None);
    }

    #[test]
    fn bad_resolution_is_invalid_request() {
        assert!(parse_resolution(Some("ultra")).is_err());
    }
}
