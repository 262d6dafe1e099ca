//! Helpers for reducing user-supplied links to probe targets

use reqwest::Url;

use crate::extractor::ExtractorError;

/// Canonical watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Extract a video id from the forms users paste in.
///
/// Accepts watch URLs, short links, shorts links, and bare 11-character ids.
pub fn extract_video_id(input: &str) -> Result<String, ExtractorError> {
    let input = input.trim();

    if let Ok(url) = Url::parse(input) {
        if let Some(host) = url.host_str() {
            if host.contains("youtube.com") {
                // youtube.com/watch?v=VIDEO_ID
                if let Some(id) = url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.to_string())
                {
                    if !id.is_empty() {
                        return Ok(id);
                    }
                    return Err(ExtractorError::UnsupportedLink(input.to_string()));
                }
                // youtube.com/shorts/VIDEO_ID or /embed/VIDEO_ID
                let mut segments = url.path_segments().into_iter().flatten();
                if let Some(first) = segments.next() {
                    if first == "shorts" || first == "embed" {
                        if let Some(id) = segments.next() {
                            return Ok(id.to_string());
                        }
                    }
                }
            } else if host.contains("youtu.be") {
                // youtu.be/VIDEO_ID
                if let Some(id) = url.path().strip_prefix('/') {
                    if !id.is_empty() {
                        return Ok(id.to_string());
                    }
                }
            }
        }
        return Err(ExtractorError::UnsupportedLink(input.to_string()));
    }

    // Bare video ids are 11 url-safe characters
    if input.len() == 11
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Ok(input.to_string());
    }

    Err(ExtractorError::UnsupportedLink(input.to_string()))
}

/// Normalize a channel reference into a URL the probe understands.
///
/// Handles full channel URLs, `@handle` references, and bare channel ids.
pub fn channel_url(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else if let Some(handle) = input.strip_prefix('@') {
        format!("https://www.youtube.com/@{}", handle)
    } else if input.starts_with("UC") && input.len() == 24 {
        format!("https://www.youtube.com/channel/{}", input)
    } else {
        format!("https://www.youtube.com/@{}", input)
    }
}

/// Normalize a playlist reference into a URL the probe understands.
pub fn playlist_url(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        // Reduce watch-page links carrying a list parameter to the playlist
        if let Ok(url) = Url::parse(input) {
            if let Some(list) = url
                .query_pairs()
                .find(|(key, _)| key == "list")
                .map(|(_, value)| value.to_string())
            {
                return format!("https://www.youtube.com/playlist?list={}", list);
            }
        }
        input.to_string()
    } else {
        format!("https://www.youtube.com/playlist?list={}", input)
    }
}
