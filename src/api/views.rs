//! Server-rendered list views
//!
//! Minimal HTML counterparts of the browser's comment and related-video
//! lists: one row per item in input order, or a fallback sentence when the
//! extractor returns nothing.

use crate::api::models::{require, VideoParams};
use crate::error::AppError;
use crate::extractor::{Comment, RelatedVideo};
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::Html;
use std::sync::Arc;

pub fn render_comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "<p class=\"empty\">No comments found.</p>".to_string();
    }

    let mut html = String::from("<ul class=\"comments\">\n");
    for comment in comments {
        html.push_str(&format!(
            "  <li><span class=\"author\">{}</span> {}</li>\n",
            escape(&comment.author),
            escape(&comment.text),
        ));
    }
    html.push_str("</ul>\n");
    html
}

pub fn render_related(videos: &[RelatedVideo]) -> String {
    if videos.is_empty() {
        return "<p class=\"empty\">No related videos found.</p>".to_string();
    }

    let mut html = String::from("<ul class=\"related\">\n");
    for video in videos {
        let channel = video.channel.as_deref().unwrap_or("");
        html.push_str(&format!(
            "  <li data-id=\"{}\"><span class=\"title\">{}</span> <span class=\"channel\">{}</span></li>\n",
            escape(&video.id),
            escape(&video.title),
            escape(channel),
        ));
    }
    html.push_str("</ul>\n");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Rendered comment list for a video
pub async fn comment_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoParams>,
) -> Result<Html<String>, AppError> {
    let video_id = require(params.video_id, "videoId")?;
    let comments = state.extractor.video_comments(&video_id).await?;
    Ok(Html(render_comments(&comments)))
}

/// Rendered related-video list for a video
pub async fn related_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VideoParams>,
) -> Result<Html<String>, AppError> {
    let video_id = require(params.video_id, "videoId")?;
    let videos = state.extractor.related_videos(&video_id).await?;
    Ok(Html(render_related(&videos)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(author: &str, text: &str) -> Comment {
        Comment {
            id: String::new(),
            text: text.to_string(),
            author: author.to_string(),
            author_id: None,
            like_count: None,
            timestamp: None,
            parent: None,
        }
    }

    fn related(id: &str, title: &str) -> RelatedVideo {
        RelatedVideo {
            id: id.to_string(),
            title: title.to_string(),
            channel: None,
            duration: None,
            view_count: None,
            thumbnail: None,
        }
    }

    #[test]
    fn empty_comments_render_fallback() {
        assert!(render_comments(&[]).contains("No comments found."));
    }

    #[test]
    fn comments_render_one_row_per_item_in_order() {
        let html = render_comments(&[comment("alice", "first"), comment("bob", "second")]);
        assert_eq!(html.matches("<li>").count(), 2);
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn empty_related_renders_fallback() {
        assert!(render_related(&[]).contains("No related videos found."));
    }

    #[test]
    fn related_rows_preserve_order() {
        let html = render_related(&[related("a", "Alpha"), related("b", "Beta")]);
        assert!(html.find("Alpha").unwrap() < html.find("Beta").unwrap());
    }

    #[test]
    fn html_is_escaped() {
        let html = render_comments(&[comment("<script>", "a & b")]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(!html.contains("<script>"));
    }
}
