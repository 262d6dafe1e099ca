//! ytdlx-gateway
//!
//! A thin HTTP gateway in front of the yt-dlx media probe. Every route
//! validates its parameters, performs exactly one extractor call, and
//! relays the outcome as a `{"result": ...}` / `{"error": ...}` envelope.

pub mod api;
pub mod config;
pub mod error;
pub mod extractor;

pub use error::{AppError, Result};

use std::sync::Arc;
use tokio::sync::RwLock;

use extractor::MediaExtractor;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<RwLock<config::Settings>>,
    pub extractor: Arc<dyn MediaExtractor>,
}
