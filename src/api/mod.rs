//! API module - HTTP routes, handlers, and models

pub mod download_handlers;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod views;
