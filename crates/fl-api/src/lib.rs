//! # fl-api
//!
//! The web routing and orchestration layer for Flingo.

pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::web;

pub use error::ApiError;
pub use handlers::AppState;

/// Configures the share/retrieve routes.
///
/// # Developer Note
/// Routes are registered on the caller's `ServiceConfig` so the binary can
/// mount static assets at `/` after them without shadowing the API.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Shared text has no size cap; lift actix's 16 KiB urlencoded default
        .app_data(web::FormConfig::default().limit(usize::MAX))
        // Text sharing
        .route("/text", web::post().to(handlers::save_text))
        .route("/text", web::get().to(handlers::get_text))
        // Paths the bundled front-end calls
        .route("/test-save", web::get().to(handlers::save_text_query))
        .route("/test-get", web::get().to(handlers::get_text))
        // File sharing
        .route("/share-file", web::post().to(handlers::upload_file))
        .route("/file/{code}", web::get().to(handlers::get_file))
        .route("/download/{code}", web::get().to(handlers::download_file));
}
