//! HTTP handlers and route configuration.

mod health;
mod pages;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
///
/// A post id that is not an integer is answered like an unknown id, and so
/// is every path without a route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::NotFound(format!("no such page: {err}")).into()
    }))
    .route("/", web::get().to(pages::home))
    .route("/posts/", web::get().to(pages::post_list))
    .route("/post/{id}/", web::get().to(pages::post_detail))
    .route("/health", web::get().to(health::health_check))
    .default_service(web::to(pages::not_found));
}
