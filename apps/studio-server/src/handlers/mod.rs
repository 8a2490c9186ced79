//! HTTP handlers and route configuration.

mod analytics;
mod dashboard;
mod generate;
mod health;
mod posts;
mod settings;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Generation
            .service(
                web::scope("/generate")
                    .route("", web::post().to(generate::generate_draft))
                    .route("/image", web::post().to(generate::generate_image)),
            )
            // Posts
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/status", web::put().to(posts::update_status)),
            )
            .route("/calendar", web::get().to(posts::calendar))
            // Dashboard
            .route("/dashboard", web::get().to(dashboard::dashboard))
            .route("/trends", web::get().to(dashboard::trends))
            .route("/analytics", web::get().to(analytics::analytics))
            // Settings
            .service(
                web::scope("/settings")
                    .route("", web::get().to(settings::get_settings))
                    .route("/api-key", web::put().to(settings::set_api_key))
                    .route("/api-key", web::delete().to(settings::clear_api_key)),
            ),
    );
}

/// JSON extractor config: body limit plus RFC 7807 errors for bad payloads.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
