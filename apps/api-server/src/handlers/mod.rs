//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/posts", web::get().to(posts::feed))
            // Guarded routes
            .route("/posts", web::post().to(posts::create))
            .route("/dashboard", web::get().to(posts::dashboard))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            ),
    );
}
