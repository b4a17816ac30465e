//! HTTP handlers and route configuration.

mod blog;
mod compose;
mod health;
mod pages;
mod session;

#[cfg(test)]
mod tests;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(blog::archive))
    .route("/home", web::get().to(blog::home))
    .route("/about", web::get().to(pages::about))
    .route("/me", web::get().to(pages::me))
    .route("/feed", web::get().to(blog::feed))
    .route("/entry/{slug}", web::get().to(blog::entry))
    .service(
        web::resource("/compose")
            .route(web::get().to(compose::compose_form))
            .route(web::head().to(compose::compose_form))
            .route(web::post().to(compose::compose_submit)),
    )
    .service(
        web::resource("/login")
            .route(web::get().to(session::login_form))
            .route(web::post().to(session::login)),
    )
    .route("/logout", web::get().to(session::logout))
    .route("/health", web::get().to(health::health_check));
}

/// 302 to `location`.
fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
