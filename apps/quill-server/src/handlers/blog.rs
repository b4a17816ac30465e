//! Public reading views: home, archive, single entry and the Atom feed.

use actix_web::{HttpRequest, HttpResponse, web};
use tera::Context;

use crate::middleware::auth::OptionalUser;
use crate::middleware::error::{AppError, AppResult};
use crate::render;
use crate::state::AppState;

use super::redirect;

const HOME_ENTRIES: u64 = 5;
const FEED_ENTRIES: u64 = 10;

pub const ATOM_CONTENT_TYPE: &str = "application/atom+xml";

/// GET /home
///
/// An empty blog sends anonymous visitors and administrators to compose.
pub async fn home(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: OptionalUser,
) -> AppResult<HttpResponse> {
    let entries = state.entries.list_recent(Some(HOME_ENTRIES)).await?;

    if entries.is_empty() && user.0.as_ref().is_none_or(|u| u.is_admin) {
        return Ok(redirect("/compose"));
    }

    let mut context = Context::new();
    context.insert("entries", &entries);
    render::html(&state, &req, user.0.as_ref(), "home.html", context)
}

/// GET /
pub async fn archive(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: OptionalUser,
) -> AppResult<HttpResponse> {
    let entries = state.entries.list_recent(None).await?;

    let mut context = Context::new();
    context.insert("entries", &entries);
    render::html(&state, &req, user.0.as_ref(), "archive.html", context)
}

/// GET /entry/{slug}
pub async fn entry(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: OptionalUser,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    let entry = state
        .entries
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No entry with slug '{}'", slug)))?;

    let mut context = Context::new();
    context.insert("entry", &entry);
    render::html(&state, &req, user.0.as_ref(), "entry.html", context)
}

/// GET /feed
pub async fn feed(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: OptionalUser,
) -> AppResult<HttpResponse> {
    let entries = state.entries.list_recent(Some(FEED_ENTRIES)).await?;
    let updated = entries
        .iter()
        .map(|e| e.updated)
        .max()
        .unwrap_or_else(chrono::Utc::now);

    let mut context = Context::new();
    context.insert("entries", &entries);
    context.insert("feed_updated", &updated);
    let body = render::render(&state, &req, user.0.as_ref(), "feed.xml", context)?;

    Ok(HttpResponse::Ok()
        .content_type(ATOM_CONTENT_TYPE)
        .body(body))
}
