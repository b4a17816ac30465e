//! Static informational pages.

use actix_web::{HttpRequest, HttpResponse, web};
use tera::Context;

use crate::middleware::auth::OptionalUser;
use crate::middleware::error::AppResult;
use crate::render;
use crate::state::AppState;

/// GET /about
pub async fn about(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: OptionalUser,
) -> AppResult<HttpResponse> {
    render::html(&state, &req, user.0.as_ref(), "about.html", Context::new())
}

/// GET /me
pub async fn me(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: OptionalUser,
) -> AppResult<HttpResponse> {
    render::html(&state, &req, user.0.as_ref(), "me.html", Context::new())
}
