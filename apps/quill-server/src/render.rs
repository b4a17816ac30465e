//! Template rendering glue.

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse};
use tera::Context;

use crate::middleware::auth::{CurrentUser, login_url};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Render `template` with the site-wide variables every page expects.
pub fn render(
    state: &AppState,
    req: &HttpRequest,
    user: Option<&CurrentUser>,
    template: &str,
    mut context: Context,
) -> AppResult<String> {
    let info = req.connection_info();
    let site_url = format!("{}://{}", info.scheme(), info.host());

    context.insert("blog_title", &state.site.blog_title);
    context.insert("site_url", &site_url);
    context.insert("request_url", &format!("{}{}", site_url, req.uri()));
    context.insert(
        "login_url",
        &login_url(&state.site.login_url, &req.uri().to_string()),
    );
    context.insert("current_user", &user);
    context.insert("is_admin", &user.is_some_and(|u| u.is_admin));

    state.templates.render(template, &context).map_err(|e| {
        AppError::Internal(format!("rendering {template}: {e:?}"))
    })
}

/// Render an HTML page as a 200 response.
pub fn html(
    state: &AppState,
    req: &HttpRequest,
    user: Option<&CurrentUser>,
    template: &str,
    context: Context,
) -> AppResult<HttpResponse> {
    let body = render(state, req, user, template, context)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}
