//! Sign-in and sign-out.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};
use tera::Context;

use quill_shared::dto::{LoginForm, LoginQuery};

use crate::middleware::auth::{OptionalUser, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::render;
use crate::state::AppState;

use super::redirect;

/// Only same-site paths are followed after sign-in.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

fn login_context(next: Option<&str>, error: Option<&str>) -> Context {
    let mut context = Context::new();
    context.insert("next", safe_next(next));
    context.insert("error", &error);
    context
}

/// GET /login
pub async fn login_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    user: OptionalUser,
    query: web::Query<LoginQuery>,
) -> AppResult<HttpResponse> {
    let context = login_context(query.next.as_deref(), None);
    render::html(&state, &req, user.0.as_ref(), "login.html", context)
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<LoginQuery>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let user = state.users.find_by_email(&form.email).await?;
    let verified = match &user {
        Some(user) => state
            .passwords
            .verify(&form.password, &user.password_hash)
            .map_err(|e| AppError::Internal(e.to_string()))?,
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        tracing::info!("Rejected sign-in attempt");
        let context = login_context(query.next.as_deref(), Some("Unknown email or password."));
        let body = render::render(&state, &req, None, "login.html", context)?;
        return Ok(HttpResponse::Unauthorized()
            .content_type(ContentType::html())
            .body(body));
    };

    let token = state
        .tokens
        .generate_token(user.id, &user.email, user.roles())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(state.tokens.expiration_seconds()))
        .finish();

    tracing::info!(user_id = %user.id, admin = user.is_admin, "Signed in");

    let mut response = redirect(safe_next(query.next.as_deref()));
    response
        .add_cookie(&cookie)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}

/// GET /logout
pub async fn logout() -> AppResult<HttpResponse> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    let mut response = redirect("/");
    response
        .add_cookie(&cookie)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}
