//! Session extraction and the administrator access guard.

use actix_web::http::{Method, StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use serde::Serialize;
use std::future::{Ready, ready};
use uuid::Uuid;

use quill_core::domain::ADMIN_ROLE;
use quill_core::ports::TokenClaims;
use quill_shared::ErrorResponse;
use quill_shared::dto::LoginQuery;

use crate::state::AppState;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "quill_session";

/// The signed-in visitor.
///
/// Use [`OptionalUser`] on public pages and [`Administrator`] on admin pages:
/// ```ignore
/// async fn compose(admin: Administrator) -> impl Responder {
///     format!("Hello, {}!", admin.0.email)
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

impl From<TokenClaims> for CurrentUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.user_id,
            email: claims.email,
            is_admin: claims.roles.iter().any(|r| r == ADMIN_ROLE),
        }
    }
}

/// Session token from the cookie, or from a `Bearer` Authorization header.
fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Resolve the current user. Missing, expired and forged tokens all yield `None`.
pub fn current_user(req: &HttpRequest) -> Option<CurrentUser> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return None;
    };

    let token = session_token(req)?;

    match state.tokens.validate_token(&token) {
        Ok(claims) => Some(CurrentUser::from(claims)),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session token");
            None
        }
    }
}

/// Optional user extractor - never fails.
pub struct OptionalUser(pub Option<CurrentUser>);

impl FromRequest for OptionalUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalUser(current_user(req))))
    }
}

/// Why the guard refused a request.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    /// Read request without a session: send the visitor to sign in.
    #[error("authentication required")]
    Login(String),

    /// Read request from a signed-in non-administrator.
    #[error("administrator role required")]
    Root,

    /// Any write request without an administrator session.
    #[error("forbidden")]
    Forbidden,
}

impl ResponseError for AccessDenied {
    fn status_code(&self) -> StatusCode {
        match self {
            AccessDenied::Login(_) | AccessDenied::Root => StatusCode::FOUND,
            AccessDenied::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AccessDenied::Login(url) => HttpResponse::Found()
                .insert_header((header::LOCATION, url.as_str()))
                .finish(),
            AccessDenied::Root => HttpResponse::Found()
                .insert_header((header::LOCATION, "/"))
                .finish(),
            AccessDenied::Forbidden => {
                HttpResponse::Forbidden().json(ErrorResponse::forbidden())
            }
        }
    }
}

/// Decide whether a request may reach an administrator-only handler.
///
/// GET and HEAD are reads; every other method is a write. `login_url` is
/// only evaluated when the visitor has to be sent to sign in.
pub fn authorize(
    method: &Method,
    user: Option<&CurrentUser>,
    login_url: impl FnOnce() -> String,
) -> Result<(), AccessDenied> {
    let read = *method == Method::GET || *method == Method::HEAD;

    match user {
        Some(user) if user.is_admin => Ok(()),
        Some(_) if read => Err(AccessDenied::Root),
        None if read => Err(AccessDenied::Login(login_url())),
        _ => Err(AccessDenied::Forbidden),
    }
}

/// Login URL that returns the visitor to `next` afterwards.
pub fn login_url(base: &str, next: &str) -> String {
    let query = LoginQuery {
        next: Some(next.to_string()),
    };
    let encoded = serde_urlencoded::to_string(&query).unwrap_or_default();
    let separator = if base.contains('?') { '&' } else { '?' };

    format!("{base}{separator}{encoded}")
}

/// Administrator extractor - the access guard.
///
/// Runs before the handler body; a refused request never reaches it.
#[derive(Debug, Clone)]
pub struct Administrator(pub CurrentUser);

impl FromRequest for Administrator {
    type Error = AccessDenied;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = current_user(req);

        let decision = authorize(req.method(), user.as_ref(), || {
            let base = req
                .app_data::<web::Data<AppState>>()
                .map(|state| state.site.login_url.clone())
                .unwrap_or_else(|| "/login".to_string());
            login_url(&base, &req.uri().to_string())
        });

        if let Err(denied) = &decision {
            tracing::info!(
                method = %req.method(),
                path = %req.path(),
                reason = %denied,
                "Administrator access refused"
            );
        }

        ready(decision.and_then(|()| user.map(Administrator).ok_or(AccessDenied::Forbidden)))
    }
}
