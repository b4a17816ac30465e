//! Administrator-only entry authoring.

use actix_web::{HttpRequest, HttpResponse, web};
use tera::Context;
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Entry, EntryDraft};
use quill_core::slug::unique_slug;
use quill_shared::dto::{ComposeForm, ComposeQuery};

use crate::middleware::auth::Administrator;
use crate::middleware::error::AppResult;
use crate::render;
use crate::state::AppState;

use super::redirect;

/// GET /compose
///
/// Pre-fills the form when `key` names an existing entry. Any other key,
/// malformed or unknown, yields an empty form. So does a query string that
/// does not parse at all.
pub async fn compose_form(
    admin: Administrator,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let query = web::Query::<ComposeQuery>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Ignoring unparsable compose query");
            ComposeQuery::default()
        });

    let entry = match query.key().map(Uuid::parse_str) {
        Some(Ok(id)) => state.entries.find_by_id(id).await?,
        Some(Err(e)) => {
            tracing::debug!(error = %e, "Ignoring malformed compose key");
            None
        }
        None => None,
    };

    let mut context = Context::new();
    context.insert("entry", &entry);
    render::html(&state, &req, Some(&admin.0), "compose.html", context)
}

/// POST /compose
///
/// Without a key a new entry is created under a fresh slug; with one the
/// named entry is revised in place. Either way the response redirects to
/// the entry's permalink.
pub async fn compose_submit(
    admin: Administrator,
    state: web::Data<AppState>,
    form: web::Form<ComposeForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let key = form.key().map(str::to_string);
    let draft = EntryDraft::new(form.title, form.body_source)?;

    let entry = match key {
        Some(key) => {
            let mut entry = match Uuid::parse_str(&key) {
                Ok(id) => state.entries.find_by_id(id).await?,
                Err(_) => None,
            }
            .ok_or(DomainError::NotFound {
                entity_type: "Entry",
                key,
            })?;

            entry.revise(draft);
            entry
        }
        None => {
            let slug = unique_slug(&*state.entries, &draft.title, None).await?;
            Entry::new(Some(admin.0.email.clone()), slug, draft)
        }
    };

    let entry = state.entries.save(entry).await?;
    tracing::info!(slug = %entry.slug, id = %entry.id, "Entry saved");

    Ok(redirect(&entry.permalink()))
}
