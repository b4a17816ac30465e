use actix_web::cookie::Cookie;
use actix_web::http::{Method, StatusCode, header};
use actix_web::{App, test, web};
use uuid::Uuid;

use quill_core::domain::{ADMIN_ROLE, User};
use quill_infra::JwtConfig;

use super::configure_routes;
use crate::config::SiteConfig;
use crate::middleware::auth::SESSION_COOKIE;
use crate::state::AppState;

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn test_state() -> AppState {
    let site = SiteConfig {
        blog_title: "Test Blog".to_string(),
        ..SiteConfig::default()
    };
    let jwt = JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
        issuer: "quill-test".to_string(),
    };
    AppState::in_memory(site, jwt).unwrap()
}

fn session(state: &AppState, admin: bool) -> Cookie<'static> {
    let roles = if admin {
        vec![ADMIN_ROLE.to_string()]
    } else {
        Vec::new()
    };
    let token = state
        .tokens
        .generate_token(Uuid::new_v4(), "someone@example.com", roles)
        .unwrap();
    Cookie::new(SESSION_COOKIE, token)
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Admin-authenticated `POST /compose`.
fn compose_request(state: &AppState, fields: &[(&str, &str)]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/compose")
        .cookie(session(state, true))
        .set_form(fields)
}

#[actix_web::test]
async fn test_unknown_slug_is_404() {
    let state = test_state();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/entry/does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_anonymous_compose_redirects_to_login() {
    let state = test_state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/compose").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/login?next=%2Fcompose");
}

#[actix_web::test]
async fn test_reader_compose_redirects_to_root() {
    let state = test_state();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/compose")
        .cookie(session(&state, false))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn test_non_admin_post_is_forbidden() {
    let state = test_state();
    let app = app!(state);
    let form = [("title", "Sneaky"), ("body_source", "nope")];

    let as_reader = test::TestRequest::post()
        .uri("/compose")
        .cookie(session(&state, false))
        .set_form(form)
        .to_request();
    assert_eq!(
        test::call_service(&app, as_reader).await.status(),
        StatusCode::FORBIDDEN
    );

    let anonymous = test::TestRequest::post()
        .uri("/compose")
        .set_form(form)
        .to_request();
    assert_eq!(
        test::call_service(&app, anonymous).await.status(),
        StatusCode::FORBIDDEN
    );

    assert!(state.entries.list_recent(None).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_identical_titles_get_distinct_permalinks() {
    let state = test_state();
    let app = app!(state);
    let form = [("title", "Hello, World!"), ("body_source", "First post")];

    let first = test::call_service(&app, compose_request(&state, &form).to_request()).await;
    let second = test::call_service(&app, compose_request(&state, &form).to_request()).await;

    assert_eq!(first.status(), StatusCode::FOUND);
    assert_eq!(location(&first), "/entry/hello-world");
    assert_eq!(location(&second), "/entry/hello-world-2");

    let created = state.entries.find_by_slug("hello-world").await.unwrap().unwrap();
    assert_eq!(created.author.as_deref(), Some("someone@example.com"));
    assert_eq!(created.html, "First post");

    let req = test::TestRequest::get()
        .uri("/entry/hello-world-2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Hello, World!"));
}

#[actix_web::test]
async fn test_edit_keeps_slug_and_published() {
    let state = test_state();
    let app = app!(state);

    let create = [("title", "Original"), ("body_source", "v1")];
    test::call_service(&app, compose_request(&state, &create).to_request()).await;
    let original = state.entries.find_by_slug("original").await.unwrap().unwrap();

    let key = original.id.to_string();
    let edit = [
        ("key", key.as_str()),
        ("title", "Completely different"),
        ("body_source", "v2"),
    ];
    let resp = test::call_service(&app, compose_request(&state, &edit).to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/entry/original");

    let edited = state.entries.find_by_id(original.id).await.unwrap().unwrap();
    assert_eq!(edited.slug, "original");
    assert_eq!(edited.published, original.published);
    assert!(edited.updated > original.updated);
    assert_eq!(edited.title, "Completely different");
    assert_eq!(edited.body_source, "v2");
    assert_eq!(edited.html, "v2");
    assert_eq!(state.entries.list_recent(None).await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_compose_rejects_missing_and_blank_fields() {
    let state = test_state();
    let app = app!(state);

    let missing = test::call_service(&app, compose_request(&state, &[("title", "No body")]).to_request()).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let blank = test::call_service(
        &app,
        compose_request(&state, &[("title", "   "), ("body_source", "text")]).to_request(),
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_post_with_unknown_key_is_404() {
    let state = test_state();
    let app = app!(state);
    let key = Uuid::new_v4().to_string();

    let resp = test::call_service(
        &app,
        compose_request(
            &state,
            &[("key", key.as_str()), ("title", "Ghost"), ("body_source", "boo")],
        )
        .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(state.entries.list_recent(None).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_compose_form_prefills_known_key_only() {
    let state = test_state();
    let app = app!(state);

    test::call_service(
        &app,
        compose_request(&state, &[("title", "Draft title"), ("body_source", "draft body")]).to_request(),
    )
    .await;
    let entry = state.entries.find_by_slug("draft-title").await.unwrap().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/compose?key={}", entry.id))
        .cookie(session(&state, true))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("draft body"));

    let req = test::TestRequest::get()
        .uri("/compose?key=not-a-key")
        .cookie(session(&state, true))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(!String::from_utf8_lossy(&body).contains("draft body"));
}

#[actix_web::test]
async fn test_compose_form_ignores_unparsable_query() {
    let state = test_state();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/compose?key=a&key=b")
        .cookie(session(&state, true))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_head_compose_is_guarded_as_read() {
    let state = test_state();
    let app = app!(state);

    let req = test::TestRequest::default()
        .method(Method::HEAD)
        .uri("/compose")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/login?next=%2Fcompose");

    let req = test::TestRequest::default()
        .method(Method::HEAD)
        .uri("/compose")
        .cookie(session(&state, false))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");

    let req = test::TestRequest::default()
        .method(Method::HEAD)
        .uri("/compose")
        .cookie(session(&state, true))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_bearer_header_is_accepted() {
    let state = test_state();
    let app = app!(state);
    let token = state
        .tokens
        .generate_token(Uuid::new_v4(), "admin@example.com", vec![ADMIN_ROLE.to_string()])
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/compose")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_home_on_empty_blog() {
    let state = test_state();
    let app = app!(state);

    let anonymous = test::call_service(&app, test::TestRequest::get().uri("/home").to_request()).await;
    assert_eq!(anonymous.status(), StatusCode::FOUND);
    assert_eq!(location(&anonymous), "/compose");

    let admin = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/home")
            .cookie(session(&state, true))
            .to_request(),
    )
    .await;
    assert_eq!(location(&admin), "/compose");

    let reader = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/home")
            .cookie(session(&state, false))
            .to_request(),
    )
    .await;
    assert_eq!(reader.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_home_and_archive_list_newest_first() {
    let state = test_state();
    let app = app!(state);

    for title in ["Oldest entry", "Middle entry", "Newest entry"] {
        test::call_service(&app, compose_request(&state, &[("title", title), ("body_source", "text")]).to_request())
            .await;
    }

    for uri in ["/", "/home"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");

        let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
        let newest = body.find("Newest entry").unwrap();
        let middle = body.find("Middle entry").unwrap();
        let oldest = body.find("Oldest entry").unwrap();
        assert!(newest < middle && middle < oldest, "order on {uri}");
    }
}

#[actix_web::test]
async fn test_feed_is_atom() {
    let state = test_state();
    let app = app!(state);

    test::call_service(
        &app,
        compose_request(&state, &[("title", "Syndicated"), ("body_source", "<b>bold</b>")]).to_request(),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/feed").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/atom+xml"
    );
    let body = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
    assert!(body.contains("<feed xmlns=\"http://www.w3.org/2005/Atom\">"));
    assert!(body.contains("/entry/syndicated"));
    assert!(body.contains("&lt;b&gt;bold"));
}

#[actix_web::test]
async fn test_static_pages_render() {
    let state = test_state();
    let app = app!(state);

    for uri in ["/about", "/me", "/login", "/health"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
    }
}

#[actix_web::test]
async fn test_login_issues_session_cookie() {
    let state = test_state();
    let app = app!(state);

    let hash = state.passwords.hash("correct-password").unwrap();
    state
        .users
        .save(User::new("admin@example.com".to_string(), hash, true))
        .await
        .unwrap();

    let wrong = test::TestRequest::post()
        .uri("/login?next=%2Fcompose")
        .set_form([("email", "admin@example.com"), ("password", "wrong")])
        .to_request();
    let resp = test::call_service(&app, wrong).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let right = test::TestRequest::post()
        .uri("/login?next=%2Fcompose")
        .set_form([("email", "admin@example.com"), ("password", "correct-password")])
        .to_request();
    let resp = test::call_service(&app, right).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/compose");

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .unwrap()
        .into_owned();

    let req = test::TestRequest::get()
        .uri("/compose")
        .cookie(cookie)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_logout_clears_session() {
    let state = test_state();
    let app = app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .unwrap();
    assert_eq!(cookie.value(), "");
}
