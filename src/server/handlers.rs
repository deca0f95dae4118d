//! Page handlers
//!
//! Each page maps onto one content query: listings call `get_all`, record
//! pages call `get_by_slug`.

use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Response};

use super::error::ServerError;
use super::AppState;
use crate::content::ContentSource;
use crate::templates::{self, TemplateRenderer};

/// `GET /`
pub async fn view_home(State(state): State<AppState>) -> Response {
    let site = state.site();
    respond(&state, list_page(&state.templates, site.post_source(), templates::HOME))
}

/// `GET /viewBlogs`
pub async fn view_blogs(State(state): State<AppState>) -> Response {
    let site = state.site();
    respond(&state, list_page(&state.templates, site.post_source(), templates::BLOGS))
}

/// `GET /blog/:slug`
pub async fn view_post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let site = state.site();
    respond(&state, record_page(&state.templates, site.post_source(), &slug))
}

/// `GET /randomThoughts`
pub async fn view_randoms(State(state): State<AppState>) -> Response {
    let site = state.site();
    respond(
        &state,
        list_page(&state.templates, site.event_source(), templates::RANDOMS),
    )
}

/// `GET /random/:slug`
pub async fn view_random(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let site = state.site();
    respond(&state, record_page(&state.templates, site.event_source(), &slug))
}

/// Anything without a route
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> Response {
    ServerError::NoRoute(uri.path().to_string()).into_page(&state.templates)
}

fn list_page<S: ContentSource + ?Sized>(
    templates: &TemplateRenderer,
    source: &S,
    template: &str,
) -> Result<String, ServerError> {
    Ok(templates.render_list(template, source.get_all())?)
}

fn record_page<S: ContentSource + ?Sized>(
    templates: &TemplateRenderer,
    source: &S,
    slug: &str,
) -> Result<String, ServerError> {
    let record = source.get_by_slug(slug)?;
    Ok(templates.render_record(record)?)
}

fn respond(state: &AppState, page: Result<String, ServerError>) -> Response {
    match page {
        Ok(html) => Html(html).into_response(),
        Err(err) => err.into_page(&state.templates),
    }
}
