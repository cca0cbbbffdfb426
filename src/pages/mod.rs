//! Server-rendered pages: landing page, submission form and school listing.

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;

use crate::AppState;

pub mod add_school;
pub mod home;
pub mod layout;
pub mod show_schools;

pub fn pages_router(body_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route(
            "/addSchool",
            get(add_school::add_school_page).post(add_school::submit_school),
        )
        .route("/showSchools", get(show_schools::show_schools_page))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::from_fn_with_state(
            body_limit,
            add_school::payload_too_large,
        ))
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
