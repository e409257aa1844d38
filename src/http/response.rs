//! Response construction.
//!
//! # Responsibilities
//! - Turn a rendered page into an HTML response
//! - Map the not-found flag to a 404 status
//! - Map render failures to a bare 500

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::routing::RenderedPage;

/// HTML response for `page`, labelled with the site charset.
pub fn page_response(page: RenderedPage, charset: &str) -> Response {
    let status = if page.not_found {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    let content_type = HeaderValue::from_str(&format!("text/html; charset={charset}"))
        .unwrap_or_else(|_| HeaderValue::from_static("text/html"));

    let mut response = Response::new(Body::from(page.html));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);
    response
}

pub fn render_failed() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Page rendering failed").into_response()
}
