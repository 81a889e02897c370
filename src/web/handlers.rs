//! Request handlers for the search form and scan results.

use crate::types::OctetRange;
use crate::web::render;
use crate::web::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Form fields posted to `/search`. Kept as text so malformed numbers can
/// be reported back verbatim.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// `GET /` - the search form.
pub async fn show_home_page(State(state): State<Arc<AppState>>) -> Response {
    let subnet = match state.base.resolve().await {
        Ok(subnet) => subnet,
        Err(e) => {
            warn!(error = %e, "cannot determine local subnet");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e);
        }
    };

    Html(render::home_page(&subnet, &state.defaults)).into_response()
}

/// `POST /search` - scan the requested range and list what answered.
pub async fn search(State(state): State<Arc<AppState>>, Form(form): Form<SearchForm>) -> Response {
    let range = match OctetRange::parse(&form.from, &form.to) {
        Ok(range) => range,
        Err(e) => {
            info!(from = %form.from, to = %form.to, error = %e, "rejected search request");
            return error_response(StatusCode::BAD_REQUEST, &e);
        }
    };

    let subnet = match state.base.resolve().await {
        Ok(subnet) => subnet,
        Err(e) => {
            warn!(error = %e, "cannot determine local subnet");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e);
        }
    };

    let report = state.scanner.scan(subnet, range).await;
    Html(render::results_page(&report)).into_response()
}

fn error_response(status: StatusCode, err: &dyn std::error::Error) -> Response {
    (status, Html(render::error_body(err))).into_response()
}
