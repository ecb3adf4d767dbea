//! Diagram search handler

use crate::api::utils::{first_field, FormFields};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::Json, Form};
use serde::Serialize;
use std::sync::Arc;

/// Form field holding the case-insensitive search term
pub const SEARCH_TERM_FIELD: &str = "search_term";

/// Response for a diagram search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Public paths of matching diagrams, in directory listing order
    pub diagrams: Vec<String>,
}

/// POST /search_diagrams - Find diagrams by file name
pub async fn search_diagrams(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<FormFields>,
) -> Result<Json<SearchResponse>, AppError> {
    let term = first_field(&fields, SEARCH_TERM_FIELD);
    let diagrams = state.diagrams.search(term.as_deref()).await?;
    Ok(Json(SearchResponse { diagrams }))
}
