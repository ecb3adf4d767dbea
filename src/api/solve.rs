//! Problem form handlers
//!
//! `GET /` shows the empty form, `POST /` renders the agent's answer and
//! `POST /api/solve` returns the same outcome as JSON.

use crate::api::utils::{first_field, FormFields};
use crate::services::solve::{solve_problem, SolveOutcome};
use crate::state::AppState;
use crate::views::{render_index, IndexView};
use axum::{
    extract::State,
    response::{Html, Json},
    Form,
};
use std::sync::Arc;
use tracing::info;

/// Form field holding the problem statement
pub const PROMPT_FIELD: &str = "prompt";

/// GET / - Empty-state page
pub async fn index() -> Html<String> {
    Html(render_index(&IndexView::default()))
}

/// POST / - Ask the agent and render the answer
///
/// Always succeeds; agent failures are shown as the result text.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<FormFields>,
) -> Html<String> {
    let outcome = run(&state, &fields).await;
    Html(render_index(&IndexView {
        result: &outcome.result,
        diagram_url: outcome.diagram_url.as_deref(),
    }))
}

/// POST /api/solve - Same as `POST /` but returns JSON including the failure flag
pub async fn solve_json(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<FormFields>,
) -> Json<SolveOutcome> {
    Json(run(&state, &fields).await)
}

async fn run(state: &AppState, fields: &[(String, String)]) -> SolveOutcome {
    // An absent field counts as an empty submission
    let submission = first_field(fields, PROMPT_FIELD).unwrap_or_default();
    info!(submission_len = submission.len(), "Submission received");

    let outcome = solve_problem(
        state.solver.as_ref(),
        &state.profile,
        &state.diagrams,
        &submission,
    )
    .await;

    info!(
        failed = outcome.failed,
        result_len = outcome.result.len(),
        "Submission handled"
    );
    outcome
}
