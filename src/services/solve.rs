//! Problem solving service
//!
//! Turns a submission into a task, runs it through a one-agent crew and
//! pairs the answer with the placeholder diagram path.

use crate::agent::{AgentProfile, Crew, Solver, TaskSpec};
use crate::services::diagrams::DiagramStore;
use serde::Serialize;

/// Prefix of the result text when the agent fails
pub const ERROR_PREFIX: &str = "An error occurred: ";

/// Result of handling one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveOutcome {
    /// Agent answer, or the error message when `failed` is set
    pub result: String,
    /// Placeholder diagram path derived from the submission
    pub diagram_url: Option<String>,
    /// Whether the agent call failed
    pub failed: bool,
}

/// Task asking for solutions and a diagram concept for a social issue
pub fn solve_task(submission: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Analyze and propose solutions for this social issue: {}. \
             Also, think about a simple visual representation (a diagram concept) for this problem.",
            submission
        ),
        "Detailed, actionable steps to address the problem, and a description of a relevant diagram concept.",
    )
}

/// Ask the agent about a submission
///
/// Agent failures do not propagate: the message becomes the result text and
/// the diagram path is still returned.
pub async fn solve_problem(
    solver: &dyn Solver,
    profile: &AgentProfile,
    diagrams: &DiagramStore,
    submission: &str,
) -> SolveOutcome {
    let crew = Crew::new(profile.clone()).task(solve_task(submission));
    let diagram_url = Some(diagrams.placeholder_path(submission));

    match crew.kickoff(solver).await {
        Ok(result) => SolveOutcome {
            result,
            diagram_url,
            failed: false,
        },
        Err(e) => {
            tracing::error!(error = %e, "Agent failed to solve submission");
            SolveOutcome {
                result: format!("{}{}", ERROR_PREFIX, e),
                diagram_url,
                failed: true,
            }
        }
    }
}
