//! Agent collaborator
//!
//! The agent is an opaque capability: it receives a task and returns free-form
//! text. Everything behind [`Solver`] (model, transport, prompting) is
//! replaceable, which is how tests substitute stubs for the Gemini backend.

pub mod crew;
pub mod error;
pub mod gemini;
pub mod gemini_types;

pub use crew::Crew;
pub use error::AgentError;
pub use gemini::GeminiSolver;

use async_trait::async_trait;

/// Process-wide agent persona, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    /// What the agent is (e.g. "Problem Solver")
    pub role: String,
    /// What the agent is trying to achieve
    pub goal: String,
    /// Background that frames the agent's answers
    pub backstory: String,
    /// Log task execution at info level
    pub verbose: bool,
}

/// A single unit of work handed to the agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    /// What the agent should do
    pub description: String,
    /// What a good answer looks like
    pub expected_output: String,
}

impl TaskSpec {
    /// Create a task from a description and its expected output
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }
}

/// Prompt split into the persona part and the task part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    /// Persona instruction (role, backstory, goal)
    pub system: String,
    /// Task instruction (description and expected output)
    pub user: String,
}

/// Build the prompt sent to a text model for one task
pub fn compose_prompt(profile: &AgentProfile, task: &TaskSpec) -> ComposedPrompt {
    let system = format!(
        "You are {}. {}\nYour personal goal is: {}",
        profile.role, profile.backstory, profile.goal
    );
    let user = format!(
        "Current Task: {}\n\nThis is the expected criteria for your final answer: {}\n\
         You MUST return the actual complete content as the final answer, not a summary.",
        task.description, task.expected_output
    );
    ComposedPrompt { system, user }
}

/// Capability interface for the agent collaborator
#[async_trait]
pub trait Solver: Send + Sync {
    /// Run one task as the given agent and return its answer
    async fn solve(&self, profile: &AgentProfile, task: &TaskSpec) -> Result<String, AgentError>;
}
