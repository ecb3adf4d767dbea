//! Agent collaborator errors

use thiserror::Error;

/// Failures raised while the agent works on a task
///
/// The `Display` text is what users see after "An error occurred: ".
#[derive(Error, Debug)]
pub enum AgentError {
    /// No API key was configured for the model backend
    #[error("GEMINI_API_KEY environment variable is not set or is empty")]
    MissingApiKey,

    /// The HTTP request itself failed (connect, timeout, body read)
    #[error("Failed to reach Gemini API: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request because of rate limiting
    #[error("Gemini API rate limit exceeded (HTTP 429): {0}")]
    RateLimited(String),

    /// The backend answered with a non-success status
    #[error("Gemini API returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The response body was not the expected JSON
    #[error("Failed to parse JSON response from Gemini API: {0}")]
    Decode(String),

    /// The backend refused to answer the prompt
    #[error("Gemini API blocked the prompt: {0}")]
    Blocked(String),

    /// The backend answered without usable text
    #[error("Gemini API response {0}")]
    EmptyResponse(&'static str),

    /// A crew was kicked off without any tasks
    #[error("Crew has no tasks to run")]
    NoTasks,

    /// Any other failure, carried as plain text
    #[error("{0}")]
    Other(String),
}
