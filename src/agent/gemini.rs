//! Gemini-backed solver
//!
//! Direct HTTP client for the Gemini `generateContent` endpoint. The agent
//! persona goes into the system instruction and the task into a single user
//! turn.

use crate::agent::gemini_types::{GeminiApiRequest, GeminiApiResponse, RequestContent};
use crate::agent::{compose_prompt, AgentError, AgentProfile, ComposedPrompt, Solver, TaskSpec};
use crate::config::AgentSettings;
use async_trait::async_trait;
use std::time::Duration;

/// Solver that asks a Gemini model to work on each task
pub struct GeminiSolver {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiSolver {
    /// Build a solver with a shared HTTP client bounded by the configured timeout
    pub fn new(settings: &AgentSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        if settings.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; every solve request will report an error");
        }

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Solver for GeminiSolver {
    async fn solve(&self, profile: &AgentProfile, task: &TaskSpec) -> Result<String, AgentError> {
        let api_key = self.api_key.as_deref().ok_or(AgentError::MissingApiKey)?;
        let prompt = compose_prompt(profile, task);
        call_gemini_api(&self.client, &self.base_url, api_key, &self.model, &prompt).await
    }
}

/// Call Gemini API with a composed prompt
///
/// # Returns
/// * `Ok(String)` - The text content of the first candidate
/// * `Err(AgentError)` - If the request, the status, or the response content is unusable
async fn call_gemini_api(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    model: &str,
    prompt: &ComposedPrompt,
) -> Result<String, AgentError> {
    if api_key.is_empty() {
        return Err(AgentError::MissingApiKey);
    }

    let url = format!("{}/models/{}:generateContent", base_url, model);

    let request_body = GeminiApiRequest {
        system_instruction: Some(RequestContent::text(None, prompt.system.clone())),
        contents: vec![RequestContent::text(Some("user"), prompt.user.clone())],
    };

    tracing::debug!(
        url = %url,
        model = %model,
        prompt_len = prompt.user.len(),
        "Calling Gemini API"
    );

    let response = client
        .post(&url)
        .query(&[("key", api_key)])
        .json(&request_body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());

        tracing::error!(
            status_code = status_code,
            error_body = %error_body,
            "Gemini API returned error status"
        );

        if status_code == 429 {
            return Err(AgentError::RateLimited(error_body));
        }

        return Err(AgentError::Status {
            status: status_code,
            body: error_body,
        });
    }

    let response_body = response.text().await?;

    let parsed: GeminiApiResponse = serde_json::from_str(&response_body).map_err(|e| {
        AgentError::Decode(format!("{} - Response body: {}", e, response_body))
    })?;

    if let Some(reason) = parsed
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_ref())
    {
        return Err(AgentError::Blocked(reason.clone()));
    }

    if parsed.candidates.is_empty() {
        return Err(AgentError::EmptyResponse("contains no candidates"));
    }

    let text = parsed
        .first_text()
        .ok_or(AgentError::EmptyResponse("candidate contains no content"))?;
    if text.is_empty() {
        return Err(AgentError::EmptyResponse("text is empty"));
    }

    let finish_reason = parsed
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
        .unwrap_or("unknown");
    tracing::debug!(
        response_len = text.len(),
        finish_reason = %finish_reason,
        "Successfully received response from Gemini API"
    );

    Ok(text)
}
