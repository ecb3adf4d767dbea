//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::agent::AgentProfile;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Default Gemini model used by the solver
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST API base URL
pub const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_ROLE: &str = "Problem Solver";
const DEFAULT_GOAL: &str = "Find solutions to social problems and visualize them.";
const DEFAULT_BACKSTORY: &str =
    "An experienced policy maker and humanitarian expert with a knack for visual communication.";

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Diagram folder configuration
    pub diagrams: DiagramConfig,
    /// Agent collaborator configuration
    pub agent: AgentSettings,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Diagram folder configuration
#[derive(Debug, Clone)]
pub struct DiagramConfig {
    /// Directory on disk holding the searchable diagrams
    pub dir: PathBuf,
    /// URL prefix the directory is served under
    pub public_prefix: String,
    /// Prefix of the placeholder path handed back after a submission
    pub placeholder_prefix: String,
    /// File extension (without the dot) of diagram files
    pub extension: String,
}

/// Agent collaborator configuration
#[derive(Clone)]
pub struct AgentSettings {
    /// Gemini API key; solving fails per request when absent
    pub api_key: Option<String>,
    /// Gemini model name
    pub model: String,
    /// Gemini API base URL
    pub api_base_url: String,
    /// HTTP timeout for a single agent call (in seconds)
    pub timeout_secs: u64,
    /// Agent role
    pub role: String,
    /// Agent goal
    pub goal: String,
    /// Agent backstory
    pub backstory: String,
    /// Log task prompts and outcomes at info level
    pub verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("static/diagrams"),
            public_prefix: "/static/diagrams".to_string(),
            placeholder_prefix: "diagrams/".to_string(),
            extension: "png".to_string(),
        }
    }
}

impl DiagramConfig {
    /// Check that the public prefix can be mounted as a route
    ///
    /// The prefix must start with `/` and must not be the root.
    pub fn validate(&self) -> anyhow::Result<()> {
        let prefix = self.public_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            anyhow::bail!(
                "DIAGRAM_PUBLIC_PREFIX cannot be the root path, got {:?}",
                self.public_prefix
            );
        }
        if !prefix.starts_with('/') {
            anyhow::bail!(
                "DIAGRAM_PUBLIC_PREFIX must start with '/', got {:?}",
                self.public_prefix
            );
        }
        if prefix.contains('*') {
            anyhow::bail!(
                "DIAGRAM_PUBLIC_PREFIX cannot contain wildcards, got {:?}",
                self.public_prefix
            );
        }
        Ok(())
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base_url: DEFAULT_GEMINI_API_BASE_URL.to_string(),
            timeout_secs: 120,
            role: DEFAULT_ROLE.to_string(),
            goal: DEFAULT_GOAL.to_string(),
            backstory: DEFAULT_BACKSTORY.to_string(),
            verbose: true,
        }
    }
}

// The API key must never reach the logs.
impl fmt::Debug for AgentSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("role", &self.role)
            .field("goal", &self.goal)
            .field("backstory", &self.backstory)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl AgentSettings {
    /// Build the process-wide agent profile from these settings
    pub fn profile(&self) -> AgentProfile {
        AgentProfile {
            role: self.role.clone(),
            goal: self.goal.clone(),
            backstory: self.backstory.clone(),
            verbose: self.verbose,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let server = ServerConfig::default();
        let diagrams = DiagramConfig::default();
        let agent = AgentSettings::default();

        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(server.port),
                host: env::var("HOST").unwrap_or(server.host),
            },
            diagrams: DiagramConfig {
                dir: env::var_os("DIAGRAM_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(diagrams.dir),
                public_prefix: env::var("DIAGRAM_PUBLIC_PREFIX")
                    .map(|p| p.trim_end_matches('/').to_string())
                    .unwrap_or(diagrams.public_prefix),
                placeholder_prefix: env::var("DIAGRAM_PLACEHOLDER_PREFIX")
                    .unwrap_or(diagrams.placeholder_prefix),
                extension: env::var("DIAGRAM_EXTENSION")
                    .map(|e| e.trim_start_matches('.').to_string())
                    .unwrap_or(diagrams.extension),
            },
            agent: AgentSettings {
                api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
                model: env::var("GEMINI_MODEL").unwrap_or(agent.model),
                api_base_url: env::var("GEMINI_API_BASE_URL").unwrap_or(agent.api_base_url),
                timeout_secs: env::var("AGENT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(agent.timeout_secs),
                role: env::var("AGENT_ROLE").unwrap_or(agent.role),
                goal: env::var("AGENT_GOAL").unwrap_or(agent.goal),
                backstory: env::var("AGENT_BACKSTORY").unwrap_or(agent.backstory),
                verbose: env::var("AGENT_VERBOSE")
                    .ok()
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(agent.verbose),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
