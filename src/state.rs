//! Application state shared by all handlers
//!
//! Built once at startup and never mutated afterwards.

use crate::agent::{AgentProfile, GeminiSolver, Solver};
use crate::config::Config;
use crate::services::diagrams::DiagramStore;
use std::sync::Arc;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Config,
    /// Agent persona used for every submission
    pub profile: AgentProfile,
    /// Diagram folder
    pub diagrams: DiagramStore,
    /// Agent collaborator
    pub solver: Arc<dyn Solver>,
}

impl AppState {
    /// Assemble state around an existing solver
    ///
    /// Fails when the diagram prefix cannot be mounted as a route.
    pub fn new(config: Config, solver: Arc<dyn Solver>) -> anyhow::Result<Self> {
        config.diagrams.validate()?;
        Ok(Self {
            profile: config.agent.profile(),
            diagrams: DiagramStore::new(&config.diagrams),
            config,
            solver,
        })
    }

    /// Build state with the Gemini solver and make sure the diagram directory exists
    pub async fn initialize(config: Config) -> anyhow::Result<Self> {
        let solver = GeminiSolver::new(&config.agent)?;
        let state = Self::new(config, Arc::new(solver))?;
        state.diagrams.ensure_directory().await?;
        Ok(state)
    }
}
