//! Sequential crew runner
//!
//! A crew is one agent profile plus an ordered list of tasks. Tasks run one
//! after another; every task after the first sees the previous answer as
//! context. The last answer is the crew's result.

use crate::agent::{AgentError, AgentProfile, Solver, TaskSpec};
use tracing::{debug, info};

/// One agent working through a list of tasks in order
#[derive(Debug, Clone)]
pub struct Crew {
    profile: AgentProfile,
    tasks: Vec<TaskSpec>,
}

impl Crew {
    /// Create a crew with no tasks
    pub fn new(profile: AgentProfile) -> Self {
        Self {
            profile,
            tasks: Vec::new(),
        }
    }

    /// Append a task
    pub fn task(mut self, task: TaskSpec) -> Self {
        self.tasks.push(task);
        self
    }

    /// Number of queued tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the crew has no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every task and return the final answer
    ///
    /// Stops at the first failing task.
    pub async fn kickoff(&self, solver: &dyn Solver) -> Result<String, AgentError> {
        if self.tasks.is_empty() {
            return Err(AgentError::NoTasks);
        }

        let mut previous: Option<String> = None;
        for (index, task) in self.tasks.iter().enumerate() {
            let task = match &previous {
                Some(context) => with_context(task, context),
                None => task.clone(),
            };

            if self.profile.verbose {
                info!(
                    role = %self.profile.role,
                    task_index = index,
                    description = %task.description,
                    "Agent starting task"
                );
            }

            let output = solver.solve(&self.profile, &task).await?;

            if self.profile.verbose {
                info!(
                    role = %self.profile.role,
                    task_index = index,
                    output_len = output.len(),
                    "Agent finished task"
                );
            } else {
                debug!(task_index = index, output_len = output.len(), "Task finished");
            }

            previous = Some(output);
        }

        previous.ok_or(AgentError::NoTasks)
    }
}

fn with_context(task: &TaskSpec, context: &str) -> TaskSpec {
    TaskSpec {
        description: format!(
            "{}\n\nContext from previous task:\n{}",
            task.description, context
        ),
        expected_output: task.expected_output.clone(),
    }
}
