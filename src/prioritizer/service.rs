//! Prioritization service
//!
//! Constructed once at process start and shared by reference with the
//! request handlers. Holds no per-request state; concurrent requests are
//! fully independent.

use super::filter::active_tasks;
use super::gemini_client::{ModelClient, ModelError};
use super::models::{Language, PrioritizeResponse, ReasoningField, Task};
use super::prompt::build_prompt;
use super::reconcile::reconcile;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

pub struct PrioritizerService {
    client: Arc<dyn ModelClient>,
}

impl PrioritizerService {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Prioritize a task list.
    ///
    /// Filters to the active set, short-circuits when nothing is left (no
    /// network call), and otherwise reconciles whatever the model returns
    /// into a complete ordering. Only a failed model call is an error.
    pub async fn prioritize(
        &self,
        tasks: &[Task],
        language: Language,
        now: DateTime<Utc>,
    ) -> Result<PrioritizeResponse, ModelError> {
        let active = active_tasks(tasks, now);
        debug!(
            total = tasks.len(),
            active = active.len(),
            "filtered to active task set"
        );

        if active.is_empty() {
            info!("no active tasks, skipping model call");
            return Ok(empty_response(language));
        }

        let prompt = build_prompt(&active, now, language);
        let raw = self.client.generate(&prompt).await?;

        Ok(reconcile(&raw, &active, language, now))
    }
}

fn empty_response(language: Language) -> PrioritizeResponse {
    PrioritizeResponse {
        prioritized_tasks: Vec::new(),
        reasoning: ReasoningField::Message(language.no_tasks_message().to_string()),
        estimated_time_per_task: IndexMap::new(),
        time_colors: IndexMap::new(),
    }
}
