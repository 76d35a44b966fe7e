//! Task prioritization pipeline
//!
//! The inbound task list is filtered to the active set, turned into a
//! structured prompt for the generative-language API, and the model's
//! response is reconciled through a validate → repair → fallback pipeline:
//! - parse (fence stripping, JSON, required fields)
//! - completeness repair (ordering is always a total permutation)
//! - reasoning-fidelity check (reasoning describes the task it is attached to)

pub mod filter;
pub mod gemini_client;
pub mod gemini_config;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod reconcile;
pub mod service;
pub mod urgency;

pub use filter::active_tasks;
pub use gemini_client::{GeminiClient, ModelClient, ModelError};
pub use gemini_config::GeminiConfig;
pub use handlers::{prioritize_tasks, PrioritizerState};
pub use models::{
    Language, PrioritizeRequest, PrioritizeResponse, ReasoningField, Task, TaskPriority,
    TaskStatus, TimeColor,
};
pub use service::PrioritizerService;
