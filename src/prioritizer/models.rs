//! Data models for the prioritization API

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Lowercase label used inside generated sentences
    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, Self::Low) => "low",
            (Language::En, Self::Medium) => "medium",
            (Language::En, Self::High) => "high",
            (Language::Fr, Self::Low) => "faible",
            (Language::Fr, Self::Medium) => "moyenne",
            (Language::Fr, Self::High) => "haute",
        }
    }
}

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

/// Task as owned by the surrounding task-management system.
///
/// This service only reads tasks; it never mutates or persists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Supported response languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Result message for an empty active-task set
    pub fn no_tasks_message(&self) -> &'static str {
        match self {
            Self::En => "No tasks to prioritize",
            Self::Fr => "Aucune tâche à prioriser",
        }
    }

    /// Generic user-facing failure message for upstream errors
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::En => "Failed to prioritize tasks",
            Self::Fr => "Échec de la priorisation des tâches",
        }
    }
}

/// Traffic-light time tag attached to a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeColor {
    Green,
    Yellow,
    Red,
}

impl TimeColor {
    /// Lenient parse of a model-provided color string
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "red" => Some(Self::Red),
            _ => None,
        }
    }
}

/// Prioritization request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrioritizeRequest {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub language: Language,
}

/// Reasoning payload of a prioritization result.
///
/// Normally a map keyed by 1-based position. The empty-input case returns a
/// plain message string instead, matching the inbound contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReasoningField {
    Message(String),
    ByPosition(IndexMap<String, String>),
}

/// Prioritization result
///
/// Invariant: `prioritized_tasks` is a total permutation of the active-task
/// set the request produced — no omissions, no duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizeResponse {
    pub prioritized_tasks: Vec<Task>,
    pub reasoning: ReasoningField,
    pub estimated_time_per_task: IndexMap<String, String>,
    pub time_colors: IndexMap<String, TimeColor>,
}

/// The JSON shape requested from the model.
///
/// Deliberately lenient: only `prioritizedTaskIds` is load-bearing. The
/// per-position maps default to empty so a sloppy response still parses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPlan {
    pub prioritized_task_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub reasoning: HashMap<String, String>,
    #[serde(default)]
    pub estimated_time_per_task: HashMap<String, String>,
    #[serde(default)]
    pub time_colors: HashMap<String, String>,
}
