//! Model-response reconciliation
//!
//! The model's output is untrusted. It flows through three explicit stages:
//! parse (fence stripping + JSON), completeness repair (the ordering must be
//! a total permutation of the active set), and a reasoning-fidelity check
//! (each reasoning string must describe the task actually at that position).
//! Anything unparsable falls back to a deterministic identity ordering.

use super::models::{
    Language, ModelPlan, PrioritizeResponse, ReasoningField, Task, TimeColor,
};
use super::urgency::{appended_reasoning, synthesize_reasoning};
use crate::metrics::METRICS;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::warn;

/// Strip a Markdown code fence if the model wrapped its JSON in one.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    if let Some(inner) = text
        .strip_prefix("```json")
        .and_then(|s| s.strip_suffix("```"))
    {
        return inner.trim();
    }
    if let Some(inner) = text.strip_prefix("```").and_then(|s| s.strip_suffix("```")) {
        return inner.trim();
    }
    text
}

/// Stage 1: parse the raw model text into a plan.
///
/// Returns `None` when the text is not JSON or the load-bearing
/// `prioritizedTaskIds` array is absent; both cases route to the fallback.
pub fn parse_model_plan(raw: &str) -> Option<ModelPlan> {
    let text = strip_code_fence(raw);
    let plan: ModelPlan = serde_json::from_str(text).ok()?;
    if plan.prioritized_task_ids.is_none() {
        return None;
    }
    Some(plan)
}

/// Stage 2: repair the ordering into a total permutation of `0..task_count`.
///
/// Out-of-range and repeated IDs are dropped (first occurrence wins), then
/// the missing indices are appended in ascending order. Returns the 0-based
/// ordering and the number of positions the model actually supplied.
pub fn repair_ordering(ids: &[i64], task_count: usize) -> (Vec<usize>, usize) {
    let mut seen = vec![false; task_count];
    let mut ordering = Vec::with_capacity(task_count);

    for &id in ids {
        if id >= 1 && (id as usize) <= task_count {
            let index = id as usize - 1;
            if !seen[index] {
                seen[index] = true;
                ordering.push(index);
            }
        }
    }

    let supplied = ordering.len();
    for index in 0..task_count {
        if !seen[index] {
            ordering.push(index);
        }
    }

    (ordering, supplied)
}

/// Case-insensitive check that a reasoning string mentions the task title.
fn mentions_title(reasoning: &str, title: &str) -> bool {
    reasoning.to_lowercase().contains(&title.to_lowercase())
}

/// Reconcile a raw model response against the active-task set.
///
/// Never fails: a response that cannot be trusted degrades to the fallback
/// ordering, and a partially valid one is repaired in place. The returned
/// ordering is always a complete permutation of `tasks`.
pub fn reconcile(
    raw: &str,
    tasks: &[Task],
    language: Language,
    now: DateTime<Utc>,
) -> PrioritizeResponse {
    match parse_model_plan(raw) {
        Some(plan) => build_response(plan, tasks, language, now),
        None => {
            warn!("model response unparsable, using fallback ordering");
            METRICS.record_fallback();
            fallback_response(tasks, language, now)
        }
    }
}

fn build_response(
    plan: ModelPlan,
    tasks: &[Task],
    language: Language,
    now: DateTime<Utc>,
) -> PrioritizeResponse {
    let ids = plan.prioritized_task_ids.unwrap_or_default();
    let (ordering, supplied) = repair_ordering(&ids, tasks.len());
    let appended = tasks.len() - supplied;
    if appended > 0 {
        warn!(appended, "model omitted tasks from its ordering, appending");
        METRICS.record_repair(appended);
    }

    let mut prioritized_tasks = Vec::with_capacity(ordering.len());
    let mut reasoning = IndexMap::new();
    let mut estimated_time = IndexMap::new();
    let mut time_colors = IndexMap::new();
    let mut regenerated = 0usize;

    for (slot, &index) in ordering.iter().enumerate() {
        let position = (slot + 1).to_string();
        let task = &tasks[index];

        // Stage 3: positions the model supplied keep their reasoning only if
        // it actually describes this task; appended positions get the
        // generic completion sentence.
        let text = if slot < supplied {
            match plan.reasoning.get(&position) {
                Some(text) if mentions_title(text, &task.title) => text.clone(),
                _ => {
                    regenerated += 1;
                    synthesize_reasoning(task, now, language)
                }
            }
        } else {
            appended_reasoning(task, language)
        };
        reasoning.insert(position.clone(), text);

        if let Some(estimate) = plan.estimated_time_per_task.get(&position) {
            estimated_time.insert(position.clone(), estimate.clone());
        }
        if let Some(color) = plan
            .time_colors
            .get(&position)
            .and_then(|value| TimeColor::parse(value))
        {
            time_colors.insert(position.clone(), color);
        }

        prioritized_tasks.push(task.clone());
    }

    if regenerated > 0 {
        warn!(regenerated, "model reasoning failed fidelity check, regenerated");
        METRICS.record_reasoning_regenerated(regenerated);
    }

    PrioritizeResponse {
        prioritized_tasks,
        reasoning: ReasoningField::ByPosition(reasoning),
        estimated_time_per_task: estimated_time,
        time_colors,
    }
}

/// Deterministic identity-order fallback used when the model's output
/// cannot be trusted at all. Total: task data is typed, so construction
/// cannot fail.
pub fn fallback_response(
    tasks: &[Task],
    language: Language,
    now: DateTime<Utc>,
) -> PrioritizeResponse {
    let mut reasoning = IndexMap::new();
    for (slot, task) in tasks.iter().enumerate() {
        reasoning.insert(
            (slot + 1).to_string(),
            synthesize_reasoning(task, now, language),
        );
    }

    PrioritizeResponse {
        prioritized_tasks: tasks.to_vec(),
        reasoning: ReasoningField::ByPosition(reasoning),
        estimated_time_per_task: IndexMap::new(),
        time_colors: IndexMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prioritizer::models::{TaskPriority, TaskStatus};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    fn task(id: i64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            deadline: Some(now() + Duration::days(2)),
            priority: TaskPriority::Medium,
            status: TaskStatus::Planned,
            completed_at: None,
        }
    }

    fn positions(response: &PrioritizeResponse) -> Vec<i64> {
        response.prioritized_tasks.iter().map(|t| t.id).collect()
    }

    fn reasoning_map(response: &PrioritizeResponse) -> &IndexMap<String, String> {
        match &response.reasoning {
            ReasoningField::ByPosition(map) => map,
            ReasoningField::Message(_) => panic!("expected per-position reasoning"),
        }
    }

    #[test]
    fn test_strip_json_fence() {
        let raw = "```json\n{\"prioritizedTaskIds\": [1]}\n```";
        assert_eq!(strip_code_fence(raw), "{\"prioritizedTaskIds\": [1]}");
    }

    #[test]
    fn test_strip_bare_fence() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_leaves_plain_text_alone() {
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_rejects_missing_ids() {
        assert!(parse_model_plan("{\"reasoning\": {}}").is_none());
        assert!(parse_model_plan("not json at all").is_none());
        assert!(parse_model_plan("{\"prioritizedTaskIds\": [2, 1]}").is_some());
    }

    #[test]
    fn test_fenced_response_parses_end_to_end() {
        let tasks = vec![task(1, "Alpha"), task(2, "Beta")];
        let raw = "```json\n{\"prioritizedTaskIds\": [2, 1], \
                   \"reasoning\": {\"1\": \"Beta is urgent\", \"2\": \"Alpha can wait\"}}\n```";

        let response = reconcile(raw, &tasks, Language::En, now());
        assert_eq!(positions(&response), vec![2, 1]);
        assert_eq!(reasoning_map(&response)["1"], "Beta is urgent");
    }

    #[test]
    fn test_permutation_property_under_partial_response() {
        let tasks = vec![task(1, "Alpha"), task(2, "Beta"), task(3, "Gamma")];
        let raw = "{\"prioritizedTaskIds\": [3]}";

        let response = reconcile(raw, &tasks, Language::En, now());
        assert_eq!(positions(&response), vec![3, 1, 2]);

        let map = reasoning_map(&response);
        assert_eq!(map.len(), 3);
        assert!(map["2"].contains("Alpha"));
        assert!(map["3"].contains("Beta"));
    }

    #[test]
    fn test_duplicate_and_out_of_range_ids_dropped() {
        let tasks = vec![task(1, "Alpha"), task(2, "Beta"), task(3, "Gamma")];
        let raw = "{\"prioritizedTaskIds\": [2, 2, 9, 0, -1, 1]}";

        let response = reconcile(raw, &tasks, Language::En, now());
        assert_eq!(positions(&response), vec![2, 1, 3]);
    }

    #[test]
    fn test_reasoning_fidelity_regenerates_mismatches() {
        let tasks = vec![task(1, "Write report"), task(2, "Book flights")];
        // Position 1 reasoning talks about the wrong task.
        let raw = "{\"prioritizedTaskIds\": [1, 2], \
                   \"reasoning\": {\"1\": \"Book flights is the most urgent\", \
                                   \"2\": \"Book flights can wait\"}}";

        let response = reconcile(raw, &tasks, Language::En, now());
        let map = reasoning_map(&response);
        assert!(map["1"].contains("Write report"));
        assert!(map["2"].contains("Book flights"));
    }

    #[test]
    fn test_fidelity_match_is_case_insensitive() {
        let tasks = vec![task(1, "Write Report")];
        let raw = "{\"prioritizedTaskIds\": [1], \
                   \"reasoning\": {\"1\": \"the write report task must come first\"}}";

        let response = reconcile(raw, &tasks, Language::En, now());
        assert_eq!(
            reasoning_map(&response)["1"],
            "the write report task must come first"
        );
    }

    #[test]
    fn test_fallback_is_identity_order() {
        let tasks = vec![task(4, "Alpha"), task(9, "Beta"), task(2, "Gamma")];

        let response = reconcile("the model rambled instead of JSON", &tasks, Language::En, now());
        assert_eq!(positions(&response), vec![4, 9, 2]);
        assert!(response.estimated_time_per_task.is_empty());
        assert!(response.time_colors.is_empty());

        let map = reasoning_map(&response);
        assert_eq!(map.len(), 3);
        assert!(map["1"].contains("Alpha"));
    }

    #[test]
    fn test_fallback_reasoning_localized() {
        let mut overdue = task(1, "Déclarer les impôts");
        // Past deadline: the filter would normally drop this, but the
        // synthesis must stay total over any task it is handed.
        overdue.deadline = Some(now() - Duration::days(1));
        let tasks = vec![overdue];

        let response = fallback_response(&tasks, Language::Fr, now());
        let map = reasoning_map(&response);
        assert!(map["1"].contains("Déclarer les impôts"));
        assert!(map["1"].contains("en retard"));
    }

    #[test]
    fn test_time_maps_pass_through_valid_entries() {
        let tasks = vec![task(1, "Alpha"), task(2, "Beta")];
        let raw = "{\"prioritizedTaskIds\": [1, 2], \
                   \"reasoning\": {\"1\": \"Alpha first\", \"2\": \"Beta second\"}, \
                   \"estimatedTimePerTask\": {\"1\": \"30 minutes\", \"2\": \"2 hours\"}, \
                   \"timeColors\": {\"1\": \"green\", \"2\": \"magenta\"}}";

        let response = reconcile(raw, &tasks, Language::En, now());
        assert_eq!(response.estimated_time_per_task["1"], "30 minutes");
        assert_eq!(response.time_colors["1"], TimeColor::Green);
        // Unknown color dropped rather than failing the whole parse.
        assert!(!response.time_colors.contains_key("2"));
    }

    #[test]
    fn test_repair_ordering_appends_ascending() {
        let (ordering, supplied) = repair_ordering(&[4], 5);
        assert_eq!(ordering, vec![3, 0, 1, 2, 4]);
        assert_eq!(supplied, 1);
    }
}
