//! Prompt construction for the prioritization model
//!
//! Pure string construction: one numbered line per active task plus a
//! localized instruction pinning the JSON shape of the expected response.
//! The empty-task case is short-circuited by the service before this point.

use super::models::{Language, Task};
use super::urgency::deadline_annotation;
use chrono::{DateTime, Utc};

const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Build the model prompt for an active-task set.
pub fn build_prompt(tasks: &[Task], now: DateTime<Utc>, language: Language) -> String {
    let mut prompt = String::new();

    match language {
        Language::En => {
            prompt.push_str(
                "You are a task planning assistant. Order the following tasks from \
                 most to least important, considering deadlines, urgency, and priority.\n\nTasks:\n",
            );
        }
        Language::Fr => {
            prompt.push_str(
                "Tu es un assistant de planification. Classe les tâches suivantes de la \
                 plus importante à la moins importante, en tenant compte des dates \
                 limites, de l'urgence et de la priorité.\n\nTâches :\n",
            );
        }
    }

    for (index, task) in tasks.iter().enumerate() {
        prompt.push_str(&task_line(index + 1, task, now, language));
        prompt.push('\n');
    }

    match language {
        Language::En => {
            prompt.push_str(
                "\nRespond with JSON only, no other text, in exactly this shape:\n\
                 {\n\
                 \x20 \"prioritizedTaskIds\": [2, 1],\n\
                 \x20 \"reasoning\": {\"1\": \"why this task comes first\", \"2\": \"...\"},\n\
                 \x20 \"estimatedTimePerTask\": {\"1\": \"30 minutes\", \"2\": \"2 hours\"},\n\
                 \x20 \"timeColors\": {\"1\": \"green\", \"2\": \"red\"}\n\
                 }\n\
                 \"prioritizedTaskIds\" must contain every task number listed above exactly once. \
                 Keys of the other objects are positions in your ordering (\"1\" is first). \
                 Each reasoning entry must name the task it describes. \
                 Allowed colors: green, yellow, red.\n",
            );
        }
        Language::Fr => {
            prompt.push_str(
                "\nRéponds uniquement avec du JSON, sans autre texte, exactement sous cette forme :\n\
                 {\n\
                 \x20 \"prioritizedTaskIds\": [2, 1],\n\
                 \x20 \"reasoning\": {\"1\": \"pourquoi cette tâche est première\", \"2\": \"...\"},\n\
                 \x20 \"estimatedTimePerTask\": {\"1\": \"30 minutes\", \"2\": \"2 heures\"},\n\
                 \x20 \"timeColors\": {\"1\": \"green\", \"2\": \"red\"}\n\
                 }\n\
                 \"prioritizedTaskIds\" doit contenir chaque numéro de tâche ci-dessus exactement une fois. \
                 Les clés des autres objets sont les positions dans ton classement (\"1\" est la première). \
                 Chaque justification doit nommer la tâche qu'elle décrit, en français. \
                 Couleurs autorisées : green, yellow, red.\n",
            );
        }
    }

    prompt
}

fn task_line(number: usize, task: &Task, now: DateTime<Utc>, language: Language) -> String {
    let priority = task.priority.label(language);
    match task.deadline {
        Some(deadline) => {
            let formatted = deadline.format(DEADLINE_FORMAT);
            let annotation = deadline_annotation(deadline, now, language);
            match language {
                Language::En => format!(
                    "{number}. \"{}\" - priority: {priority}, deadline: {formatted} ({annotation})",
                    task.title
                ),
                Language::Fr => format!(
                    "{number}. « {} » - priorité : {priority}, date limite : {formatted} ({annotation})",
                    task.title
                ),
            }
        }
        None => match language {
            Language::En => format!(
                "{number}. \"{}\" - priority: {priority}, no deadline",
                task.title
            ),
            Language::Fr => format!(
                "{number}. « {} » - priorité : {priority}, pas de date limite",
                task.title
            ),
        },
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

    fn task(id: i64, title: &str, deadline: Option<DateTime<Utc>>) -> Task {
        Task {
            id,
            title: title.to_string(),
            deadline,
            priority: TaskPriority::High,
            status: TaskStatus::Planned,
            completed_at: None,
        }
    }

    #[test]
    fn test_prompt_numbers_every_task() {
        let tasks = vec![
            task(10, "Write report", Some(now() + Duration::days(2))),
            task(11, "Book flights", None),
        ];

        let prompt = build_prompt(&tasks, now(), Language::En);
        assert!(prompt.contains("1. \"Write report\""));
        assert!(prompt.contains("2. \"Book flights\""));
        assert!(prompt.contains("no deadline"));
        assert!(prompt.contains("due in 2 days"));
        assert!(prompt.contains("prioritizedTaskIds"));
    }

    #[test]
    fn test_prompt_formats_deadline() {
        let deadline = Utc.with_ymd_and_hms(2026, 8, 9, 17, 30, 0).unwrap();
        let tasks = vec![task(1, "Submit form", Some(deadline))];

        let prompt = build_prompt(&tasks, now(), Language::En);
        assert!(prompt.contains("deadline: 2026-08-09 17:30"));
    }

    #[test]
    fn test_french_prompt_localized() {
        let tasks = vec![task(1, "Payer le loyer", Some(now() + Duration::hours(3)))];

        let prompt = build_prompt(&tasks, now(), Language::Fr);
        assert!(prompt.contains("« Payer le loyer »"));
        assert!(prompt.contains("à rendre aujourd'hui"));
        assert!(prompt.contains("en français"));
        assert!(prompt.contains("prioritizedTaskIds"));
    }
}
