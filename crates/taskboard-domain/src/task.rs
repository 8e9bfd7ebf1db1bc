use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::uid;

/// A single task on the board. Containment lives on the owning column's
/// `task_ids`; tasks carry no back-pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
}

/// Input for editing a task's content fields.
#[derive(Debug, Clone)]
pub struct EditTask {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

impl Task {
    pub fn new(input: NewTask) -> Self {
        let now = Utc::now();
        Self {
            id: uid("task"),
            title: input.title.trim().to_string(),
            description: trim_optional(input.description),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit: trims fields and bumps `updated_at`. Containment is
    /// not a content field and is never touched here.
    pub fn apply_edit(&mut self, title: String, description: Option<String>) {
        self.title = title.trim().to_string();
        self.description = trim_optional(description);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let task = Task::new(NewTask {
            title: "  Buy milk  ".to_string(),
            description: Some("  2% please  ".to_string()),
        });
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description.as_deref(), Some("2% please"));
        assert_eq!(task.created_at, task.updated_at);
        assert!(task.id.starts_with("task_"));
    }

    #[test]
    fn test_apply_edit_bumps_updated_at() {
        let mut task = Task::new(NewTask {
            title: "Original".to_string(),
            description: None,
        });
        let created = task.created_at;
        task.apply_edit(" Edited ".to_string(), Some(" note ".to_string()));
        assert_eq!(task.title, "Edited");
        assert_eq!(task.description.as_deref(), Some("note"));
        assert_eq!(task.created_at, created);
        assert!(task.updated_at >= created);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let task = Task::new(NewTask {
            title: "Ship it".to_string(),
            description: None,
        });
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        // absent description is omitted entirely
        assert!(json.get("description").is_none());
    }
}
