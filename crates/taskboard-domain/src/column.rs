use serde::{Deserialize, Serialize};
use taskboard_core::uid;

/// An ordered column of tasks. Order of `task_ids` is significant and is
/// the only record of task containment on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub task_ids: Vec<String>,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(uid("col"), title)
    }

    /// Construct with a fixed ID. Used by the seed state, which names its
    /// columns with stable well-known IDs.
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into().trim().to_string(),
            task_ids: Vec::new(),
        }
    }

    pub fn contains_task(&self, task_id: &str) -> bool {
        self.task_ids.iter().any(|id| id == task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_column_is_empty() {
        let col = Column::new("  Backlog  ");
        assert!(col.id.starts_with("col_"));
        assert_eq!(col.title, "Backlog");
        assert!(col.task_ids.is_empty());
    }

    #[test]
    fn test_contains_task() {
        let mut col = Column::with_id("col_todo", "To Do");
        assert!(!col.contains_task("task_a"));
        col.task_ids.push("task_a".to_string());
        assert!(col.contains_task("task_a"));
    }

    #[test]
    fn test_task_ids_default_on_deserialize() {
        let col: Column = serde_json::from_str(r#"{"id":"col_x","title":"X"}"#).unwrap();
        assert!(col.task_ids.is_empty());
    }
}
