//! Full board state: ordered columns plus the task table.
//!
//! `BoardState` is pure data with no UI dependencies. It is the unit of
//! local persistence, of change notifications, and of remote backup
//! payloads. Both fields default so older or partial snapshots still
//! deserialize.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: HashMap<String, Task>,
}

impl BoardState {
    /// The fixed bootstrap/reset state: three well-known empty columns.
    pub fn seed() -> Self {
        Self {
            columns: vec![
                Column::with_id("col_todo", "To Do"),
                Column::with_id("col_inprogress", "In Progress"),
                Column::with_id("col_done", "Done"),
            ],
            tasks: HashMap::new(),
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// Ownership is discovered by scanning columns; tasks hold no
    /// back-pointer to their column.
    pub fn column_of_task(&self, task_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.contains_task(task_id))
    }

    /// Check referential consistency: every listed task ID resolves, no
    /// task ID appears in two columns, and no stored task is orphaned.
    pub fn is_consistent(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        for column in &self.columns {
            for task_id in &column.task_ids {
                if !self.tasks.contains_key(task_id) || !seen.insert(task_id) {
                    return false;
                }
            }
        }
        seen.len() == self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{NewTask, Task};

    #[test]
    fn test_seed_shape() {
        let state = BoardState::seed();
        let titles: Vec<&str> = state.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["To Do", "In Progress", "Done"]);
        assert!(state.columns.iter().all(|c| c.task_ids.is_empty()));
        assert!(state.tasks.is_empty());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_column_of_task_scans_columns() {
        let mut state = BoardState::seed();
        let task = Task::new(NewTask {
            title: "Find me".to_string(),
            description: None,
        });
        let id = task.id.clone();
        state.tasks.insert(id.clone(), task);
        state.column_mut("col_inprogress").unwrap().task_ids.push(id.clone());

        assert_eq!(state.column_of_task(&id).unwrap().id, "col_inprogress");
        assert!(state.column_of_task("task_missing").is_none());
    }

    #[test]
    fn test_consistency_catches_dangling_reference() {
        let mut state = BoardState::seed();
        state
            .column_mut("col_todo")
            .unwrap()
            .task_ids
            .push("task_ghost".to_string());
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_consistency_catches_orphaned_task() {
        let mut state = BoardState::seed();
        let task = Task::new(NewTask {
            title: "Orphan".to_string(),
            description: None,
        });
        state.tasks.insert(task.id.clone(), task);
        assert!(!state.is_consistent());
    }
}
