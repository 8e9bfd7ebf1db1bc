//! Single source of truth for the board.
//!
//! `BoardStore` owns the authoritative `BoardState` and is its only
//! writer. Every successful structural mutation:
//! - bumps a monotonic revision counter (the change-detection signal
//!   subscribers compare instead of reference equality),
//! - broadcasts a `StoreChange` carrying the old and new state,
//! - queues the new state on the save channel for the background
//!   persistence task.
//!
//! Mutations run synchronously; validation happens before any state is
//! touched, so an error never leaves the board partially mutated.

use tokio::sync::{broadcast, mpsc};

use taskboard_core::{BoardError, BoardResult};
use taskboard_domain::{BoardActions, BoardState, Column, EditTask, NewTask, Task};

use crate::persist::JsonFileStore;

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Notification payload for one applied mutation.
#[derive(Debug, Clone)]
pub struct StoreChange {
    pub previous: BoardState,
    pub current: BoardState,
    pub revision: u64,
}

pub struct BoardStore {
    state: BoardState,
    revision: u64,
    change_tx: broadcast::Sender<StoreChange>,
    save_tx: Option<mpsc::UnboundedSender<BoardState>>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::with_state(BoardState::seed())
    }

    pub fn with_state(state: BoardState) -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state,
            revision: 0,
            change_tx,
            save_tx: None,
        }
    }

    /// Load the persisted board, falling back to the seed state when the
    /// file is missing or unreadable.
    pub async fn load_or_seed(file: &JsonFileStore) -> Self {
        if !file.exists().await {
            tracing::info!("no local board state at {}, seeding", file.path().display());
            return Self::new();
        }
        match file.load().await {
            Ok(state) => Self::with_state(state),
            Err(e) => {
                tracing::warn!("failed to load local board state, seeding: {e}");
                Self::new()
            }
        }
    }

    /// Subscribe to mutation notifications, observed strictly in the
    /// order mutations were applied.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.change_tx.subscribe()
    }

    /// Open the save channel and return its receiver, to be handed to
    /// `persist::spawn_save_task`. Until this is called, mutations are
    /// not persisted.
    pub fn save_channel(&mut self) -> mpsc::UnboundedReceiver<BoardState> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.save_tx = Some(tx);
        rx
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn commit(&mut self, previous: BoardState) {
        self.revision += 1;
        tracing::debug!(revision = self.revision, "board state changed");
        let change = StoreChange {
            previous,
            current: self.state.clone(),
            revision: self.revision,
        };
        // No receivers is fine; notifications are best-effort.
        let _ = self.change_tx.send(change);
        if let Some(tx) = &self.save_tx {
            if tx.send(self.state.clone()).is_err() {
                tracing::warn!("save channel closed, state change not persisted");
            }
        }
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_insert(index: usize, len: usize) -> usize {
    index.min(len)
}

impl BoardActions for BoardStore {
    fn board(&self) -> &BoardState {
        &self.state
    }

    fn add_task(&mut self, column_id: &str, input: NewTask) -> BoardResult<Task> {
        if self.state.column(column_id).is_none() {
            return Err(BoardError::NotFound(format!("column {column_id}")));
        }
        let task = Task::new(input);
        let previous = self.state.clone();
        self.state.tasks.insert(task.id.clone(), task.clone());
        // checked above
        if let Some(column) = self.state.column_mut(column_id) {
            column.task_ids.push(task.id.clone());
        }
        self.commit(previous);
        Ok(task)
    }

    fn edit_task(&mut self, input: EditTask) -> BoardResult<Task> {
        if !self.state.tasks.contains_key(&input.id) {
            return Err(BoardError::NotFound(format!("task {}", input.id)));
        }
        let previous = self.state.clone();
        let task = self
            .state
            .tasks
            .get_mut(&input.id)
            .map(|t| {
                t.apply_edit(input.title, input.description);
                t.clone()
            })
            .ok_or_else(|| BoardError::NotFound(format!("task {}", input.id)))?;
        self.commit(previous);
        Ok(task)
    }

    fn delete_task(&mut self, task_id: &str) -> BoardResult<()> {
        if !self.state.tasks.contains_key(task_id) {
            return Err(BoardError::NotFound(format!("task {task_id}")));
        }
        let previous = self.state.clone();
        self.state.tasks.remove(task_id);
        for column in &mut self.state.columns {
            column.task_ids.retain(|id| id != task_id);
        }
        self.commit(previous);
        Ok(())
    }

    fn move_task(&mut self, task_id: &str, to_column_id: &str, to_index: usize) -> BoardResult<()> {
        let from_column_id = self
            .state
            .column_of_task(task_id)
            .map(|c| c.id.clone())
            .ok_or_else(|| BoardError::NotFound(format!("task {task_id} in any column")))?;
        if self.state.column(to_column_id).is_none() {
            return Err(BoardError::NotFound(format!("column {to_column_id}")));
        }
        if from_column_id == to_column_id {
            return Err(BoardError::Validation(format!(
                "task {task_id} is already in column {to_column_id}; use reorder_task_within_column"
            )));
        }
        let previous = self.state.clone();
        if let Some(source) = self.state.column_mut(&from_column_id) {
            source.task_ids.retain(|id| id != task_id);
        }
        if let Some(target) = self.state.column_mut(to_column_id) {
            let index = clamp_insert(to_index, target.task_ids.len());
            target.task_ids.insert(index, task_id.to_string());
        }
        self.commit(previous);
        Ok(())
    }

    fn reorder_task_within_column(
        &mut self,
        column_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> BoardResult<()> {
        let len = self
            .state
            .column(column_id)
            .map(|c| c.task_ids.len())
            .ok_or_else(|| BoardError::NotFound(format!("column {column_id}")))?;
        if from_index >= len {
            return Err(BoardError::IndexOutOfRange {
                what: "task_ids",
                index: from_index,
                len,
            });
        }
        let previous = self.state.clone();
        if let Some(column) = self.state.column_mut(column_id) {
            let task_id = column.task_ids.remove(from_index);
            let index = clamp_insert(to_index, column.task_ids.len());
            column.task_ids.insert(index, task_id);
        }
        self.commit(previous);
        Ok(())
    }

    fn reorder_columns(&mut self, from_index: usize, to_index: usize) -> BoardResult<()> {
        let len = self.state.columns.len();
        if from_index >= len {
            return Err(BoardError::IndexOutOfRange {
                what: "columns",
                index: from_index,
                len,
            });
        }
        let previous = self.state.clone();
        let column = self.state.columns.remove(from_index);
        let index = clamp_insert(to_index, self.state.columns.len());
        self.state.columns.insert(index, column);
        self.commit(previous);
        Ok(())
    }

    fn add_column(&mut self, title: &str) -> BoardResult<Column> {
        let column = Column::new(title);
        let previous = self.state.clone();
        self.state.columns.push(column.clone());
        self.commit(previous);
        Ok(column)
    }

    fn rename_column(&mut self, column_id: &str, title: &str) -> BoardResult<()> {
        let trimmed = title.trim();
        let current = self
            .state
            .column(column_id)
            .map(|c| c.title.clone())
            .ok_or_else(|| BoardError::NotFound(format!("column {column_id}")))?;
        if current == trimmed {
            // Unchanged title: skip the update entirely so subscribers see
            // no spurious change and no backup is scheduled.
            return Ok(());
        }
        let previous = self.state.clone();
        if let Some(column) = self.state.column_mut(column_id) {
            column.title = trimmed.to_string();
        }
        self.commit(previous);
        Ok(())
    }

    fn delete_column(&mut self, column_id: &str) -> BoardResult<()> {
        let position = self
            .state
            .columns
            .iter()
            .position(|c| c.id == column_id)
            .ok_or_else(|| BoardError::NotFound(format!("column {column_id}")))?;
        let previous = self.state.clone();
        let column = self.state.columns.remove(position);
        for task_id in &column.task_ids {
            self.state.tasks.remove(task_id);
        }
        self.commit(previous);
        Ok(())
    }

    fn reset_demo(&mut self) {
        let previous = self.state.clone();
        self.state = BoardState::seed();
        self.commit(previous);
    }

    fn replace_board_state(&mut self, state: BoardState) {
        let previous = self.state.clone();
        self.state = state;
        self.commit(previous);
    }
}
