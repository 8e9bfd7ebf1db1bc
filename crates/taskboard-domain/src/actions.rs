use taskboard_core::BoardResult;

use crate::board::BoardState;
use crate::column::Column;
use crate::task::{EditTask, NewTask, Task};

/// The fixed action interface the presentation layer dispatches through.
/// Adding a method here forces every implementation to add it.
///
/// Missing IDs report `BoardError::NotFound` and out-of-range removal
/// indices report `BoardError::IndexOutOfRange`; insertion indices clamp
/// to `[0, len]`. Errors never leave state partially mutated.
pub trait BoardActions {
    /// The fixed state shape the presentation layer reads.
    fn board(&self) -> &BoardState;

    /// Create a task at the end of `column_id`. Title and description are
    /// trimmed; both timestamps are set to creation time.
    fn add_task(&mut self, column_id: &str, input: NewTask) -> BoardResult<Task>;

    /// Update a task's content fields, bumping `updated_at`. Containment
    /// is unchanged.
    fn edit_task(&mut self, input: EditTask) -> BoardResult<Task>;

    /// Remove a task from the board and from its owning column.
    fn delete_task(&mut self, task_id: &str) -> BoardResult<()>;

    /// Move a task to another column, inserting at `to_index` (clamped).
    /// A same-column move is a caller error; use
    /// `reorder_task_within_column`.
    fn move_task(&mut self, task_id: &str, to_column_id: &str, to_index: usize) -> BoardResult<()>;

    /// Reposition a task inside one column.
    fn reorder_task_within_column(
        &mut self,
        column_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> BoardResult<()>;

    /// Reposition a column in the top-level column sequence.
    fn reorder_columns(&mut self, from_index: usize, to_index: usize) -> BoardResult<()>;

    /// Append a new empty column.
    fn add_column(&mut self, title: &str) -> BoardResult<Column>;

    /// Rename a column. Renaming to the current title is a pure no-op:
    /// no notification, no persistence, no revision bump.
    fn rename_column(&mut self, column_id: &str, title: &str) -> BoardResult<()>;

    /// Remove a column and cascade-delete every task it contained.
    fn delete_column(&mut self, column_id: &str) -> BoardResult<()>;

    /// Replace the whole board with the fixed seed state.
    fn reset_demo(&mut self);

    /// Wholesale state replacement used by restore. Trusts the caller.
    fn replace_board_state(&mut self, state: BoardState);
}
