//! Drag-gesture outcomes as data.
//!
//! The UI layer detects gestures and computes where something was dropped;
//! this module translates that outcome into store action calls. It is the
//! full extent of the drag/drop contract with the presentation layer.

use taskboard_core::BoardResult;

use crate::actions::BoardActions;

/// Where a completed drag gesture landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragIntent {
    /// A task card dropped onto a column at a position.
    MoveTask {
        task_id: String,
        to_column_id: String,
        to_index: usize,
    },
    /// A task card dropped elsewhere in its own column.
    ReorderTask {
        column_id: String,
        from_index: usize,
        to_index: usize,
    },
    /// A column header dropped at a new position.
    ReorderColumns { from_index: usize, to_index: usize },
}

/// Dispatch a drag intent onto the action interface.
///
/// A `MoveTask` whose target is the task's current column is normalized to
/// a within-column reorder, so gesture code never has to special-case the
/// same-column drop.
pub fn resolve(actions: &mut impl BoardActions, intent: DragIntent) -> BoardResult<()> {
    match intent {
        DragIntent::MoveTask {
            task_id,
            to_column_id,
            to_index,
        } => {
            let same_column = actions
                .board()
                .column_of_task(&task_id)
                .filter(|c| c.id == to_column_id)
                .map(|c| {
                    let from_index = c
                        .task_ids
                        .iter()
                        .position(|id| *id == task_id)
                        .unwrap_or_default();
                    (c.id.clone(), from_index)
                });
            match same_column {
                Some((column_id, from_index)) => {
                    actions.reorder_task_within_column(&column_id, from_index, to_index)
                }
                None => actions.move_task(&task_id, &to_column_id, to_index),
            }
        }
        DragIntent::ReorderTask {
            column_id,
            from_index,
            to_index,
        } => actions.reorder_task_within_column(&column_id, from_index, to_index),
        DragIntent::ReorderColumns {
            from_index,
            to_index,
        } => actions.reorder_columns(from_index, to_index),
    }
}
