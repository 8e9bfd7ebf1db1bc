pub mod actions;
pub mod board;
pub mod column;
pub mod intent;
pub mod task;

pub use actions::BoardActions;
pub use board::BoardState;
pub use column::Column;
pub use intent::DragIntent;
pub use task::{EditTask, NewTask, Task};
