pub mod atomic_writer;
pub mod json_file_store;
pub mod save_task;

pub use atomic_writer::AtomicWriter;
pub use json_file_store::{JsonFileStore, STORAGE_NAME};
pub use save_task::spawn_save_task;
