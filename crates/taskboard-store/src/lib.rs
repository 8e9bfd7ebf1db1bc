pub mod persist;
pub mod store;

pub use persist::{spawn_save_task, AtomicWriter, JsonFileStore, STORAGE_NAME};
pub use store::{BoardStore, StoreChange};
