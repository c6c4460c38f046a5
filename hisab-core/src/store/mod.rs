mod file_store;
mod memory_store;
mod record_store;
mod save_flow;
mod store_paths;
mod subscribers;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use record_store::RecordStore;
pub use save_flow::{SaveOutcome, save_record};
pub use store_paths::month_file;
