//! Record store implementations

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryRecordStore;
pub use json_file::JsonFileStore;
