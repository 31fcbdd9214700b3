//! Storage layer for the buyback wizard
//!
//! Provides JSON file storage with atomic writes, the key/value port the
//! wizard persists its progress through, and the local store of submitted
//! sell requests.

pub mod file_io;
pub mod kv;
pub mod submissions;

pub use file_io::{read_json, write_json_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use submissions::SubmissionRepository;
