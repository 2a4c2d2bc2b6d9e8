// Interface adapters: HTTP client, persisted stores and port implementations.

pub mod client;
pub mod clock;
pub mod protocol;
pub mod storage;
pub mod trackers;

pub use client::ApiClient;
pub use clock::SystemClock;
pub use storage::{FileStore, MemoryStore};
pub use trackers::{GenerationJobs, QuiltDesignJobs};
