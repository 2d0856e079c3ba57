//! Persistence: the key-value store seam and the save/load service.

pub mod store;
pub mod service;

pub use store::{KeyValueStore, MemoryStore};
pub use service::{StateService, HI_SCORE_KEY, STATE_KEY};
