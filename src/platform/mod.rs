//! Platform abstraction layer
//!
//! Everything the simulation consumes or produces at its boundary:
//! - Time (monotonic clock, wall-clock timestamps)
//! - Storage (key-value, LocalStorage on web)
//! - Player name prompt
//! - Render sink

pub mod input;
pub mod render;
pub mod storage;
pub mod time;

pub use input::NamePrompt;
pub use render::RenderSink;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{KeyValueStore, MemoryStore};
pub use time::{Clock, SystemClock, VirtualClock};
