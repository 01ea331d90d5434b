//! Engagement coordinator: the engine context object and the views it returns.

mod coordinator;
mod seed;
mod shared;
mod snapshot;

pub use coordinator::Engine;
pub use shared::SharedEngine;
pub use snapshot::{EngagementSnapshot, EngineStats, HistorySnapshot};
