//! Common test infrastructure
//!
//! Engine fixtures and shared constants for the end-to-end tests. Tests should
//! only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{seeded_engine, ALICE};
//!
//! #[test]
//! fn test_play_seeded_video() {
//!     let mut engine = seeded_engine();
//!     let id = engine.videos().next().unwrap().id;
//!     engine.play(id, &ALICE.into()).unwrap();
//! }
//! ```

#![allow(dead_code)]

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::{
    empty_engine, engine_with, path, publish_titles, seeded_engine, seeded_id, titles,
};
