//! Flappy - side-scrolling gap runner
//!
//! This crate exposes the game simulation and its persistence adapters. The
//! terminal frontend lives in the binary.

pub mod accounts;
pub mod core;
pub mod game;
pub mod utils;

pub use crate::core::config::{GameConfig, GapHeight, RecyclePolicy, Variant};
pub use crate::core::error::{ConfigError, StoreError};
pub use game::{GameEvent, GameSession, Phase, Snapshot, TickResult};
