//! Configuration, constants, and error types shared by the game and its adapters.

pub mod config;
pub mod constants;
pub mod error;

pub use config::*;
pub use constants::*;
pub use error::*;
