//! Local accounts and best-score persistence.
//!
//! Users register with a name and password on this machine; each keeps a
//! best score that feeds the leaderboard. Without a login, scores go to a
//! single guest record.

pub mod logic;
pub mod store;
pub mod types;

pub use logic::*;
pub use store::*;
pub use types::*;
