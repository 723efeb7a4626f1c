//! The game-loop simulation: physics, obstacle stream, collisions and
//! scoring, the restart countdown, and the session state machine.
//!
//! Nothing here touches a drawing surface, audio device, or file. Renderers
//! read a [`Snapshot`] each frame and react to [`GameEvent`]s.

pub mod collision;
pub mod countdown;
pub mod obstacles;
pub mod physics;
pub mod scoring;
pub mod session;
pub mod types;

pub use collision::CollisionKind;
pub use countdown::{Countdown, CountdownHandle, CountdownStep};
pub use obstacles::{Obstacle, ObstacleStream};
pub use physics::PlayerEntity;
pub use scoring::{ScoreStep, Scoreboard};
pub use session::GameSession;
pub use types::{GameEvent, Phase, Snapshot, TickResult};
