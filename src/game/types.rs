//! Session phases, events, and the read-only snapshot handed to renderers.

use super::collision::CollisionKind;
use super::obstacles::Obstacle;
use super::physics::PlayerEntity;
use crate::core::constants::PARALLAX_DIVISOR;
use serde::{Deserialize, Serialize};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Start screen. Input starts a game.
    Idle,
    /// Simulation running. Input flaps.
    Playing,
    /// Crashed; the restart countdown is running and input is ignored.
    Cooldown,
    /// Crashed; the countdown finished and restart is enabled.
    GameOver,
}

impl Phase {
    /// Whether input does anything in this phase.
    pub fn accepts_input(self) -> bool {
        !matches!(self, Phase::Cooldown)
    }

    pub fn is_playing(self) -> bool {
        matches!(self, Phase::Playing)
    }

    pub fn restart_enabled(self) -> bool {
        matches!(self, Phase::GameOver)
    }

    /// Crashed, with or without the countdown still running.
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Cooldown | Phase::GameOver)
    }
}

/// A discrete event for the presentation layer (sounds, flashes, saves).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new game began (from the start screen or a restart).
    SessionStarted,
    /// The player flapped.
    Impulse,
    /// One obstacle passed.
    ScoreIncrement { score: u32 },
    /// Score reached a multiple of the milestone interval.
    Milestone { score: u32 },
    /// Best score went up and should be persisted.
    BestScoreImproved { best: u32 },
    /// The game ended.
    Collision {
        kind: CollisionKind,
        final_score: u32,
        best_score: u32,
        countdown: u32,
    },
    /// One second of the restart countdown elapsed.
    CountdownTick { remaining: u32 },
    /// The restart control is enabled.
    CountdownComplete,
}

/// Result of one frame.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events in the order they happened.
    pub events: Vec<GameEvent>,
    /// True if the best score rose this frame. The caller owns persistence.
    pub best_score_changed: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub player: PlayerEntity,
    pub tilt_degrees: f64,
    pub obstacles: Vec<Obstacle>,
    pub current_score: u32,
    pub best_score: u32,
    /// Value shown by the restart countdown (0 once restart is enabled).
    pub countdown_remaining: u32,
    pub frame_index: u64,
    pub playable_width: f64,
    pub playable_height: f64,
    pub scroll_speed: f64,
}

impl Snapshot {
    /// Horizontal offset of a background scrolled at a third of the obstacle
    /// speed and scaled by `zoom`.
    pub fn parallax_offset(&self, zoom: f64) -> f64 {
        let span = self.playable_width * zoom;
        if span <= 0.0 {
            return 0.0;
        }
        (self.frame_index as f64 * (self.scroll_speed / PARALLAX_DIVISOR)) % span
    }
}
