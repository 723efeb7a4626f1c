//! Player physics: gravity integration, flap impulse, floor clamp.

use crate::core::constants::{MAX_TILT_DEGREES, TILT_PER_VELOCITY};
use serde::{Deserialize, Serialize};

/// The flying character. Positions are the top-left corner in pixels,
/// y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntity {
    pub x: f64,
    pub y: f64,
    /// Pixels per frame, positive = downward.
    pub velocity: f64,
    pub width: f64,
    pub height: f64,
}

impl PlayerEntity {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            width,
            height,
        }
    }

    /// Flap: velocity is overridden, not added to.
    pub fn apply_impulse(&mut self, impulse_velocity: f64) {
        self.velocity = impulse_velocity;
    }

    /// Advance one frame. The top edge is never clamped; the bottom stops at `floor`.
    pub fn step(&mut self, gravity: f64, floor: f64) {
        self.velocity += gravity;
        self.y = (self.y + self.velocity).min(floor);
    }

    pub fn is_on_floor(&self, floor: f64) -> bool {
        self.y >= floor
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Sprite rotation in degrees: nose up while rising, down while falling.
    pub fn tilt_degrees(&self) -> f64 {
        (self.velocity * TILT_PER_VELOCITY).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES)
    }
}
