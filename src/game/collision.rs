//! Collision tests between the player, the obstacles, and the floor.
//!
//! Gap containment is exclusive: a player touching the gap edges exactly
//! is still inside; any positive overlap with the solid part collides.

use super::obstacles::{Obstacle, ObstacleStream};
use super::physics::PlayerEntity;
use serde::{Deserialize, Serialize};

/// What the player hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Index into the stream, leftmost = 0.
    Obstacle { index: usize },
    Floor,
}

/// The obstacle's columns share at least one x with the player (edges count).
pub fn overlaps_horizontally(player: &PlayerEntity, obstacle: &Obstacle) -> bool {
    obstacle.x <= player.right() && obstacle.trailing_edge() >= player.left()
}

/// The player's vertical extent is not fully inside the gap.
pub fn outside_gap(player: &PlayerEntity, obstacle: &Obstacle) -> bool {
    player.top() < obstacle.gap_start || player.bottom() > obstacle.gap_end()
}

pub fn hits_obstacle(player: &PlayerEntity, obstacle: &Obstacle) -> bool {
    overlaps_horizontally(player, obstacle) && outside_gap(player, obstacle)
}

pub fn hits_floor(player: &PlayerEntity, floor: f64) -> bool {
    player.is_on_floor(floor)
}

/// First obstacle in stream order the player collides with.
pub fn first_obstacle_collision(
    player: &PlayerEntity,
    stream: &ObstacleStream,
) -> Option<CollisionKind> {
    stream
        .iter()
        .position(|o| hits_obstacle(player, o))
        .map(|index| CollisionKind::Obstacle { index })
}
