//! Obstacle stream: a fixed-size queue of gap obstacles scrolling left.

use crate::core::config::GameConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single obstacle (top and bottom column with a gap between them).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge of the passable gap.
    pub gap_start: f64,
    pub gap_height: f64,
    pub width: f64,
    /// Whether the player has cleared this obstacle (mark-and-regenerate scoring).
    pub passed: bool,
}

impl Obstacle {
    /// Create an obstacle at `x` with a random gap that fits inside the
    /// playfield margins.
    pub fn random<R: Rng>(x: f64, config: &GameConfig, rng: &mut R) -> Self {
        let gap_height = config.gap_height.sample(rng);
        let (lo, hi) = config.gap_start_bounds(gap_height);
        let gap_start = if hi > lo { rng.gen_range(lo..=hi) } else { lo };
        Self {
            x,
            gap_start,
            gap_height,
            width: config.obstacle_width,
            passed: false,
        }
    }

    pub fn trailing_edge(&self) -> f64 {
        self.x + self.width
    }

    pub fn gap_end(&self) -> f64 {
        self.gap_start + self.gap_height
    }

    /// Fully scrolled past the left edge of the playfield.
    pub fn is_offscreen(&self) -> bool {
        self.trailing_edge() <= 0.0
    }
}

/// Ordered obstacles, leftmost first, all `pitch` apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleStream {
    obstacles: VecDeque<Obstacle>,
    pitch: f64,
}

impl ObstacleStream {
    /// A stream with no obstacles yet (before the first game starts).
    pub fn empty(pitch: f64) -> Self {
        Self {
            obstacles: VecDeque::new(),
            pitch,
        }
    }

    /// Place `n` obstacles starting just off the right edge.
    pub fn generate_initial<R: Rng>(config: &GameConfig, n: usize, rng: &mut R) -> Self {
        let obstacles = (0..n)
            .map(|i| Obstacle::random(config.playable_width + i as f64 * config.pitch, config, rng))
            .collect();
        Self {
            obstacles,
            pitch: config.pitch,
        }
    }

    /// Scroll every obstacle left by `speed`.
    pub fn step(&mut self, speed: f64) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Drop obstacles that left the screen, appending a fresh one one pitch
    /// behind the last for each. Returns how many were replaced.
    pub fn recycle<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) -> u32 {
        let mut replaced = 0;
        while self.obstacles.front().is_some_and(Obstacle::is_offscreen) {
            self.obstacles.pop_front();
            let next_x = match self.obstacles.back() {
                Some(last) => last.x + self.pitch,
                // Single-obstacle stream: the replacement keeps the same spacing
                // relative to the one that just left.
                None => config.playable_width.max(self.pitch),
            };
            self.obstacles.push_back(Obstacle::random(next_x, config, rng));
            replaced += 1;
        }
        replaced
    }

    /// Flag obstacles whose trailing edge the player has cleared. Returns
    /// how many were newly passed.
    pub fn mark_passed(&mut self, player_left: f64) -> u32 {
        let mut newly_passed = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.trailing_edge() < player_left {
                obstacle.passed = true;
                newly_passed += 1;
            }
        }
        newly_passed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    #[cfg(test)]
    pub(crate) fn obstacles_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.obstacles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn first(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    pub fn last(&self) -> Option<&Obstacle> {
        self.obstacles.back()
    }

    /// Positions as a plain vector, for snapshots.
    pub fn to_vec(&self) -> Vec<Obstacle> {
        self.obstacles.iter().copied().collect()
    }
}
