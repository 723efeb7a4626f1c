//! The game session: one owner for the player, the obstacle stream, the
//! score, and the phase state machine.
//!
//! Frame order while playing:
//! 1. scroll obstacles
//! 2. score passed obstacles and recycle the ones off screen
//! 3. test obstacle collisions against the player's current position
//! 4. advance player physics
//! 5. test the floor against the new position
//!
//! The first collision ends the frame; the session then sits in
//! [`Phase::Cooldown`] until the countdown reaches zero.

use super::collision::{first_obstacle_collision, hits_floor, CollisionKind};
use super::countdown::{Countdown, CountdownHandle, CountdownStep};
use super::obstacles::{Obstacle, ObstacleStream};
use super::physics::PlayerEntity;
use super::scoring::Scoreboard;
use super::types::{GameEvent, Phase, Snapshot, TickResult};
use crate::core::config::{GameConfig, RecyclePolicy};
use crate::core::error::ConfigError;
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    phase: Phase,
    player: PlayerEntity,
    stream: ObstacleStream,
    scoreboard: Scoreboard,
    frame_index: u64,
    countdown: Countdown,
}

impl GameSession {
    /// Build a session on the start screen. `best_score` comes from the
    /// persistence layer. Fails if the config cannot produce a playable game.
    pub fn new(config: GameConfig, best_score: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = PlayerEntity::new(
            config.player_x(),
            config.start_y(),
            config.player_width,
            config.player_height,
        );
        Ok(Self {
            stream: ObstacleStream::empty(config.pitch),
            phase: Phase::Idle,
            player,
            scoreboard: Scoreboard::new(best_score),
            frame_index: 0,
            countdown: Countdown::new(),
            config,
        })
    }

    /// Start a game from the start screen or the restart-enabled game-over
    /// screen. Ignored while playing or during the countdown.
    pub fn start_session<R: Rng>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        match self.phase {
            Phase::Idle | Phase::GameOver => {
                self.reset(rng);
                vec![GameEvent::SessionStarted, GameEvent::Impulse]
            }
            Phase::Playing | Phase::Cooldown => Vec::new(),
        }
    }

    /// The restart control. Only acts once the countdown has finished.
    pub fn restart_session<R: Rng>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        if !self.phase.restart_enabled() {
            return Vec::new();
        }
        self.start_session(rng)
    }

    /// Tap, click, or space: starts, flaps, or restarts depending on phase.
    pub fn apply_input<R: Rng>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        if !self.phase.accepts_input() {
            return Vec::new();
        }
        if self.phase.is_playing() {
            self.player.apply_impulse(self.config.impulse_velocity);
            return vec![GameEvent::Impulse];
        }
        self.start_session(rng)
    }

    /// Advance one display frame.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> TickResult {
        let mut result = TickResult::default();
        self.frame_index += 1;

        if !self.phase.is_playing() {
            return result;
        }

        // ── 1. Scroll ───────────────────────────────────────────────
        self.stream.step(self.config.scroll_speed);

        // ── 2. Score and recycle ────────────────────────────────────
        let points = match self.config.recycle_policy {
            RecyclePolicy::ShiftAndAppend => self.stream.recycle(&self.config, rng),
            RecyclePolicy::MarkAndRegenerate => {
                let passed = self.stream.mark_passed(self.player.left());
                self.stream.recycle(&self.config, rng);
                passed
            }
        };
        for _ in 0..points {
            self.score_point(&mut result);
        }

        // ── 3. Obstacle collisions ──────────────────────────────────
        if let Some(kind) = first_obstacle_collision(&self.player, &self.stream) {
            result.events.extend(self.game_over(kind));
            return result;
        }

        // ── 4. Physics ──────────────────────────────────────────────
        let floor = self.config.floor();
        self.player.step(self.config.gravity, floor);

        // ── 5. Floor ────────────────────────────────────────────────
        if hits_floor(&self.player, floor) {
            result.events.extend(self.game_over(CollisionKind::Floor));
        }

        result
    }

    /// One tick of the 1 Hz countdown timer.
    pub fn countdown_tick(&mut self) -> Vec<GameEvent> {
        let steps = self.countdown.tick();
        self.apply_countdown_steps(steps)
    }

    /// A countdown tick from a host timer started for `handle`. Stale
    /// handles (from a countdown since replaced) are ignored.
    pub fn countdown_tick_for(&mut self, handle: CountdownHandle) -> Vec<GameEvent> {
        let steps = self.countdown.tick_for(handle);
        self.apply_countdown_steps(steps)
    }

    /// Feed wall-clock milliseconds to the countdown.
    pub fn advance_countdown(&mut self, dt_ms: u64) -> Vec<GameEvent> {
        let steps = self.countdown.advance(dt_ms);
        self.apply_countdown_steps(steps)
    }

    /// Handle of the countdown task currently owned by the session.
    pub fn countdown_handle(&self) -> CountdownHandle {
        self.countdown.handle()
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut player = self.player;
        if self.phase == Phase::Idle {
            player.x = self.config.playable_width / 2.0 - self.config.player_width / 2.0;
        }
        Snapshot {
            phase: self.phase,
            player,
            tilt_degrees: self.player.tilt_degrees(),
            obstacles: self.stream.to_vec(),
            current_score: self.scoreboard.current,
            best_score: self.scoreboard.best,
            countdown_remaining: self.countdown.remaining(),
            frame_index: self.frame_index,
            playable_width: self.config.playable_width,
            playable_height: self.config.playable_height,
            scroll_speed: self.config.scroll_speed,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &PlayerEntity {
        &self.player
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.stream.iter()
    }

    pub fn stream(&self) -> &ObstacleStream {
        &self.stream
    }

    pub fn current_score(&self) -> u32 {
        self.scoreboard.current
    }

    pub fn best_score(&self) -> u32 {
        self.scoreboard.best
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.countdown.cancel();
        self.scoreboard.reset_current();
        self.player = PlayerEntity::new(
            self.config.player_x(),
            self.config.start_y(),
            self.config.player_width,
            self.config.player_height,
        );
        // Every game opens with a flap
        self.player.apply_impulse(self.config.impulse_velocity);
        self.stream = ObstacleStream::generate_initial(&self.config, self.config.stream_size, rng);
        self.phase = Phase::Playing;
        debug!(best = self.scoreboard.best, "game started");
    }

    fn score_point(&mut self, result: &mut TickResult) {
        let step = self.scoreboard.increment(self.config.milestone_interval);
        result
            .events
            .push(GameEvent::ScoreIncrement { score: step.score });
        if step.milestone {
            result
                .events
                .push(GameEvent::Milestone { score: step.score });
        }
        if step.new_best {
            result
                .events
                .push(GameEvent::BestScoreImproved { best: step.score });
            result.best_score_changed = true;
        }
    }

    /// Playing -> Cooldown. No-op in any other phase.
    fn game_over(&mut self, kind: CollisionKind) -> Vec<GameEvent> {
        if !self.phase.is_playing() {
            return Vec::new();
        }
        self.phase = Phase::Cooldown;
        info!(
            score = self.scoreboard.current,
            best = self.scoreboard.best,
            ?kind,
            "game over"
        );

        let mut events = vec![GameEvent::Collision {
            kind,
            final_score: self.scoreboard.current,
            best_score: self.scoreboard.best,
            countdown: self.config.countdown_start,
        }];
        let (_, immediate) = self.countdown.start(self.config.countdown_start);
        events.extend(self.apply_countdown_steps(immediate.into_iter().collect()));
        events
    }

    fn apply_countdown_steps(&mut self, steps: Vec<CountdownStep>) -> Vec<GameEvent> {
        let mut events = Vec::with_capacity(steps.len());
        for step in steps {
            match step {
                CountdownStep::Tick { remaining } => {
                    events.push(GameEvent::CountdownTick { remaining });
                }
                CountdownStep::Complete => {
                    if self.phase == Phase::Cooldown {
                        self.phase = Phase::GameOver;
                        debug!("restart enabled");
                    }
                    events.push(GameEvent::CountdownComplete);
                }
            }
        }
        events
    }
}
