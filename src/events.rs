//! Maps [`GameEvent`]s to HUD flashes and the terminal bell.
//!
//! This is a binary-only module (not part of `lib.rs`): it bridges pure
//! game events to terminal presentation. It stands in for the sound effects
//! of the graphical game (jump, score chime, crash).

use flappy::game::CollisionKind;
use flappy::{GameEvent, Variant};
use ratatui::style::Color;

/// Frames a flash message stays on screen (~0.8s at 60 FPS).
const FLASH_FRAMES: u32 = 48;

/// A short-lived status message.
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub text: String,
    pub color: Color,
    pub frames_left: u32,
}

/// Presentation state that is not part of the simulation.
#[derive(Debug, Clone)]
pub struct Hud {
    pub flash: Option<Flash>,
    pub username: Option<String>,
    pub variant: Variant,
    /// Frames since the last flap, for the wing animation.
    pub frames_since_flap: u32,
}

impl Hud {
    pub fn new(username: Option<String>, variant: Variant) -> Self {
        Self {
            flash: None,
            username,
            variant,
            frames_since_flap: u32::MAX,
        }
    }

    /// Age the flash and the wing animation by one frame.
    pub fn tick(&mut self) {
        self.frames_since_flap = self.frames_since_flap.saturating_add(1);
        if let Some(flash) = &mut self.flash {
            flash.frames_left = flash.frames_left.saturating_sub(1);
            if flash.frames_left == 0 {
                self.flash = None;
            }
        }
    }

    fn show(&mut self, text: String, color: Color) {
        self.flash = Some(Flash {
            text,
            color,
            frames_left: FLASH_FRAMES,
        });
    }
}

/// Apply events to the HUD. Returns true if the bell should ring.
pub fn apply_game_events(hud: &mut Hud, events: &[GameEvent]) -> bool {
    let mut ring = false;
    for event in events {
        match event {
            GameEvent::SessionStarted => {
                hud.flash = None;
            }
            GameEvent::Impulse => {
                hud.frames_since_flap = 0;
            }
            GameEvent::ScoreIncrement { score } => {
                hud.show(format!("+1  ({})", score), Color::Green);
            }
            GameEvent::Milestone { score } => {
                hud.show(format!("\u{2605} {} points!", score), Color::Yellow);
                ring = true;
            }
            GameEvent::BestScoreImproved { .. } => {
                // Persistence is handled by the caller via TickResult
            }
            GameEvent::Collision { kind, .. } => {
                let text = match kind {
                    CollisionKind::Floor => "Hit the ground!",
                    CollisionKind::Obstacle { .. } => "Hit a pipe!",
                };
                hud.show(text.to_string(), Color::Red);
                ring = true;
            }
            GameEvent::CountdownTick { .. } => {}
            GameEvent::CountdownComplete => {
                hud.show("Ready to restart".to_string(), Color::Cyan);
            }
        }
    }
    ring
}
