//! Game configuration: every tunable the simulation reads, plus presets for
//! the shipped game variants.

use super::constants::*;
use super::error::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Height of the passable gap in each obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapHeight {
    /// Every obstacle in the stream has the same gap.
    Fixed(f64),
    /// Each obstacle draws its own gap uniformly from `[min, max]`.
    Range { min: f64, max: f64 },
}

impl GapHeight {
    pub fn min(&self) -> f64 {
        match *self {
            Self::Fixed(h) => h,
            Self::Range { min, .. } => min,
        }
    }

    pub fn max(&self) -> f64 {
        match *self {
            Self::Fixed(h) => h,
            Self::Range { max, .. } => max,
        }
    }

    /// Pick the gap height for a new obstacle.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Fixed(h) => h,
            Self::Range { min, max } if max > min => rng.gen_range(min..=max),
            Self::Range { min, .. } => min,
        }
    }
}

/// How passed obstacles leave the stream and when they score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecyclePolicy {
    /// Score when the leading obstacle leaves the screen, then drop it and
    /// append a fresh one behind the last.
    ShiftAndAppend,
    /// Score the moment the player clears an obstacle's trailing edge; the
    /// obstacle is replaced once it leaves the screen.
    MarkAndRegenerate,
}

/// All parameters of one game. Distances are pixels, rates are per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub gravity: f64,
    pub scroll_speed: f64,
    /// Velocity the player is set to on each flap (negative = upward).
    pub impulse_velocity: f64,
    pub playable_width: f64,
    /// Height above the ground strip.
    pub playable_height: f64,
    pub player_width: f64,
    pub player_height: f64,
    pub obstacle_width: f64,
    pub gap_height: GapHeight,
    /// Horizontal distance between the left edges of consecutive obstacles.
    pub pitch: f64,
    /// Number of obstacles alive in the stream at once.
    pub stream_size: usize,
    /// Minimum distance between a gap and the top or bottom of the playfield.
    pub gap_margin: f64,
    /// Seconds the restart control stays disabled after a crash.
    pub countdown_start: u32,
    /// Every this many points a milestone event fires.
    pub milestone_interval: u32,
    pub recycle_policy: RecyclePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            scroll_speed: SCROLL_SPEED,
            impulse_velocity: IMPULSE_VELOCITY,
            playable_width: PLAYABLE_WIDTH,
            playable_height: PLAYABLE_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GapHeight::Fixed(GAP_HEIGHT),
            pitch: OBSTACLE_PITCH,
            stream_size: STREAM_SIZE,
            gap_margin: GAP_MARGIN,
            countdown_start: COUNTDOWN_START,
            milestone_interval: MILESTONE_INTERVAL,
            recycle_policy: RecyclePolicy::ShiftAndAppend,
        }
    }
}

impl GameConfig {
    /// Lowest y the player's top edge can reach; resting here is a crash.
    pub fn floor(&self) -> f64 {
        self.playable_height - self.player_height
    }

    /// Left edge of the player while playing.
    pub fn player_x(&self) -> f64 {
        self.playable_width / PLAYER_COLUMN_DIVISOR
    }

    /// Player y at setup: vertically centred.
    pub fn start_y(&self) -> f64 {
        self.playable_height / 2.0 - self.player_height / 2.0
    }

    /// Inclusive bounds for `gap_start` given a gap of `gap_height`.
    pub fn gap_start_bounds(&self, gap_height: f64) -> (f64, f64) {
        (
            self.gap_margin,
            self.playable_height - gap_height - self.gap_margin,
        )
    }

    /// Check that the configuration can produce a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("gravity", self.gravity),
            ("scroll_speed", self.scroll_speed),
            ("playable_width", self.playable_width),
            ("playable_height", self.playable_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("pitch", self.pitch),
            ("gap_height", self.gap_height.min()),
        ] {
            // Written this way so NaN is rejected too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.gap_margin >= 0.0) {
            return Err(ConfigError::Negative {
                name: "gap_margin",
                value: self.gap_margin,
            });
        }
        if !(self.impulse_velocity < 0.0) {
            return Err(ConfigError::ImpulseNotUpward(self.impulse_velocity));
        }
        if self.stream_size == 0 {
            return Err(ConfigError::ZeroCount("stream_size"));
        }
        if self.milestone_interval == 0 {
            return Err(ConfigError::ZeroCount("milestone_interval"));
        }

        let (min_gap, max_gap) = (self.gap_height.min(), self.gap_height.max());
        if min_gap > max_gap {
            return Err(ConfigError::InvertedGapRange {
                min: min_gap,
                max: max_gap,
            });
        }
        if min_gap <= self.player_height {
            return Err(ConfigError::GapNotTraversable {
                gap_height: min_gap,
                player_height: self.player_height,
            });
        }
        let (lo, hi) = self.gap_start_bounds(max_gap);
        if hi < lo {
            return Err(ConfigError::GapDoesNotFit {
                gap_height: max_gap,
                margin: self.gap_margin,
                playable_height: self.playable_height,
            });
        }

        if self.pitch < self.obstacle_width {
            return Err(ConfigError::PitchTooSmall {
                pitch: self.pitch,
                width: self.obstacle_width,
            });
        }
        // A frame's scroll must stay below one pitch and must not carry an
        // obstacle across the player's band between two collision checks
        let sweep = self.obstacle_width + self.player_width;
        if self.scroll_speed > sweep || self.scroll_speed >= self.pitch {
            return Err(ConfigError::ScrollTooFast {
                speed: self.scroll_speed,
                limit: sweep.min(self.pitch),
            });
        }
        if self.player_height >= self.playable_height
            || self.player_x() + self.player_width > self.playable_width
        {
            return Err(ConfigError::PlayerDoesNotFit {
                width: self.player_width,
                height: self.player_height,
            });
        }
        Ok(())
    }

    /// Load a JSON config file. Missing fields take their default values.
    pub fn load_from_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// The shipped game variants. They differ only in parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Fixed gap, 4 second countdown, scores as obstacles leave the screen.
    Classic,
    /// Classic physics with the zoomed parallax background and a 3 second countdown.
    Zoomed,
    /// Rotating-wing sprite; scores when the player clears each obstacle.
    Winged,
    /// Per-obstacle gap sizes drawn from a range.
    Wide,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Classic,
        Variant::Zoomed,
        Variant::Winged,
        Variant::Wide,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Zoomed => "zoomed",
            Self::Winged => "winged",
            Self::Wide => "wide",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::UnknownVariant(name.to_string()))
    }

    pub fn config(&self) -> GameConfig {
        let base = GameConfig::default();
        match self {
            Self::Classic => base,
            Self::Zoomed => GameConfig {
                countdown_start: COUNTDOWN_START_SHORT,
                ..base
            },
            Self::Winged => GameConfig {
                countdown_start: COUNTDOWN_START_SHORT,
                recycle_policy: RecyclePolicy::MarkAndRegenerate,
                ..base
            },
            Self::Wide => GameConfig {
                gap_height: GapHeight::Range {
                    min: 200.0,
                    max: 300.0,
                },
                recycle_policy: RecyclePolicy::MarkAndRegenerate,
                ..base
            },
        }
    }

    /// Whether the renderer should tilt the player with its velocity.
    pub fn tilts(&self) -> bool {
        matches!(self, Self::Classic | Self::Winged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_all_variants_are_valid() {
        for v in Variant::ALL {
            assert_eq!(v.config().validate(), Ok(()), "variant {}", v.name());
        }
    }

    #[test]
    fn test_default_geometry() {
        let cfg = GameConfig::default();
        assert!((cfg.floor() - 658.0).abs() < f64::EPSILON);
        assert!((cfg.player_x() - 43.1).abs() < 1e-9);
        assert!((cfg.pitch - 348.0).abs() < f64::EPSILON);
        let (lo, hi) = cfg.gap_start_bounds(270.0);
        assert!((lo - 78.0).abs() < f64::EPSILON);
        assert!((hi - 370.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gap_too_tall_fails_fast() {
        let cfg = GameConfig {
            gap_height: GapHeight::Fixed(700.0),
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_scroll_faster_than_sweep_rejected() {
        let cfg = GameConfig {
            scroll_speed: 2000.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ScrollTooFast { .. })
        ));

        // Exactly obstacle + player width still overlaps the band once
        let edge = GameConfig {
            scroll_speed: OBSTACLE_WIDTH + PLAYER_WIDTH,
            ..GameConfig::default()
        };
        assert_eq!(edge.validate(), Ok(()));
        let over = GameConfig {
            scroll_speed: OBSTACLE_WIDTH + PLAYER_WIDTH + 0.5,
            ..GameConfig::default()
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_scroll_of_a_full_pitch_rejected() {
        let cfg = GameConfig {
            pitch: 100.0,
            scroll_speed: 100.0,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ScrollTooFast {
                speed: 100.0,
                limit: 100.0
            })
        );
    }

    #[test]
    fn test_gap_smaller_than_player_rejected() {
        let cfg = GameConfig {
            gap_height: GapHeight::Range {
                min: 50.0,
                max: 200.0,
            },
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::GapNotTraversable { .. })
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let cfg = GameConfig {
            gap_height: GapHeight::Range {
                min: 300.0,
                max: 200.0,
            },
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvertedGapRange { .. })
        ));
    }

    #[test]
    fn test_non_positive_and_nan_rejected() {
        let cfg = GameConfig {
            gravity: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { name: "gravity", .. })
        ));

        let cfg = GameConfig {
            scroll_speed: f64::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                name: "scroll_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_downward_impulse_rejected() {
        let cfg = GameConfig {
            impulse_velocity: 5.0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ImpulseNotUpward(5.0)));
    }

    #[test]
    fn test_zero_counts_rejected() {
        let cfg = GameConfig {
            stream_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCount("stream_size")));

        let cfg = GameConfig {
            milestone_interval: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroCount("milestone_interval"))
        );
    }

    #[test]
    fn test_pitch_smaller_than_obstacle_rejected() {
        let cfg = GameConfig {
            pitch: 50.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::PitchTooSmall { .. })
        ));
    }

    #[test]
    fn test_gap_sample_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let gap = GapHeight::Range {
            min: 200.0,
            max: 300.0,
        };
        for _ in 0..200 {
            let h = gap.sample(&mut rng);
            assert!((200.0..=300.0).contains(&h));
        }
        assert!((GapHeight::Fixed(270.0).sample(&mut rng) - 270.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_variant_from_name() {
        assert_eq!(Variant::from_name("Winged"), Ok(Variant::Winged));
        assert_eq!(Variant::from_name(" classic "), Ok(Variant::Classic));
        assert!(matches!(
            Variant::from_name("neon"),
            Err(ConfigError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_variant_countdowns_differ() {
        assert_eq!(Variant::Classic.config().countdown_start, 4);
        assert_eq!(Variant::Zoomed.config().countdown_start, 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{"gravity": 0.6}"#).unwrap();
        assert!((cfg.gravity - 0.6).abs() < f64::EPSILON);
        assert_eq!(cfg.stream_size, STREAM_SIZE);
        assert_eq!(cfg.recycle_policy, RecyclePolicy::ShiftAndAppend);
    }

    #[test]
    fn test_gap_height_json_shapes() {
        let cfg: GameConfig =
            serde_json::from_str(r#"{"gap_height": {"range": {"min": 180, "max": 260}}}"#)
                .unwrap();
        assert_eq!(
            cfg.gap_height,
            GapHeight::Range {
                min: 180.0,
                max: 260.0
            }
        );
        let cfg: GameConfig = serde_json::from_str(r#"{"gap_height": {"fixed": 250}}"#).unwrap();
        assert_eq!(cfg.gap_height, GapHeight::Fixed(250.0));
    }
}
