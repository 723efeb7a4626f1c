//! Error types for configuration and the persistence adapters.
//!
//! The simulation itself never fails: collisions and boundary breaches are
//! game-state transitions. Only malformed configuration and storage I/O
//! surface as errors.

/// A game configuration that cannot produce a playable session.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A dimension or rate that must be strictly positive is not.
    #[error("{name} must be greater than zero (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    /// A margin that must not be negative is.
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f64 },

    /// The impulse must point upward (negative velocity).
    #[error("impulse velocity must be negative (got {0})")]
    ImpulseNotUpward(f64),

    /// No gap start position keeps the whole gap inside the playable area.
    #[error(
        "gap of {gap_height} px with {margin} px margins does not fit in a playable height of {playable_height} px"
    )]
    GapDoesNotFit {
        gap_height: f64,
        margin: f64,
        playable_height: f64,
    },

    /// The gap is too small for the player to pass through.
    #[error("gap height {gap_height} px is not larger than the player height {player_height} px")]
    GapNotTraversable {
        gap_height: f64,
        player_height: f64,
    },

    /// A ranged gap with min above max.
    #[error("gap range is inverted (min {min} > max {max})")]
    InvertedGapRange { min: f64, max: f64 },

    /// Obstacles spaced closer than their own width would overlap.
    #[error("obstacle pitch {pitch} px is smaller than obstacle width {width} px")]
    PitchTooSmall { pitch: f64, width: f64 },

    /// Obstacles would move far enough in one frame to skip over the player
    /// or past a whole pitch.
    #[error("scroll speed {speed} px/frame exceeds the limit of {limit} px/frame")]
    ScrollTooFast { speed: f64, limit: f64 },

    /// The player does not fit in the playable area.
    #[error("player ({width}x{height}) does not fit in the playable area")]
    PlayerDoesNotFit { width: f64, height: f64 },

    /// A count that must be at least one is zero.
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),

    /// Unknown variant name on the command line or in a config file.
    #[error("unknown variant '{0}'")]
    UnknownVariant(String),
}

/// Errors raised by the score and account stores.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A save file could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Username empty, too long, or containing control characters.
    #[error("invalid username '{0}'")]
    InvalidUsername(String),

    /// Empty password.
    #[error("password must not be empty")]
    EmptyPassword,

    /// Registration of a name already taken (case-insensitive).
    #[error("user '{0}' already exists")]
    UserExists(String),

    /// Login with an unknown username.
    #[error("no such user '{0}'")]
    UnknownUser(String),

    /// Login with the wrong password.
    #[error("wrong password for '{0}'")]
    WrongPassword(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages_are_descriptive() {
        let err = ConfigError::GapDoesNotFit {
            gap_height: 700.0,
            margin: 78.0,
            playable_height: 718.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("700"));
        assert!(msg.contains("718"));

        let err = ConfigError::NonPositive {
            name: "gravity",
            value: 0.0,
        };
        assert!(err.to_string().starts_with("gravity"));
    }

    #[test]
    fn test_store_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
