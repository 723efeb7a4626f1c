// Playfield (a 431x768 canvas with a 50 px ground strip along the bottom)
pub const CANVAS_WIDTH: f64 = 431.0;
pub const CANVAS_HEIGHT: f64 = 768.0;
pub const GROUND_HEIGHT: f64 = 50.0;
pub const PLAYABLE_WIDTH: f64 = CANVAS_WIDTH;
pub const PLAYABLE_HEIGHT: f64 = CANVAS_HEIGHT - GROUND_HEIGHT;

// Player
pub const PLAYER_WIDTH: f64 = 60.0;
pub const PLAYER_HEIGHT: f64 = 60.0;
pub const PLAYER_COLUMN_DIVISOR: f64 = 10.0; // player flies at width / 10

// Physics (per frame)
pub const GRAVITY: f64 = 0.5;
pub const IMPULSE_VELOCITY: f64 = -11.5;
pub const SCROLL_SPEED: f64 = 6.2;

// Obstacles
pub const OBSTACLE_WIDTH: f64 = 78.0;
pub const GAP_HEIGHT: f64 = 270.0;
pub const OBSTACLE_PITCH: f64 = GAP_HEIGHT + OBSTACLE_WIDTH;
pub const STREAM_SIZE: usize = 3;
pub const GAP_MARGIN: f64 = OBSTACLE_WIDTH;

// Scoring and game over
pub const MILESTONE_INTERVAL: u32 = 5;
pub const COUNTDOWN_START: u32 = 4;
pub const COUNTDOWN_START_SHORT: u32 = 3;

// Tilt of the rotating-wing sprite
pub const TILT_PER_VELOCITY: f64 = 3.0;
pub const MAX_TILT_DEGREES: f64 = 30.0;

// Background parallax scrolls at a third of the obstacle speed
pub const PARALLAX_DIVISOR: f64 = 3.0;
pub const BACKGROUND_ZOOM: f64 = 1.8;

// Timing
pub const FRAME_INTERVAL_MS: u64 = 16; // ~60 FPS
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;

// Accounts
pub const MAX_USERNAME_LEN: usize = 20;
pub const LEADERBOARD_SIZE: usize = 10;
