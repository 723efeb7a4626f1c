//! Terminal rendering. Reads a [`flappy::Snapshot`]; never touches the session.

pub mod game_common;
pub mod play_scene;

pub use play_scene::render_play;
