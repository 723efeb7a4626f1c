//! Best-score stores: the seam between the game loop and disk.
//!
//! The game never performs I/O. The host loads the best score once when a
//! session is created and calls [`BestScoreStore::save_best`] whenever a
//! tick reports an improvement.

use super::logic::UserRegistry;
use super::types::{GuestScores, LeaderboardEntry};
use crate::core::error::StoreResult;
use crate::utils::persistence::{flappy_dir, load_json_or_default, save_json};
use rand::Rng;
use std::io;
use std::path::{Path, PathBuf};

pub const USERS_FILE: &str = "users.json";
pub const GUEST_FILE: &str = "best_scores.json";

/// Reads and writes best scores for a user, or the guest when `user` is `None`.
pub trait BestScoreStore {
    fn load_best(&self, user: Option<&str>) -> u32;

    /// Record `score` if it beats the stored best.
    fn save_best(&mut self, user: Option<&str>, score: u32) -> StoreResult<()>;
}

/// JSON-file store under a data directory (normally ~/.flappy/).
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    registry: UserRegistry,
    guest: GuestScores,
}

impl FileStore {
    /// Open the store in ~/.flappy/.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::open(&flappy_dir()?))
    }

    /// Open the store in `dir`. Missing or corrupt files start empty.
    pub fn open(dir: &Path) -> Self {
        Self {
            registry: load_json_or_default(&dir.join(USERS_FILE)),
            guest: load_json_or_default(&dir.join(GUEST_FILE)),
            dir: dir.to_path_buf(),
        }
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    pub fn register<R: Rng>(
        &mut self,
        username: &str,
        password: &str,
        rng: &mut R,
    ) -> StoreResult<()> {
        self.registry.register(username, password, rng)?;
        self.save_users()
    }

    pub fn login(&mut self, username: &str, password: &str) -> StoreResult<String> {
        let name = self.registry.login(username, password)?.username.clone();
        self.save_users()?;
        Ok(name)
    }

    /// Forget the saved login. Writes only if someone was logged in.
    pub fn logout(&mut self) -> StoreResult<()> {
        if self.registry.current_user().is_none() {
            return Ok(());
        }
        self.registry.logout();
        self.save_users()
    }

    /// The user saved as logged in by an earlier `login`.
    pub fn current_user(&self) -> Option<String> {
        self.registry.current_user().map(|u| u.username.clone())
    }

    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.registry.leaderboard(limit)
    }

    fn save_users(&self) -> StoreResult<()> {
        save_json(&self.dir.join(USERS_FILE), &self.registry)?;
        Ok(())
    }
}

impl BestScoreStore for FileStore {
    fn load_best(&self, user: Option<&str>) -> u32 {
        match user {
            Some(name) => self.registry.best_for(name),
            None => self.guest.best_score,
        }
    }

    fn save_best(&mut self, user: Option<&str>, score: u32) -> StoreResult<()> {
        match user {
            Some(name) => {
                if self.registry.record_best(name, score)? {
                    self.save_users()?;
                }
            }
            None => {
                if score > self.guest.best_score {
                    self.guest.best_score = score;
                    save_json(&self.dir.join(GUEST_FILE), &self.guest)?;
                }
            }
        }
        Ok(())
    }
}

/// Guest-only store kept in memory, for tests and throwaway sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    pub best: u32,
}

impl BestScoreStore for MemoryStore {
    fn load_best(&self, _user: Option<&str>) -> u32 {
        self.best
    }

    fn save_best(&mut self, _user: Option<&str>, score: u32) -> StoreResult<()> {
        self.best = self.best.max(score);
        Ok(())
    }
}
