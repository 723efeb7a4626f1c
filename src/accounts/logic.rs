//! User registry: registration, login, per-user best scores, leaderboard.

use super::types::{LeaderboardEntry, UserRecord};
use crate::core::constants::MAX_USERNAME_LEN;
use crate::core::error::{StoreError, StoreResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRegistry {
    users: Vec<UserRecord>,
    /// Username of the logged-in user, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current: Option<String>,
}

/// Trim and check a username: 1 to 20 characters, no control characters.
pub fn normalize_username(raw: &str) -> StoreResult<String> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN || name.chars().any(char::is_control) {
        return Err(StoreError::InvalidUsername(raw.to_string()));
    }
    Ok(name.to_string())
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user. Names are unique ignoring case.
    pub fn register<R: Rng>(
        &mut self,
        username: &str,
        password: &str,
        rng: &mut R,
    ) -> StoreResult<&UserRecord> {
        let name = normalize_username(username)?;
        if password.is_empty() {
            return Err(StoreError::EmptyPassword);
        }
        if self.find(&name).is_some() {
            return Err(StoreError::UserExists(name));
        }
        self.users.push(UserRecord::new(&name, password, rng));
        Ok(&self.users[self.users.len() - 1])
    }

    /// Check credentials and make the user current.
    pub fn login(&mut self, username: &str, password: &str) -> StoreResult<&UserRecord> {
        let name = normalize_username(username)?;
        let index = self
            .users
            .iter()
            .position(|u| u.username.eq_ignore_ascii_case(&name))
            .ok_or_else(|| StoreError::UnknownUser(name.clone()))?;
        if !self.users[index].verify_password(password) {
            return Err(StoreError::WrongPassword(name));
        }
        self.current = Some(self.users[index].username.clone());
        Ok(&self.users[index])
    }

    pub fn logout(&mut self) {
        self.current = None;
    }

    pub fn current_user(&self) -> Option<&UserRecord> {
        self.current.as_deref().and_then(|name| self.find(name))
    }

    pub fn find(&self, username: &str) -> Option<&UserRecord> {
        let name = username.trim();
        self.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(name))
    }

    /// Best score of a user, 0 for unknown users.
    pub fn best_for(&self, username: &str) -> u32 {
        self.find(username).map_or(0, |u| u.best_score)
    }

    /// Raise a user's best score. Returns true if it changed.
    pub fn record_best(&mut self, username: &str, score: u32) -> StoreResult<bool> {
        let name = username.trim();
        let user = self
            .users
            .iter_mut()
            .find(|u| u.username.eq_ignore_ascii_case(name))
            .ok_or_else(|| StoreError::UnknownUser(name.to_string()))?;
        if score > user.best_score {
            user.best_score = score;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Top `limit` users by best score, ties broken by name.
    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<&UserRecord> = self.users.iter().collect();
        ranked.sort_by(|a, b| {
            b.best_score
                .cmp(&a.best_score)
                .then_with(|| a.username.to_lowercase().cmp(&b.username.to_lowercase()))
        });
        ranked
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, u)| LeaderboardEntry {
                rank: i + 1,
                username: u.username.clone(),
                best_score: u.best_score,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
