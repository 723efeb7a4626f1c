//! Account and leaderboard data structures.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A registered player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Hex SHA-256 of `salt || password`.
    pub password_hash: String,
    pub salt: String,
    pub best_score: u32,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new<R: Rng>(username: &str, password: &str, rng: &mut R) -> Self {
        let salt_bytes: [u8; 16] = rng.gen();
        let salt = to_hex(&salt_bytes);
        Self {
            username: username.to_string(),
            password_hash: hash_password(&salt, password),
            salt,
            best_score: 0,
            created_at: Utc::now(),
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based.
    pub rank: usize,
    pub username: String,
    pub best_score: u32,
}

/// Best score of the guest (not logged in) player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestScores {
    pub best_score: u32,
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_password_not_stored_in_plaintext() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let user = UserRecord::new("ada", "hunter2", &mut rng);
        assert!(!user.password_hash.contains("hunter2"));
        assert_eq!(user.password_hash.len(), 64);
        assert_eq!(user.salt.len(), 32);
    }

    #[test]
    fn test_verify_password() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let user = UserRecord::new("ada", "hunter2", &mut rng);
        assert!(user.verify_password("hunter2"));
        assert!(!user.verify_password("hunter3"));
    }

    #[test]
    fn test_same_password_different_salt() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let a = UserRecord::new("a", "pw", &mut rng);
        let b = UserRecord::new("b", "pw", &mut rng);
        assert_ne!(a.password_hash, b.password_hash);
    }
}
