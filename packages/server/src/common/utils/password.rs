use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// A salted SHA-256 password digest as stored on an account row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub hash: String,
    pub salt: String,
}

impl PasswordHash {
    /// Hash a plaintext password under a freshly generated salt.
    pub fn generate(password: &str) -> Self {
        let salt: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SALT_LEN)
            .map(char::from)
            .collect();

        Self {
            hash: digest(&salt, password),
            salt,
        }
    }

    /// Check a plaintext candidate against a stored hash and salt.
    pub fn verify(password: &str, hash: &str, salt: &str) -> bool {
        constant_time_eq(digest(salt, password).as_bytes(), hash.as_bytes())
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
