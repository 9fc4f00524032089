//! Password hashing, verification and generation.
//!
//! Hashes use bcrypt. Generated passwords come from the operating system
//! CSPRNG and always contain at least one lowercase letter, one uppercase
//! letter, one digit and one symbol.

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};
use rand::Rng;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;

use crate::errors::AppError;

/// Lowest bcrypt cost accepted by [`hash_password_with_cost`].
pub const MIN_COST: u32 = 4;
/// Highest bcrypt cost accepted by [`hash_password_with_cost`].
pub const MAX_COST: u32 = 31;
/// Generated passwords are never shorter than this.
pub const MIN_GENERATED_LENGTH: usize = 6;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{}<>?";

/// Hashes a password with the default bcrypt cost.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hashes a password with an explicit bcrypt cost.
///
/// A cost outside `MIN_COST..=MAX_COST` is replaced by `bcrypt::DEFAULT_COST`
/// instead of failing.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    let cost = if (MIN_COST..=MAX_COST).contains(&cost) {
        cost
    } else {
        DEFAULT_COST
    };

    hash(password, cost).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Verifies a password against a bcrypt hash.
///
/// Returns an error when the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

/// Compares a candidate password with a stored hash.
///
/// A malformed hash never matches.
pub fn compare_passwords(hash: &str, candidate: &str) -> bool {
    verify(candidate, hash).unwrap_or(false)
}

/// Generates a random password of at least `length` characters.
///
/// One character from each class is placed first, the rest are drawn
/// uniformly from the combined alphabet, then the whole sequence is shuffled
/// so the guaranteed characters do not sit at predictable positions.
pub fn generate_password(length: usize) -> String {
    let length = length.max(MIN_GENERATED_LENGTH);
    let classes = [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS];
    let alphabet = classes.concat();
    let mut rng = OsRng;

    let mut chars: Vec<u8> = Vec::with_capacity(length);
    for class in classes {
        chars.push(class[rng.gen_range(0..class.len())]);
    }
    while chars.len() < length {
        chars.push(alphabet[rng.gen_range(0..alphabet.len())]);
    }

    // Fisher-Yates driven by the OS RNG.
    chars.shuffle(&mut rng);

    chars.into_iter().map(char::from).collect()
}
