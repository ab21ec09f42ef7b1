//! Password hashing for stored credentials.
//!
//! Only hashes ever reach the `managers` and `users` tables.

use crate::error::Result;

pub use bcrypt::DEFAULT_COST;

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;

pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, hash)?)
}
