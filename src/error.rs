//! Error types for the cricket auction schema and its bootstrap

use thiserror::Error;


pub type Result<T> = std::result::Result<T, AuctionError>;

#[derive(Error, Debug)]
pub enum AuctionError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid money amount: {value}")]
    InvalidMoney { value: String },

    #[error("Invalid {kind}: {value}")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("Failed to parse ID: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Player {player_id} already belongs to team {team_id}")]
    PlayerAlreadySold { player_id: i64, team_id: i64 },

    #[error("Profile role mismatch: player is a {actual}, profile is for a {expected}")]
    ProfileRoleMismatch { expected: String, actual: String },

    #[error("Migration {name} failed: {message}")]
    Migration { name: String, message: String },
}
