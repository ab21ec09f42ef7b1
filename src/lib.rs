//! Cricket Auction Library
//!
//! Relational schema and data access for a cricket-team auction: teams,
//! players with role-specific statistics profiles, team managers, login
//! users, and auction purchase transactions.
//!
//! ## Features
//!
//! - **Schema**: ordered SQLite migrations with `CHECK`, unique, foreign-key
//!   and cascade constraints
//! - **Typed values**: row identifiers, fixed-point money, enumerated domains
//! - **Data access**: CRUD for every table, purchase recording, role profiles
//! - **Transaction archive**: deleted purchases are preserved for auditing
//! - **Bootstrap**: `.env` loading, migration command, development server
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cricket_auction::storage::{AuctionDatabase, NewTeam};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut db = AuctionDatabase::open_in_memory()?;
//! let team_id = db.create_team(&NewTeam {
//!     team_name: "Mumbai".to_string(),
//!     purse_balance: "100.00".parse()?,
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the application at a database (a `.env` file works too):
//! ```bash
//! export DATABASE_URI=sqlite:////var/lib/cricket-auction/auction.db
//! ```

pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod server;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, DatabaseLocation};
pub use error::{AuctionError, Result};
pub use types::{
    Category, Gender, ManagerId, Money, PlayerId, PlayerRole, SubCategory, TeamId, TransactionId,
    UserId, UserRole,
};

pub const DATABASE_URI_ENV_VAR: &str = "DATABASE_URI";
pub const HOST_ENV_VAR: &str = "HOST";
pub const PORT_ENV_VAR: &str = "PORT";
