//! Storage layer for the cricket auction
//!
//! This module wraps the SQLite database, organized into logical components:
//! - `migrations`: Table definitions, constraints and the migration runner
//! - `schema`: Database connection management
//! - `models`: Row types
//! - `queries`: CRUD operations and purchase recording
//! - `profiles`: Role-specific player statistics

pub mod migrations;
pub mod models;
pub mod profiles;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use migrations::{schema_sql, MIGRATIONS};
pub use models::*;
pub use schema::AuctionDatabase;
