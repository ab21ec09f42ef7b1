//! Type-safe wrappers and enums for the auction schema.

pub mod categories;
pub mod ids;
pub mod money;

pub use categories::{Category, Gender, PlayerRole, SubCategory, UserRole};
pub use ids::{ManagerId, PlayerId, TeamId, TransactionId, UserId};
pub use money::Money;
