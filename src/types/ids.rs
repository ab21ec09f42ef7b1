//! Row identifier types for the auction tables.

use crate::error::{AuctionError, Result};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares an `i64`-backed primary key wrapper, one per table.
macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = AuctionError;

            fn from_str(s: &str) -> Result<Self> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

row_id!(
    /// Primary key of `teams`.
    ///
    /// ```rust
    /// use cricket_auction::TeamId;
    ///
    /// let id = TeamId::new(3);
    /// assert_eq!(id.as_i64(), 3);
    /// assert_eq!(id.to_string(), "3");
    /// ```
    TeamId
);
row_id!(
    /// Primary key of `players`, shared by the role-profile tables.
    PlayerId
);
row_id!(
    /// Primary key of `managers`.
    ManagerId
);
row_id!(
    /// Primary key of `auction_transactions`.
    TransactionId
);
row_id!(
    /// Primary key of `users`.
    UserId
);
