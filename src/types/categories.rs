//! Enumerated column domains for players and users.
//!
//! Each enum displays as the exact spelling stored in its column and listed
//! in the column's `CHECK` constraint. Parsing is case-insensitive.

use crate::error::AuctionError;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! column_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value as stored in the database.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AuctionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| AuctionError::InvalidEnumValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let text = value.as_str()?;
                text.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

column_enum!(
    /// Nationality bucket a player is auctioned under.
    Category, "player category" {
        Indian => "Indian",
        Foreign => "Foreign",
    }
);

column_enum!(
    /// Whether a player has international appearances.
    SubCategory, "player sub-category" {
        Capped => "Capped",
        Uncapped => "Uncapped",
    }
);

column_enum!(
    Gender, "gender" {
        Male => "Male",
        Female => "Female",
    }
);

column_enum!(
    /// Playing role; selects which profile table holds the player's statistics.
    PlayerRole, "player role" {
        Batsman => "Batsman",
        Bowler => "Bowler",
        Allrounder => "Allrounder",
        WicketKeeper => "WicketKeeper",
    }
);

column_enum!(
    /// Application role of a login account.
    UserRole, "user role" {
        Admin => "Admin",
        Manager => "Manager",
        Audience => "Audience",
    }
);

impl PlayerRole {
    /// Profile table holding statistics for players of this role.
    pub fn profile_table(&self) -> &'static str {
        match self {
            PlayerRole::Batsman => "batsmen",
            PlayerRole::Bowler => "bowlers",
            PlayerRole::Allrounder => "allrounders",
            PlayerRole::WicketKeeper => "wicket_keepers",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_stored_spelling() {
        assert_eq!(Category::Indian.to_string(), "Indian");
        assert_eq!(SubCategory::Uncapped.to_string(), "Uncapped");
        assert_eq!(Gender::Female.to_string(), "Female");
        assert_eq!(PlayerRole::WicketKeeper.to_string(), "WicketKeeper");
        assert_eq!(UserRole::Audience.to_string(), "Audience");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("foreign".parse::<Category>().unwrap(), Category::Foreign);
        assert_eq!("CAPPED".parse::<SubCategory>().unwrap(), SubCategory::Capped);
        assert_eq!("wicketkeeper".parse::<PlayerRole>().unwrap(), PlayerRole::WicketKeeper);
        assert_eq!(" admin ".parse::<UserRole>().unwrap(), UserRole::Admin);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        match "Keeper".parse::<PlayerRole>() {
            Err(AuctionError::InvalidEnumValue { kind, value }) => {
                assert_eq!(kind, "player role");
                assert_eq!(value, "Keeper");
            }
            other => panic!("Expected InvalidEnumValue, got {:?}", other),
        }
        assert!("Other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_profile_tables() {
        assert_eq!(PlayerRole::Batsman.profile_table(), "batsmen");
        assert_eq!(PlayerRole::Bowler.profile_table(), "bowlers");
        assert_eq!(PlayerRole::Allrounder.profile_table(), "allrounders");
        assert_eq!(PlayerRole::WicketKeeper.profile_table(), "wicket_keepers");
    }

    #[test]
    fn test_sqlite_round_trip_and_rejection() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let role: PlayerRole = conn
            .query_row("SELECT ?1", [PlayerRole::Allrounder], |row| row.get(0))
            .unwrap();
        assert_eq!(role, PlayerRole::Allrounder);

        let bad: rusqlite::Result<PlayerRole> =
            conn.query_row("SELECT 'Spinner'", [], |row| row.get(0));
        assert!(bad.is_err());
    }
}
