//! Data models for the storage layer

use crate::types::{
    Category, Gender, ManagerId, Money, PlayerId, PlayerRole, SubCategory, TeamId, TransactionId,
    UserId, UserRole,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A franchise taking part in the auction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub team_name: String,
    pub purse_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeam {
    pub team_name: String,
    pub purse_balance: Money,
}

/// A player in the auction pool; `team_id` is `None` while unsold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub category: Category,
    pub sub_category: SubCategory,
    pub gender: Gender,
    pub role: PlayerRole,
    pub base_price: Money,
    pub team_id: Option<TeamId>,
}

impl Player {
    pub fn is_sold(&self) -> bool {
        self.team_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub category: Category,
    pub sub_category: SubCategory,
    pub gender: Gender,
    pub role: PlayerRole,
    pub base_price: Money,
}

/// Narrowing options for `list_players`; the default lists everyone
#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    pub role: Option<PlayerRole>,
    pub category: Option<Category>,
    pub sub_category: Option<SubCategory>,
    pub gender: Option<Gender>,
    pub team_id: Option<TeamId>,
    pub unsold_only: bool,
}

/// Team manager login; `password_hash` is a bcrypt hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manager {
    pub manager_id: ManagerId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub team_id: Option<TeamId>,
}

/// Manager to create; `password` is plain text and hashed on insert
#[derive(Debug, Clone)]
pub struct NewManager {
    pub username: String,
    pub password: String,
    pub team_id: Option<TeamId>,
}

/// A completed purchase of a player by a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionTransaction {
    pub transaction_id: TransactionId,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub purchase_price: Money,
    pub purchase_time: Option<NaiveDateTime>,
}

/// A transaction preserved after its live row was deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedTransaction {
    pub transaction: AuctionTransaction,
    pub archived_at: NaiveDateTime,
}

/// Application login account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatsmanStats {
    pub matches: i64,
    pub runs: i64,
    pub highest_score: i64,
    pub batting_average: f64,
    pub strike_rate: f64,
    pub centuries: i64,
    pub half_centuries: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BowlerStats {
    pub matches: i64,
    pub wickets: i64,
    pub overs_bowled: f64,
    pub bowling_average: f64,
    pub economy: f64,
    pub strike_rate: f64,
    pub five_wicket_hauls: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllrounderStats {
    pub matches: i64,
    pub runs: i64,
    pub batting_average: f64,
    pub batting_strike_rate: f64,
    pub wickets: i64,
    pub bowling_average: f64,
    pub economy: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WicketKeeperStats {
    pub matches: i64,
    pub runs: i64,
    pub batting_average: f64,
    pub strike_rate: f64,
    pub catches: i64,
    pub stumpings: i64,
    pub dismissals: i64,
}

/// Role-specific statistics; the variant must match the player's role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum RoleProfile {
    Batsman(BatsmanStats),
    Bowler(BowlerStats),
    Allrounder(AllrounderStats),
    WicketKeeper(WicketKeeperStats),
}

impl RoleProfile {
    pub fn role(&self) -> PlayerRole {
        match self {
            RoleProfile::Batsman(_) => PlayerRole::Batsman,
            RoleProfile::Bowler(_) => PlayerRole::Bowler,
            RoleProfile::Allrounder(_) => PlayerRole::Allrounder,
            RoleProfile::WicketKeeper(_) => PlayerRole::WicketKeeper,
        }
    }

    /// An all-zero profile for `role`, matching the column defaults
    pub fn empty(role: PlayerRole) -> Self {
        match role {
            PlayerRole::Batsman => RoleProfile::Batsman(BatsmanStats::default()),
            PlayerRole::Bowler => RoleProfile::Bowler(BowlerStats::default()),
            PlayerRole::Allrounder => RoleProfile::Allrounder(AllrounderStats::default()),
            PlayerRole::WicketKeeper => RoleProfile::WicketKeeper(WicketKeeperStats::default()),
        }
    }
}
