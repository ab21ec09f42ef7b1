//! Role-specific statistics stored in one table per player role

use super::{models::*, schema::AuctionDatabase};
use crate::error::AuctionError;
use crate::types::{PlayerId, PlayerRole};
use anyhow::Result;
use rusqlite::{params, OptionalExtension};

impl AuctionDatabase {
    /// Insert or replace the statistics profile of a player.
    ///
    /// The profile variant must match the player's role; the role tables
    /// enforce the same rule with triggers.
    pub fn upsert_profile(&mut self, player_id: PlayerId, profile: &RoleProfile) -> Result<()> {
        let role = self.player_role(player_id)?;
        if role != profile.role() {
            return Err(AuctionError::ProfileRoleMismatch {
                expected: profile.role().to_string(),
                actual: role.to_string(),
            }
            .into());
        }

        match profile {
            RoleProfile::Batsman(stats) => self.conn.execute(
                "INSERT INTO batsmen
                 (player_id, matches, runs, highest_score, batting_average, strike_rate,
                  centuries, half_centuries)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(player_id) DO UPDATE SET
                    matches = excluded.matches,
                    runs = excluded.runs,
                    highest_score = excluded.highest_score,
                    batting_average = excluded.batting_average,
                    strike_rate = excluded.strike_rate,
                    centuries = excluded.centuries,
                    half_centuries = excluded.half_centuries",
                params![
                    player_id,
                    stats.matches,
                    stats.runs,
                    stats.highest_score,
                    stats.batting_average,
                    stats.strike_rate,
                    stats.centuries,
                    stats.half_centuries
                ],
            )?,
            RoleProfile::Bowler(stats) => self.conn.execute(
                "INSERT INTO bowlers
                 (player_id, matches, wickets, overs_bowled, bowling_average, economy,
                  strike_rate, five_wicket_hauls)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(player_id) DO UPDATE SET
                    matches = excluded.matches,
                    wickets = excluded.wickets,
                    overs_bowled = excluded.overs_bowled,
                    bowling_average = excluded.bowling_average,
                    economy = excluded.economy,
                    strike_rate = excluded.strike_rate,
                    five_wicket_hauls = excluded.five_wicket_hauls",
                params![
                    player_id,
                    stats.matches,
                    stats.wickets,
                    stats.overs_bowled,
                    stats.bowling_average,
                    stats.economy,
                    stats.strike_rate,
                    stats.five_wicket_hauls
                ],
            )?,
            RoleProfile::Allrounder(stats) => self.conn.execute(
                "INSERT INTO allrounders
                 (player_id, matches, runs, batting_average, batting_strike_rate, wickets,
                  bowling_average, economy)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(player_id) DO UPDATE SET
                    matches = excluded.matches,
                    runs = excluded.runs,
                    batting_average = excluded.batting_average,
                    batting_strike_rate = excluded.batting_strike_rate,
                    wickets = excluded.wickets,
                    bowling_average = excluded.bowling_average,
                    economy = excluded.economy",
                params![
                    player_id,
                    stats.matches,
                    stats.runs,
                    stats.batting_average,
                    stats.batting_strike_rate,
                    stats.wickets,
                    stats.bowling_average,
                    stats.economy
                ],
            )?,
            RoleProfile::WicketKeeper(stats) => self.conn.execute(
                "INSERT INTO wicket_keepers
                 (player_id, matches, runs, batting_average, strike_rate, catches,
                  stumpings, dismissals)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(player_id) DO UPDATE SET
                    matches = excluded.matches,
                    runs = excluded.runs,
                    batting_average = excluded.batting_average,
                    strike_rate = excluded.strike_rate,
                    catches = excluded.catches,
                    stumpings = excluded.stumpings,
                    dismissals = excluded.dismissals",
                params![
                    player_id,
                    stats.matches,
                    stats.runs,
                    stats.batting_average,
                    stats.strike_rate,
                    stats.catches,
                    stats.stumpings,
                    stats.dismissals
                ],
            )?,
        };

        Ok(())
    }

    /// Read the profile from the table selected by the player's role.
    ///
    /// Returns `None` when the player has no profile row (or does not exist).
    pub fn get_profile(&self, player_id: PlayerId) -> Result<Option<RoleProfile>> {
        let role: Option<PlayerRole> = self
            .conn
            .query_row(
                "SELECT role FROM players WHERE player_id = ?",
                params![player_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(role) = role else {
            return Ok(None);
        };

        let profile = match role {
            PlayerRole::Batsman => self
                .conn
                .query_row(
                    "SELECT matches, runs, highest_score, batting_average, strike_rate,
                            centuries, half_centuries
                     FROM batsmen WHERE player_id = ?",
                    params![player_id],
                    |row| {
                        Ok(RoleProfile::Batsman(BatsmanStats {
                            matches: row.get(0)?,
                            runs: row.get(1)?,
                            highest_score: row.get(2)?,
                            batting_average: row.get(3)?,
                            strike_rate: row.get(4)?,
                            centuries: row.get(5)?,
                            half_centuries: row.get(6)?,
                        }))
                    },
                )
                .optional()?,
            PlayerRole::Bowler => self
                .conn
                .query_row(
                    "SELECT matches, wickets, overs_bowled, bowling_average, economy,
                            strike_rate, five_wicket_hauls
                     FROM bowlers WHERE player_id = ?",
                    params![player_id],
                    |row| {
                        Ok(RoleProfile::Bowler(BowlerStats {
                            matches: row.get(0)?,
                            wickets: row.get(1)?,
                            overs_bowled: row.get(2)?,
                            bowling_average: row.get(3)?,
                            economy: row.get(4)?,
                            strike_rate: row.get(5)?,
                            five_wicket_hauls: row.get(6)?,
                        }))
                    },
                )
                .optional()?,
            PlayerRole::Allrounder => self
                .conn
                .query_row(
                    "SELECT matches, runs, batting_average, batting_strike_rate, wickets,
                            bowling_average, economy
                     FROM allrounders WHERE player_id = ?",
                    params![player_id],
                    |row| {
                        Ok(RoleProfile::Allrounder(AllrounderStats {
                            matches: row.get(0)?,
                            runs: row.get(1)?,
                            batting_average: row.get(2)?,
                            batting_strike_rate: row.get(3)?,
                            wickets: row.get(4)?,
                            bowling_average: row.get(5)?,
                            economy: row.get(6)?,
                        }))
                    },
                )
                .optional()?,
            PlayerRole::WicketKeeper => self
                .conn
                .query_row(
                    "SELECT matches, runs, batting_average, strike_rate, catches,
                            stumpings, dismissals
                     FROM wicket_keepers WHERE player_id = ?",
                    params![player_id],
                    |row| {
                        Ok(RoleProfile::WicketKeeper(WicketKeeperStats {
                            matches: row.get(0)?,
                            runs: row.get(1)?,
                            batting_average: row.get(2)?,
                            strike_rate: row.get(3)?,
                            catches: row.get(4)?,
                            stumpings: row.get(5)?,
                            dismissals: row.get(6)?,
                        }))
                    },
                )
                .optional()?,
        };

        Ok(profile)
    }

    /// Remove a player's profile. Returns false if there was none.
    pub fn delete_profile(&mut self, player_id: PlayerId) -> Result<bool> {
        let role = self.player_role(player_id)?;
        let sql = format!("DELETE FROM {} WHERE player_id = ?", role.profile_table());
        let rows_affected = self.conn.execute(&sql, params![player_id])?;
        Ok(rows_affected > 0)
    }

    fn player_role(&self, player_id: PlayerId) -> Result<PlayerRole> {
        self.conn
            .query_row(
                "SELECT role FROM players WHERE player_id = ?",
                params![player_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| {
                AuctionError::NotFound {
                    entity: "Player",
                    id: player_id.as_i64(),
                }
                .into()
            })
    }
}
