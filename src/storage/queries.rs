//! Basic database query operations

use super::{models::*, schema::AuctionDatabase};
use crate::credentials::hash_password;
use crate::error::AuctionError;
use crate::types::{ManagerId, Money, PlayerId, TeamId, TransactionId, UserId};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};

const TEAM_COLUMNS: &str = "team_id, team_name, purse_balance";
const PLAYER_COLUMNS: &str =
    "player_id, name, category, sub_category, gender, role, base_price, team_id";
const MANAGER_COLUMNS: &str = "manager_id, username, password, team_id";
const TRANSACTION_COLUMNS: &str =
    "transaction_id, team_id, player_id, purchase_price, purchase_time";
const USER_COLUMNS: &str = "user_id, username, password, role";

impl AuctionDatabase {
    // Teams

    /// Insert a team, returning its generated id
    pub fn create_team(&mut self, team: &NewTeam) -> Result<TeamId> {
        self.conn.execute(
            "INSERT INTO teams (team_name, purse_balance) VALUES (?, ?)",
            params![team.team_name, team.purse_balance],
        )?;
        Ok(TeamId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_team(&self, team_id: TeamId) -> Result<Option<Team>> {
        let sql = format!("SELECT {} FROM teams WHERE team_id = ?", TEAM_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![team_id], Self::row_to_team)
            .optional()?)
    }

    pub fn get_team_by_name(&self, team_name: &str) -> Result<Option<Team>> {
        let sql = format!("SELECT {} FROM teams WHERE team_name = ?", TEAM_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![team_name], Self::row_to_team)
            .optional()?)
    }

    /// All teams ordered by name
    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let sql = format!("SELECT {} FROM teams ORDER BY team_name", TEAM_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_team)?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(row?);
        }
        Ok(teams)
    }

    /// Overwrite a team's purse balance. Returns false if the team does not exist.
    pub fn set_purse_balance(&mut self, team_id: TeamId, balance: Money) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE teams SET purse_balance = ? WHERE team_id = ?",
            params![balance, team_id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a team. Its manager and transactions cascade; its players become unsold.
    pub fn delete_team(&mut self, team_id: TeamId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM teams WHERE team_id = ?", params![team_id])?;
        Ok(rows_affected > 0)
    }

    // Players

    /// Insert an unsold player, returning its generated id
    pub fn create_player(&mut self, player: &NewPlayer) -> Result<PlayerId> {
        self.conn.execute(
            "INSERT INTO players (name, category, sub_category, gender, role, base_price)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                player.name,
                player.category,
                player.sub_category,
                player.gender,
                player.role,
                player.base_price
            ],
        )?;
        Ok(PlayerId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        let sql = format!("SELECT {} FROM players WHERE player_id = ?", PLAYER_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![player_id], Self::row_to_player)
            .optional()?)
    }

    /// Players matching every set field of `filter`, ordered by id
    pub fn list_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>> {
        let mut query = format!("SELECT {} FROM players WHERE 1 = 1", PLAYER_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(role) = filter.role {
            query.push_str(" AND role = ?");
            params.push(Box::new(role));
        }
        if let Some(category) = filter.category {
            query.push_str(" AND category = ?");
            params.push(Box::new(category));
        }
        if let Some(sub_category) = filter.sub_category {
            query.push_str(" AND sub_category = ?");
            params.push(Box::new(sub_category));
        }
        if let Some(gender) = filter.gender {
            query.push_str(" AND gender = ?");
            params.push(Box::new(gender));
        }
        if let Some(team_id) = filter.team_id {
            query.push_str(" AND team_id = ?");
            params.push(Box::new(team_id));
        }
        if filter.unsold_only {
            query.push_str(" AND team_id IS NULL");
        }

        query.push_str(" ORDER BY player_id");

        let mut stmt = self.conn.prepare(&query)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let rows = stmt.query_map(&param_refs[..], Self::row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Set or clear a player's team outside of a purchase (administrative correction)
    pub fn assign_player(&mut self, player_id: PlayerId, team_id: Option<TeamId>) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE players SET team_id = ? WHERE player_id = ?",
            params![team_id, player_id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a player along with its role profile and transactions
    pub fn delete_player(&mut self, player_id: PlayerId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM players WHERE player_id = ?", params![player_id])?;
        Ok(rows_affected > 0)
    }

    // Managers

    /// Insert a manager, hashing the supplied password
    pub fn create_manager(&mut self, manager: &NewManager) -> Result<ManagerId> {
        let password_hash = hash_password(&manager.password, self.hash_cost)?;
        self.conn.execute(
            "INSERT INTO managers (username, password, team_id) VALUES (?, ?, ?)",
            params![manager.username, password_hash, manager.team_id],
        )?;
        Ok(ManagerId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_manager(&self, manager_id: ManagerId) -> Result<Option<Manager>> {
        let sql = format!("SELECT {} FROM managers WHERE manager_id = ?", MANAGER_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![manager_id], Self::row_to_manager)
            .optional()?)
    }

    pub fn get_manager_by_username(&self, username: &str) -> Result<Option<Manager>> {
        let sql = format!("SELECT {} FROM managers WHERE username = ?", MANAGER_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![username], Self::row_to_manager)
            .optional()?)
    }

    /// The manager assigned to a team, if any
    pub fn get_team_manager(&self, team_id: TeamId) -> Result<Option<Manager>> {
        let sql = format!("SELECT {} FROM managers WHERE team_id = ?", MANAGER_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![team_id], Self::row_to_manager)
            .optional()?)
    }

    pub fn set_manager_team(&mut self, manager_id: ManagerId, team_id: Option<TeamId>) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE managers SET team_id = ? WHERE manager_id = ?",
            params![team_id, manager_id],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn delete_manager(&mut self, manager_id: ManagerId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM managers WHERE manager_id = ?", params![manager_id])?;
        Ok(rows_affected > 0)
    }

    // Users

    /// Insert a user, hashing the supplied password
    pub fn create_user(&mut self, user: &NewUser) -> Result<UserId> {
        let password_hash = hash_password(&user.password, self.hash_cost)?;
        self.conn.execute(
            "INSERT INTO users (username, password, role) VALUES (?, ?, ?)",
            params![user.username, password_hash, user.role],
        )?;
        Ok(UserId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE user_id = ?", USER_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![user_id], Self::row_to_user)
            .optional()?)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![username], Self::row_to_user)
            .optional()?)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY username", USER_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_user)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    pub fn delete_user(&mut self, user_id: UserId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM users WHERE user_id = ?", params![user_id])?;
        Ok(rows_affected > 0)
    }

    // Auction transactions

    /// Record that `team_id` bought `player_id` and assign the player to the team.
    ///
    /// Both writes happen in one transaction. The purse balance is left untouched.
    pub fn record_purchase(
        &mut self,
        team_id: TeamId,
        player_id: PlayerId,
        purchase_price: Money,
    ) -> Result<TransactionId> {
        self.in_transaction(|tx| {
            let team_exists = tx
                .query_row(
                    "SELECT 1 FROM teams WHERE team_id = ?",
                    params![team_id],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if !team_exists {
                return Err(AuctionError::NotFound {
                    entity: "Team",
                    id: team_id.as_i64(),
                }
                .into());
            }

            let current_team: Option<Option<TeamId>> = tx
                .query_row(
                    "SELECT team_id FROM players WHERE player_id = ?",
                    params![player_id],
                    |row| row.get(0),
                )
                .optional()?;
            match current_team {
                None => {
                    return Err(AuctionError::NotFound {
                        entity: "Player",
                        id: player_id.as_i64(),
                    }
                    .into())
                }
                Some(Some(owner)) => {
                    return Err(AuctionError::PlayerAlreadySold {
                        player_id: player_id.as_i64(),
                        team_id: owner.as_i64(),
                    }
                    .into())
                }
                Some(None) => {}
            }

            tx.execute(
                "INSERT INTO auction_transactions (team_id, player_id, purchase_price)
                 VALUES (?, ?, ?)",
                params![team_id, player_id, purchase_price],
            )?;
            let transaction_id = TransactionId::new(tx.last_insert_rowid());

            tx.execute(
                "UPDATE players SET team_id = ? WHERE player_id = ?",
                params![team_id, player_id],
            )?;

            tracing::debug!(%team_id, %player_id, price = %purchase_price, "recorded purchase");
            Ok(transaction_id)
        })
    }

    pub fn get_transaction(&self, transaction_id: TransactionId) -> Result<Option<AuctionTransaction>> {
        let sql = format!(
            "SELECT {} FROM auction_transactions WHERE transaction_id = ?",
            TRANSACTION_COLUMNS
        );
        Ok(self
            .conn
            .query_row(&sql, params![transaction_id], Self::row_to_transaction)
            .optional()?)
    }

    /// All live transactions in purchase order
    pub fn list_transactions(&self) -> Result<Vec<AuctionTransaction>> {
        self.query_transactions("", &[])
    }

    pub fn list_team_transactions(&self, team_id: TeamId) -> Result<Vec<AuctionTransaction>> {
        self.query_transactions("WHERE team_id = ?", &[&team_id])
    }

    pub fn list_player_transactions(&self, player_id: PlayerId) -> Result<Vec<AuctionTransaction>> {
        self.query_transactions("WHERE player_id = ?", &[&player_id])
    }

    /// Transactions removed from `auction_transactions`, oldest id first
    pub fn list_archived_transactions(&self) -> Result<Vec<ArchivedTransaction>> {
        let sql = format!(
            "SELECT {}, archived_at FROM auction_transaction_archive ORDER BY transaction_id",
            TRANSACTION_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(ArchivedTransaction {
                transaction: Self::row_to_transaction(row)?,
                archived_at: row.get(5)?,
            })
        })?;

        let mut archived = Vec::new();
        for row in rows {
            archived.push(row?);
        }
        Ok(archived)
    }

    fn query_transactions(
        &self,
        where_clause: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<AuctionTransaction>> {
        let sql = format!(
            "SELECT {} FROM auction_transactions {} ORDER BY purchase_time, transaction_id",
            TRANSACTION_COLUMNS, where_clause
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params, Self::row_to_transaction)?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?);
        }
        Ok(transactions)
    }

    // Row mapping

    fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
        Ok(Team {
            team_id: row.get(0)?,
            team_name: row.get(1)?,
            purse_balance: row.get(2)?,
        })
    }

    fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
        Ok(Player {
            player_id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            sub_category: row.get(3)?,
            gender: row.get(4)?,
            role: row.get(5)?,
            base_price: row.get(6)?,
            team_id: row.get(7)?,
        })
    }

    fn row_to_manager(row: &Row) -> rusqlite::Result<Manager> {
        Ok(Manager {
            manager_id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            team_id: row.get(3)?,
        })
    }

    fn row_to_transaction(row: &Row) -> rusqlite::Result<AuctionTransaction> {
        Ok(AuctionTransaction {
            transaction_id: row.get(0)?,
            team_id: row.get(1)?,
            player_id: row.get(2)?,
            purchase_price: row.get(3)?,
            purchase_time: row.get(4)?,
        })
    }

    fn row_to_user(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            user_id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            role: row.get(3)?,
        })
    }
}
