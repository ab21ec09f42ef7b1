//! Schema migrations for the auction database
//!
//! Migrations are applied in order and recorded by name in `_migrations`,
//! so running them again against an existing database is a no-op.
//!
//! Money columns hold whole hundredths (`NUMERIC(10,2)` expressed as an
//! integer) and must be SQLite integers.

use crate::error::AuctionError;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Ordered `(name, sql)` pairs making up the schema.
pub const MIGRATIONS: &[(&str, &str)] = &[
    ("0001_initial_schema", INITIAL_SCHEMA),
    ("0002_role_profiles", ROLE_PROFILES),
    ("0003_transaction_archive", TRANSACTION_ARCHIVE),
];

const LEDGER: &str = "CREATE TABLE IF NOT EXISTS _migrations (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);";

const INITIAL_SCHEMA: &str = "
CREATE TABLE teams (
    team_id INTEGER PRIMARY KEY AUTOINCREMENT,
    team_name TEXT NOT NULL UNIQUE CHECK (length(team_name) <= 50),
    purse_balance INTEGER NOT NULL
        CHECK (typeof(purse_balance) = 'integer' AND abs(purse_balance) <= 9999999999)
);

CREATE TABLE players (
    player_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) <= 100),
    category TEXT NOT NULL CHECK (category IN ('Indian', 'Foreign')),
    sub_category TEXT NOT NULL CHECK (sub_category IN ('Capped', 'Uncapped')),
    gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female')),
    role TEXT NOT NULL CHECK (role IN ('Batsman', 'Bowler', 'Allrounder', 'WicketKeeper')),
    base_price INTEGER NOT NULL
        CHECK (typeof(base_price) = 'integer' AND abs(base_price) <= 9999999999),
    team_id INTEGER REFERENCES teams(team_id) ON DELETE SET NULL
);

CREATE INDEX idx_players_team ON players(team_id);

CREATE TABLE managers (
    manager_id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE CHECK (length(username) <= 50),
    password TEXT NOT NULL CHECK (length(password) <= 255),
    team_id INTEGER UNIQUE REFERENCES teams(team_id) ON DELETE CASCADE
);

CREATE TABLE auction_transactions (
    transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
    team_id INTEGER NOT NULL REFERENCES teams(team_id) ON DELETE CASCADE,
    player_id INTEGER NOT NULL REFERENCES players(player_id) ON DELETE CASCADE,
    purchase_price INTEGER NOT NULL
        CHECK (typeof(purchase_price) = 'integer' AND abs(purchase_price) <= 9999999999),
    purchase_time TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX idx_auction_transactions_team ON auction_transactions(team_id);
CREATE INDEX idx_auction_transactions_player ON auction_transactions(player_id);

CREATE TABLE users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE CHECK (length(username) <= 50),
    password TEXT NOT NULL CHECK (length(password) <= 255),
    role TEXT NOT NULL CHECK (role IN ('Admin', 'Manager', 'Audience'))
);
";

const ROLE_PROFILES: &str = "
CREATE TABLE batsmen (
    player_id INTEGER PRIMARY KEY REFERENCES players(player_id) ON DELETE CASCADE,
    matches INTEGER NOT NULL DEFAULT 0,
    runs INTEGER NOT NULL DEFAULT 0,
    highest_score INTEGER NOT NULL DEFAULT 0,
    batting_average REAL NOT NULL DEFAULT 0,
    strike_rate REAL NOT NULL DEFAULT 0,
    centuries INTEGER NOT NULL DEFAULT 0,
    half_centuries INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE bowlers (
    player_id INTEGER PRIMARY KEY REFERENCES players(player_id) ON DELETE CASCADE,
    matches INTEGER NOT NULL DEFAULT 0,
    wickets INTEGER NOT NULL DEFAULT 0,
    overs_bowled REAL NOT NULL DEFAULT 0,
    bowling_average REAL NOT NULL DEFAULT 0,
    economy REAL NOT NULL DEFAULT 0,
    strike_rate REAL NOT NULL DEFAULT 0,
    five_wicket_hauls INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE allrounders (
    player_id INTEGER PRIMARY KEY REFERENCES players(player_id) ON DELETE CASCADE,
    matches INTEGER NOT NULL DEFAULT 0,
    runs INTEGER NOT NULL DEFAULT 0,
    batting_average REAL NOT NULL DEFAULT 0,
    batting_strike_rate REAL NOT NULL DEFAULT 0,
    wickets INTEGER NOT NULL DEFAULT 0,
    bowling_average REAL NOT NULL DEFAULT 0,
    economy REAL NOT NULL DEFAULT 0
);

CREATE TABLE wicket_keepers (
    player_id INTEGER PRIMARY KEY REFERENCES players(player_id) ON DELETE CASCADE,
    matches INTEGER NOT NULL DEFAULT 0,
    runs INTEGER NOT NULL DEFAULT 0,
    batting_average REAL NOT NULL DEFAULT 0,
    strike_rate REAL NOT NULL DEFAULT 0,
    catches INTEGER NOT NULL DEFAULT 0,
    stumpings INTEGER NOT NULL DEFAULT 0,
    dismissals INTEGER NOT NULL DEFAULT 0
);

CREATE TRIGGER batsmen_role_insert BEFORE INSERT ON batsmen
WHEN (SELECT role FROM players WHERE player_id = NEW.player_id) IS NOT 'Batsman'
BEGIN SELECT RAISE(ABORT, 'profile role mismatch'); END;

CREATE TRIGGER batsmen_role_update BEFORE UPDATE OF player_id ON batsmen
WHEN (SELECT role FROM players WHERE player_id = NEW.player_id) IS NOT 'Batsman'
BEGIN SELECT RAISE(ABORT, 'profile role mismatch'); END;

CREATE TRIGGER bowlers_role_insert BEFORE INSERT ON bowlers
WHEN (SELECT role FROM players WHERE player_id = NEW.player_id) IS NOT 'Bowler'
BEGIN SELECT RAISE(ABORT, 'profile role mismatch'); END;

CREATE TRIGGER bowlers_role_update BEFORE UPDATE OF player_id ON bowlers
WHEN (SELECT role FROM players WHERE player_id = NEW.player_id) IS NOT 'Bowler'
BEGIN SELECT RAISE(ABORT, 'profile role mismatch'); END;

CREATE TRIGGER allrounders_role_insert BEFORE INSERT ON allrounders
WHEN (SELECT role FROM players WHERE player_id = NEW.player_id) IS NOT 'Allrounder'
BEGIN SELECT RAISE(ABORT, 'profile role mismatch'); END;

CREATE TRIGGER allrounders_role_update BEFORE UPDATE OF player_id ON allrounders
WHEN (SELECT role FROM players WHERE player_id = NEW.player_id) IS NOT 'Allrounder'
BEGIN SELECT RAISE(ABORT, 'profile role mismatch'); END;

CREATE TRIGGER wicket_keepers_role_insert BEFORE INSERT ON wicket_keepers
WHEN (SELECT role FROM players WHERE player_id = NEW.player_id) IS NOT 'WicketKeeper'
BEGIN SELECT RAISE(ABORT, 'profile role mismatch'); END;

CREATE TRIGGER wicket_keepers_role_update BEFORE UPDATE OF player_id ON wicket_keepers
WHEN (SELECT role FROM players WHERE player_id = NEW.player_id) IS NOT 'WicketKeeper'
BEGIN SELECT RAISE(ABORT, 'profile role mismatch'); END;

CREATE TRIGGER players_role_change BEFORE UPDATE OF role ON players
WHEN NEW.role IS NOT OLD.role AND (
    EXISTS (SELECT 1 FROM batsmen WHERE player_id = OLD.player_id)
    OR EXISTS (SELECT 1 FROM bowlers WHERE player_id = OLD.player_id)
    OR EXISTS (SELECT 1 FROM allrounders WHERE player_id = OLD.player_id)
    OR EXISTS (SELECT 1 FROM wicket_keepers WHERE player_id = OLD.player_id)
)
BEGIN SELECT RAISE(ABORT, 'player has a role profile'); END;
";

// Every row deleted from auction_transactions, cascades included, lands here.
const TRANSACTION_ARCHIVE: &str = "
CREATE TABLE auction_transaction_archive (
    transaction_id INTEGER PRIMARY KEY,
    team_id INTEGER NOT NULL,
    player_id INTEGER NOT NULL,
    purchase_price INTEGER NOT NULL,
    purchase_time TIMESTAMP,
    archived_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TRIGGER auction_transactions_archive BEFORE DELETE ON auction_transactions
BEGIN
    INSERT OR REPLACE INTO auction_transaction_archive
        (transaction_id, team_id, player_id, purchase_price, purchase_time)
    VALUES
        (OLD.transaction_id, OLD.team_id, OLD.player_id, OLD.purchase_price, OLD.purchase_time);
END;
";

/// Apply every migration not yet recorded, returning the names applied now.
pub fn run_migrations(conn: &mut Connection) -> Result<Vec<String>> {
    conn.execute_batch(LEDGER)?;

    let mut applied = Vec::new();
    for (name, sql) in MIGRATIONS {
        let already_applied = conn
            .query_row(
                "SELECT 1 FROM _migrations WHERE name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if already_applied {
            continue;
        }

        let tx = conn.transaction()?;
        tx.execute_batch(sql).map_err(|e| AuctionError::Migration {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        tx.execute("INSERT INTO _migrations (name) VALUES (?1)", params![name])?;
        tx.commit()?;

        tracing::info!(migration = %name, "applied migration");
        applied.push(name.to_string());
    }

    Ok(applied)
}

/// Names of migrations already applied, oldest first.
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    conn.execute_batch(LEDGER)?;

    let mut stmt = conn.prepare("SELECT name FROM _migrations ORDER BY id")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut names = Vec::new();
    for row in rows {
        names.push(row?);
    }
    Ok(names)
}

/// The complete DDL as a single script.
pub fn schema_sql() -> String {
    MIGRATIONS
        .iter()
        .map(|(name, sql)| format!("-- {}\n{}", name, sql.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
