//! Entry point: load configuration, parse CLI and dispatch.

use anyhow::Context;
use clap::Parser;
use cricket_auction::{
    cli::{AuctionCli, Commands},
    server,
    storage::{schema_sql, AuctionDatabase, NewTeam, NewUser},
    AppConfig,
};

/// Load the environment and open the database, applying pending migrations.
fn open_database() -> anyhow::Result<(AppConfig, AuctionDatabase)> {
    let config = AppConfig::load()?;
    tracing::info!("database: {}", config.database);

    let db = AuctionDatabase::open(&config.database)
        .with_context(|| format!("opening {}", config.database))?;
    Ok((config, db))
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cricket_auction=info,tower_http=info".into()),
        )
        .init();

    let app = AuctionCli::parse();

    match app.command_or_default() {
        Commands::Serve { host, port } => {
            let (config, db) = open_database()?;
            let config = config.with_overrides(host, port);
            server::serve(db, &config.bind_address()).await?;
        }

        Commands::Migrate { status } => {
            let (_, db) = open_database()?;
            let applied = db.applied_migrations()?;
            if status {
                for name in &applied {
                    println!("{}", name);
                }
            } else {
                match applied.last() {
                    Some(latest) => println!("Schema up to date at {} ({} migrations)", latest, applied.len()),
                    None => println!("No migrations applied"),
                }
            }
        }

        Commands::Schema => println!("{}", schema_sql()),

        Commands::AddTeam { name, purse } => {
            let (_, mut db) = open_database()?;
            let team_id = db.create_team(&NewTeam {
                team_name: name.clone(),
                purse_balance: purse,
            })?;
            println!("Created team [{}] with id {} and purse {}", name, team_id, purse);
        }

        Commands::AddUser {
            username,
            password,
            role,
        } => {
            let (_, mut db) = open_database()?;
            let user_id = db.create_user(&NewUser {
                username: username.clone(),
                password,
                role,
            })?;
            println!("Created user [{}] with id {} and role {}", username, user_id, role);
        }
    }

    Ok(())
}
