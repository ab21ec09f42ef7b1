//! CLI argument definitions and parsing.

use crate::types::{Money, UserRole};
use clap::{Parser, Subcommand};


#[derive(Debug, Parser)]
#[clap(
    name = "cricket-auction",
    about = "Cricket team auction database and development server"
)]
pub struct AuctionCli {
    /// Defaults to `serve` when omitted.
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

impl AuctionCli {
    pub fn command_or_default(self) -> Commands {
        self.command.unwrap_or(Commands::Serve {
            host: None,
            port: None,
        })
    }
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Commands {
    /// Apply pending migrations, then run the development server.
    Serve {
        /// Interface to bind (or set `HOST`).
        #[clap(long)]
        host: Option<String>,

        /// Port to bind (or set `PORT`).
        #[clap(long, short)]
        port: Option<u16>,
    },

    /// Apply pending migrations to the database named by `DATABASE_URI`.
    Migrate {
        /// Only list the migrations already applied.
        #[clap(long)]
        status: bool,
    },

    /// Print the schema DDL.
    Schema,

    /// Create a team with its starting purse.
    AddTeam {
        name: String,

        /// Purse balance, e.g. `100` or `95.50`.
        purse: Money,
    },

    /// Create a login account.
    AddUser {
        username: String,

        password: String,

        /// admin | manager | audience
        #[clap(long, short, default_value_t = UserRole::Audience)]
        role: UserRole,
    },
}
