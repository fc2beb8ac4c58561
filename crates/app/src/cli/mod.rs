use clap::{Parser, Subcommand};
use platter_app::database::{self, Db};

mod category;
mod db;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "platter-app", about = "Platter storefront administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Token(token::TokenCommand),
    Category(category::CategoryCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Category(command) => category::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Connect without applying migrations.
async fn connect(database_url: &str) -> Result<Db, String> {
    database::connect(database_url)
        .await
        .map(Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
