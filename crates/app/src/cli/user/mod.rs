use clap::{Args, Subcommand};

mod block;
mod create;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(create::CreateUserArgs),
    Block(block::BlockUserArgs),
    Unblock(block::BlockUserArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::Block(args) => block::run(args, true).await,
        UserSubcommand::Unblock(args) => block::run(args, false).await,
    }
}
