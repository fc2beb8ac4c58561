use clap::Args;
use platter_app::domain::users::{PgUsersService, UsersService, records::UserUuid};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct BlockUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: BlockUserArgs, blocked: bool) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let user = PgUsersService::new(db)
        .set_blocked(UserUuid::from_uuid(args.user_uuid), blocked)
        .await
        .map_err(|error| format!("failed to update user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("is_blocked: {}", user.is_blocked);

    Ok(())
}
