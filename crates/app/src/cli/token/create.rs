use clap::Args;
use platter_app::{auth::PgAuthService, domain::users::records::UserUuid};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User UUID that should own the token
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;
    let service = PgAuthService::new(db);

    let issued = service
        .issue_token(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.record.uuid);
    println!("user_uuid: {}", issued.record.user_uuid);
    println!("token_created_at: {}", issued.record.created_at);
    println!("bearer_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
