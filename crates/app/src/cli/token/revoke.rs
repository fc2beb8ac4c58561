use clap::Args;
use platter_app::auth::{PgAuthService, UserTokenUuid};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Token UUID to revoke
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let revoked = PgAuthService::new(db)
        .revoke_token(UserTokenUuid::from_uuid(args.token_uuid))
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    if revoked {
        println!("revoked token {}", args.token_uuid);
    } else {
        println!("token {} was not active", args.token_uuid);
    }

    Ok(())
}
