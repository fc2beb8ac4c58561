use clap::Args;
use platter_app::{
    auth::PgAuthService,
    domain::users::{
        PgUsersService, UsersService,
        data::NewUser,
        records::UserUuid,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Name shown on orders and receipts
    #[arg(long)]
    display_name: String,

    /// Login email; must be unique
    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    delivery_address: Option<String>,

    /// Grant catalog and order administration
    #[arg(long)]
    admin: bool,

    /// Also issue a bearer token for the new user
    #[arg(long)]
    with_token: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let user = PgUsersService::new(db.clone())
        .create_user(NewUser {
            uuid: UserUuid::new(),
            display_name: args.display_name,
            email: args.email,
            phone: args.phone,
            delivery_address: args.delivery_address,
            is_admin: args.admin,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("is_admin: {}", user.is_admin);

    if args.with_token {
        let issued = PgAuthService::new(db)
            .issue_token(user.uuid)
            .await
            .map_err(|error| format!("failed to create token: {error}"))?;

        println!("bearer_token: {}", issued.token);
        println!("store this token now; it is only shown once");
    }

    Ok(())
}
