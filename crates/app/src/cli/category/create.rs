use clap::Args;
use platter_app::domain::categories::{
    CategoriesService, PgCategoriesService, data::NewCategory, records::CategoryUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    description: Option<String>,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let category = PgCategoriesService::new(db)
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: args.name,
            description: args.description,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("name: {}", category.name);

    Ok(())
}
