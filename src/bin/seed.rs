use property_favorites_api::{
    config::{AppConfig, IN_MEMORY_DATABASE_URL},
    db::{create_pool, run_migrations},
    seed::seed,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    if config.database_url == IN_MEMORY_DATABASE_URL {
        anyhow::bail!("DATABASE_URL points at an in-memory database; seeding it would be lost");
    }

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;
    seed(&pool).await?;

    println!("Seed completed for {}", config.database_url);
    Ok(())
}
