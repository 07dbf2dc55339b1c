use dotenvy::dotenv;
use studio_store::config::{catalog, database};
use studio_store::core::{product, session::AdminGate};
use studio_store::errors::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Initialize database
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Seed the catalog if a config.toml is present
    match catalog::load_default_config() {
        Ok(config) => {
            let inserted = product::seed_products(&db, &config)
                .await
                .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;
            info!("Catalog seeded: {} new products.", inserted);
        }
        Err(e) => {
            warn!("No seed catalog loaded ({}), continuing with existing data.", e);
        }
    }

    // 5. Make sure the admin gate is usable before reporting ready
    let _gate = AdminGate::from_env()
        .inspect_err(|e| error!("Admin gate configuration error: {}", e))?;
    info!("Admin gate configured.");

    let products = product::get_products(&db).await?;
    info!("Store backend ready with {} products.", products.len());

    Ok(())
}
