use clap::{Args, Parser, Subcommand};

use crate::{catalog, config, utils};

#[derive(Args, Debug, Clone)]
pub struct RunMigrationsArgs {
    #[arg(short, long)]
    file: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    /// Applies a sql file found under `../migrations`
    RunMigrations(RunMigrationsArgs),
    /// Replaces the shop catalog with the sample products
    SeedShop,
}

/// Maintenance tasks for the pet care database
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    #[command(subcommand)]
    pub action: Action,
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        let db_pool = utils::setup_sqlite_db_pool(config::APP_CONFIG.is_prod()).await?;

        match &self.action {
            Action::RunMigrations(RunMigrationsArgs { file }) => {
                utils::run_migrations(&db_pool, file).await
            }
            Action::SeedShop => {
                println!("cleaning old products...");
                let total = catalog::replace_catalog(&db_pool).await?;
                println!("shop seeded with {total} products");
                Ok(())
            }
        }
    }
}
