use std::{error::Error, time::Duration};

use clap::{Args, Parser, Subcommand};
use engine::{Engine, HttpDataset, Month};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "dashboard_admin")]
#[command(about = "Admin utilities for the transaction dashboard (migrate, reseed, inspect)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = migration::DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Log level for the engine and this tool.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Replace the stored transactions with the upstream dataset.
    Seed(SeedArgs),
    /// Print the sales statistics of a month.
    Stats(MonthArgs),
    /// Print statistics, price ranges and categories of a month.
    Summary(MonthArgs),
}

#[derive(Args, Debug)]
struct SeedArgs {
    #[arg(long, default_value = engine::DEFAULT_DATASET_URL)]
    dataset_url: String,
    /// HTTP timeout for the dataset download, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Args, Debug)]
struct MonthArgs {
    /// Month name, case-insensitive.
    #[arg(long, default_value = "March")]
    month: String,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn print_statistics(month: Month, stats: &engine::SalesStatistics) {
    println!("{}", month.name());
    println!("  total sale amount: {:.2}", stats.total_sale_amount);
    println!("  sold items:        {}", stats.total_sold_items);
    println!("  not sold items:    {}", stats.total_not_sold_items);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "dashboard_admin={level},engine={level}",
            level = cli.log_level
        ))
        .with_writer(std::io::stderr)
        .init();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::Migrate => {
            tracing::info!("migrations applied to {}", cli.database_url);
        }
        Command::Seed(args) => {
            let dataset =
                HttpDataset::new(args.dataset_url, Duration::from_secs(args.timeout_secs))?;
            let engine = Engine::builder()
                .database(db.clone())
                .dataset(dataset)
                .build()
                .await?;
            let count = engine.seed().await?;
            println!("seeded {count} transactions");
        }
        Command::Stats(args) => {
            let month = engine::parse_month(&args.month)?;
            let engine = Engine::builder().database(db.clone()).build().await?;
            let stats = engine.statistics(month).await?;
            print_statistics(month, &stats);
        }
        Command::Summary(args) => {
            let month = engine::parse_month(&args.month)?;
            let engine = Engine::builder().database(db.clone()).build().await?;
            let dashboard = engine.dashboard(month).await?;

            print_statistics(month, &dashboard.statistics);
            println!("  price ranges:");
            for range in &dashboard.price_ranges {
                println!("    {:>9}  {}", range.bucket.label(), range.count);
            }
            println!("  categories:");
            for category in &dashboard.categories {
                println!("    {}  {}", category.category, category.count);
            }
        }
    }

    db.close().await?;
    Ok(())
}
