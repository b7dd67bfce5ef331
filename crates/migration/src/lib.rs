pub use sea_orm_migration::prelude::*;

mod m20260301_000000_transactions;
mod m20260302_000000_sale_month_index;

/// Database used by the command-line tools when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./dashboard.db?mode=rwc";

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000000_transactions::Migration),
            Box::new(m20260302_000000_sale_month_index::Migration),
        ]
    }
}
