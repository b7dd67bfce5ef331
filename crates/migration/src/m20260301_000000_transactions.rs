//! Creates the `transactions` table holding the seeded product sales.
//!
//! `row_id` is a surrogate key that fixes insertion order; the upstream `id`
//! is kept as plain data because it is not unique across reseeds.
//! `sale_month`, `title_folded` and `description_folded` are derived when a
//! row is written.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Transactions {
    Table,
    RowId,
    Id,
    Title,
    Description,
    Price,
    Category,
    Sold,
    Image,
    DateOfSale,
    SaleMonth,
    TitleFolded,
    DescriptionFolded,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::RowId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Id).big_integer().not_null())
                    .col(ColumnDef::new(Transactions::Title).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Transactions::Price).double().not_null())
                    .col(ColumnDef::new(Transactions::Category).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::Sold)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Transactions::Image).string())
                    .col(
                        ColumnDef::new(Transactions::DateOfSale)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::SaleMonth).integer().not_null())
                    .col(ColumnDef::new(Transactions::TitleFolded).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::DescriptionFolded)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}
