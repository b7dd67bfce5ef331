use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Transactions {
    Table,
    SaleMonth,
    Sold,
    Category,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-sale_month-sold")
                    .table(Transactions::Table)
                    .col(Transactions::SaleMonth)
                    .col(Transactions::Sold)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-sale_month-category")
                    .table(Transactions::Table)
                    .col(Transactions::SaleMonth)
                    .col(Transactions::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-transactions-sale_month-category")
                    .table(Transactions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx-transactions-sale_month-sold")
                    .table(Transactions::Table)
                    .to_owned(),
            )
            .await
    }
}
