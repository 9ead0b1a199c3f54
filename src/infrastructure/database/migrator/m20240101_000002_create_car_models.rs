//! Create car_models table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CarModels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CarModels::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CarModels::Make).string().not_null())
                    .col(ColumnDef::new(CarModels::ModelName).string().not_null())
                    .col(ColumnDef::new(CarModels::ProductionYear).integer())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CarModels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CarModels {
    Table,
    Id,
    Make,
    ModelName,
    ProductionYear,
}
