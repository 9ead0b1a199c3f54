//! Create cars table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_locations::Locations;
use super::m20240101_000002_create_car_models::CarModels;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cars::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Cars::RegistrationNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Cars::CarModelId).integer().not_null())
                    .col(ColumnDef::new(Cars::LocationId).integer().not_null())
                    .col(
                        ColumnDef::new(Cars::Status)
                            .string()
                            .not_null()
                            .default("AVAILABLE"),
                    )
                    .col(ColumnDef::new(Cars::BodyType).string().not_null())
                    .col(ColumnDef::new(Cars::GearboxType).string().not_null())
                    .col(ColumnDef::new(Cars::FuelType).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cars_car_model")
                            .from(Cars::Table, Cars::CarModelId)
                            .to(CarModels::Table, CarModels::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cars_location")
                            .from(Cars::Table, Cars::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cars_status")
                    .table(Cars::Table)
                    .col(Cars::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Cars {
    Table,
    Id,
    RegistrationNumber,
    CarModelId,
    LocationId,
    Status,
    BodyType,
    GearboxType,
    FuelType,
}
