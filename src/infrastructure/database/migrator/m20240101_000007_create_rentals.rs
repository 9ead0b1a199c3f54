//! Create rentals table

use sea_orm_migration::prelude::*;

use super::m20240101_000003_create_cars::Cars;
use super::m20240101_000005_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rentals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rentals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rentals::CarId).integer().not_null())
                    .col(ColumnDef::new(Rentals::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Rentals::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rentals::EndsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rentals::Status)
                            .string()
                            .not_null()
                            .default("RESERVED"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rentals_car")
                            .from(Rentals::Table, Rentals::CarId)
                            .to(Cars::Table, Cars::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rentals_user")
                            .from(Rentals::Table, Rentals::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rentals_car_status")
                    .table(Rentals::Table)
                    .col(Rentals::CarId)
                    .col(Rentals::Status)
                    .to_owned(),
            )
            .await?;

        // At most one RENTED rental per car
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_rentals_one_rented_per_car \
                 ON rentals (car_id) WHERE status = 'RENTED'",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rentals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Rentals {
    Table,
    Id,
    CarId,
    UserId,
    StartsAt,
    EndsAt,
    Status,
}
