//! Create user_details and users tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserDetails::City).string().not_null())
                    .col(ColumnDef::new(UserDetails::Street).string().not_null())
                    .col(ColumnDef::new(UserDetails::HouseNumber).string().not_null())
                    .col(ColumnDef::new(UserDetails::PostalCode).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::UserDetailId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_user_detail")
                            .from(Users::Table, Users::UserDetailId)
                            .to(UserDetails::Table, UserDetails::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserDetails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum UserDetails {
    Table,
    Id,
    City,
    Street,
    HouseNumber,
    PostalCode,
}

#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    UserDetailId,
}
