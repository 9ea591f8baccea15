use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Title,
    Version,
    CreatedAt,
    UpdatedAt,
}

const USERS_CREATED_AT_IDX: &str = "users_created_at_idx";

fn create_users_table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(ColumnDef::new(Users::Id).uuid().not_null())
        .col(ColumnDef::new(Users::Name).string_len(255).null())
        .col(ColumnDef::new(Users::Title).string_len(255).null())
        .col(
            ColumnDef::new(Users::Version)
                .integer()
                .not_null()
                .default(1),
        )
        .col(
            ColumnDef::new(Users::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Users::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .primary_key(Index::create().name("users_pkey").col(Users::Id))
        .to_owned()
}

fn create_users_created_at_index() -> IndexCreateStatement {
    Index::create()
        .name(USERS_CREATED_AT_IDX)
        .table(Users::Table)
        .col(Users::CreatedAt)
        .if_not_exists()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(create_users_table()).await?;
        manager
            .create_index(create_users_created_at_index())
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(USERS_CREATED_AT_IDX)
                    .table(Users::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
