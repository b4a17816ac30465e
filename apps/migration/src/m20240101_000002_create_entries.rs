use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Entries::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Entries::Author).string().null())
                    .col(ColumnDef::new(Entries::Title).string().not_null())
                    .col(ColumnDef::new(Entries::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Entries::BodySource).text().not_null())
                    .col(ColumnDef::new(Entries::Html).text().not_null())
                    .col(
                        ColumnDef::new(Entries::Published)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Entries::Updated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Archive, home and feed all read newest-first.
        manager
            .create_index(
                Index::create()
                    .name("idx_entries_published")
                    .table(Entries::Table)
                    .col(Entries::Published)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Entries {
    Table,
    Id,
    Author,
    Title,
    Slug,
    BodySource,
    Html,
    Published,
    Updated,
}
