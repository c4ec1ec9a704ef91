use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Media::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Media::PublicId).string_len(255).not_null())
                    .col(ColumnDef::new(Media::Url).string_len(500).not_null())
                    .col(ColumnDef::new(Media::FileType).string_len(10).not_null())
                    .col(ColumnDef::new(Media::ListingId).integer().not_null())
                    .col(
                        ColumnDef::new(Media::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_listing_id")
                            .from(Media::Table, Media::ListingId)
                            .to(PropertyListings::Table, PropertyListings::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE media
                ADD CONSTRAINT chk_media_file_type CHECK (file_type IN ('image', 'video'));

                CREATE INDEX IF NOT EXISTS idx_media_listing_id
                ON media (listing_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Media::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Media {
    Table,
    Id,
    PublicId,
    Url,
    FileType,
    ListingId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PropertyListings {
    Table,
    Id,
}
