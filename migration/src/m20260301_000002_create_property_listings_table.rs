use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create property_listings table
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(PropertyListings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyListings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PropertyListings::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyListings::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyListings::Price)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyListings::PropertyType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyListings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PropertyListings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PropertyListings::UserId)
                            .integer()
                            .not_null(),
                    )
                    // The application deletes children explicitly; the FK cascade is a backstop.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_listings_user_id")
                            .from(PropertyListings::Table, PropertyListings::UserId)
                            .to(Users::Table, Users::Id)
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
                ALTER TABLE property_listings
                ADD CONSTRAINT chk_property_listings_price_positive CHECK (price > 0),
                ADD CONSTRAINT chk_property_listings_type
                    CHECK (property_type IN ('sale', 'rental', 'purchase'));
                "#,
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_property_listings_user_id
                ON property_listings (user_id);

                CREATE INDEX IF NOT EXISTS idx_property_listings_type_created
                ON property_listings (property_type, created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyListings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PropertyListings {
    Table,
    Id,
    Title,
    Description,
    Price,
    PropertyType,
    CreatedAt,
    UpdatedAt,
    UserId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
