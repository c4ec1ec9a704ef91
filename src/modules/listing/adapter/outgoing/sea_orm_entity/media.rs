use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub public_id: String,
    pub url: String,
    /// `image` or `video`
    pub file_type: String,
    pub listing_id: i32,
    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property_listings::Entity",
        from = "Column::ListingId",
        to = "super::property_listings::Column::Id",
        on_delete = "Cascade"
    )]
    PropertyListings,
}

impl Related<super::property_listings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyListings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
