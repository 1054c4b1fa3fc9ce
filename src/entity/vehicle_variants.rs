use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicle_variants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub model_id: Uuid,
    pub version: String,
    pub color: Option<String>,
    pub product_year: Option<i32>,
    pub price: i64,
    /// Units on hand. Informational only; orders never decrement it.
    pub quantity: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle_models::Entity",
        from = "Column::ModelId",
        to = "super::vehicle_models::Column::Id"
    )]
    VehicleModels,
}

impl Related<super::vehicle_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VehicleModels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
