//! Car entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub registration_number: String,
    pub car_model_id: i32,
    pub location_id: i32,

    /// Status: AVAILABLE, UNAVAILABLE
    pub status: String,

    pub body_type: String,
    pub gearbox_type: String,
    pub fuel_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::car_model::Entity",
        from = "Column::CarModelId",
        to = "super::car_model::Column::Id"
    )]
    CarModel,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
    #[sea_orm(has_many = "super::rental::Entity")]
    Rentals,
}

impl Related<super::car_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarModel.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::rental::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rentals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
