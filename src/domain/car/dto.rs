use serde::Deserialize;
use validator::Validate;

use super::model::{CarParameter, CarParameterUpdate, CarStatus};
use crate::domain::EntityId;

/// Payload for creating a car
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCar {
    #[validate(length(min = 2, max = 20))]
    pub registration_number: String,
    pub car_model_id: EntityId,
    pub location_id: EntityId,
    pub parameters: CarParameter,
}

/// Partial car edit. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CarUpdate {
    #[validate(length(min = 2, max = 20))]
    pub registration_number: Option<String>,
    pub car_model_id: Option<EntityId>,
    pub status: Option<CarStatus>,
    pub location_id: Option<EntityId>,
    #[serde(default)]
    pub parameters: CarParameterUpdate,
}
