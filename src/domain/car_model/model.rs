use serde::{Deserialize, Serialize};

use crate::domain::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarModel {
    pub id: Option<EntityId>,
    pub make: String,
    pub model_name: String,
    pub production_year: Option<i32>,
}

impl CarModel {
    pub fn new(make: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            id: None,
            make: make.into(),
            model_name: model_name.into(),
            production_year: None,
        }
    }
}
