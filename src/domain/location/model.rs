use serde::{Deserialize, Serialize};

use crate::domain::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: Option<EntityId>,
    pub city: String,
    pub street: String,
    pub postal_code: String,
}

impl Location {
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            city: city.into(),
            street: street.into(),
            postal_code: postal_code.into(),
        }
    }
}
