//! Composable car query predicate

use std::fmt;

use super::model::{BodyType, CarStatus, FuelType, GearboxType};
use crate::domain::EntityId;

/// Conjunction of optional criteria; an empty filter matches every car.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarFilter {
    pub status: Option<CarStatus>,
    pub body_type: Option<BodyType>,
    pub gearbox_type: Option<GearboxType>,
    pub fuel_type: Option<FuelType>,
    pub car_model_id: Option<EntityId>,
    pub location_id: Option<EntityId>,
}

impl CarFilter {
    pub fn with_status(mut self, status: CarStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    pub fn with_gearbox_type(mut self, gearbox_type: GearboxType) -> Self {
        self.gearbox_type = Some(gearbox_type);
        self
    }

    pub fn with_fuel_type(mut self, fuel_type: FuelType) -> Self {
        self.fuel_type = Some(fuel_type);
        self
    }

    pub fn with_car_model(mut self, car_model_id: EntityId) -> Self {
        self.car_model_id = Some(car_model_id);
        self
    }

    pub fn with_location(mut self, location_id: EntityId) -> Self {
        self.location_id = Some(location_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for CarFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(status) = self.status {
            parts.push(format!("status={}", status.as_str()));
        }
        if let Some(body_type) = self.body_type {
            parts.push(format!("bodyType={}", body_type.as_str()));
        }
        if let Some(gearbox_type) = self.gearbox_type {
            parts.push(format!("gearboxType={}", gearbox_type.as_str()));
        }
        if let Some(fuel_type) = self.fuel_type {
            parts.push(format!("fuelType={}", fuel_type.as_str()));
        }
        if let Some(id) = self.car_model_id {
            parts.push(format!("carModel={}", id));
        }
        if let Some(id) = self.location_id {
            parts.push(format!("location={}", id));
        }

        if parts.is_empty() {
            f.write_str("<any>")
        } else {
            f.write_str(&parts.join(" && "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_criteria_in_order() {
        let filter = CarFilter::default()
            .with_fuel_type(FuelType::Diesel)
            .with_status(CarStatus::Available);
        assert_eq!(filter.to_string(), "status=AVAILABLE && fuelType=DIESEL");
    }

    #[test]
    fn empty_filter() {
        assert!(CarFilter::default().is_empty());
        assert_eq!(CarFilter::default().to_string(), "<any>");
        assert!(!CarFilter::default().with_location(3).is_empty());
    }
}
