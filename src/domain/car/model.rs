//! Car domain entity

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::rental::RentalStatus;
use crate::domain::EntityId;
use crate::shared::DomainError;

/// Car availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarStatus {
    Available,
    Unavailable,
}

impl CarStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Unavailable => "UNAVAILABLE",
        }
    }

    /// Car status implied by a rental status: a rented car is unavailable,
    /// any other rental state leaves it available.
    pub fn for_rental_status(rental_status: RentalStatus) -> Self {
        if rental_status == RentalStatus::Rented {
            Self::Unavailable
        } else {
            Self::Available
        }
    }
}

impl Default for CarStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "UNAVAILABLE" => Ok(Self::Unavailable),
            other => Err(DomainError::Validation(format!("Unknown car status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyType {
    Sedan,
    Hatchback,
    Estate,
    Suv,
    Coupe,
    Convertible,
    Van,
}

impl BodyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedan => "SEDAN",
            Self::Hatchback => "HATCHBACK",
            Self::Estate => "ESTATE",
            Self::Suv => "SUV",
            Self::Coupe => "COUPE",
            Self::Convertible => "CONVERTIBLE",
            Self::Van => "VAN",
        }
    }
}

impl FromStr for BodyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SEDAN" => Ok(Self::Sedan),
            "HATCHBACK" => Ok(Self::Hatchback),
            "ESTATE" => Ok(Self::Estate),
            "SUV" => Ok(Self::Suv),
            "COUPE" => Ok(Self::Coupe),
            "CONVERTIBLE" => Ok(Self::Convertible),
            "VAN" => Ok(Self::Van),
            other => Err(DomainError::Validation(format!("Unknown body type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GearboxType {
    Manual,
    Automatic,
}

impl GearboxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Automatic => "AUTOMATIC",
        }
    }
}

impl FromStr for GearboxType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MANUAL" => Ok(Self::Manual),
            "AUTOMATIC" => Ok(Self::Automatic),
            other => Err(DomainError::Validation(format!("Unknown gearbox type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Petrol,
    Diesel,
    Lpg,
    Hybrid,
    Electric,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petrol => "PETROL",
            Self::Diesel => "DIESEL",
            Self::Lpg => "LPG",
            Self::Hybrid => "HYBRID",
            Self::Electric => "ELECTRIC",
        }
    }
}

impl FromStr for FuelType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PETROL" => Ok(Self::Petrol),
            "DIESEL" => Ok(Self::Diesel),
            "LPG" => Ok(Self::Lpg),
            "HYBRID" => Ok(Self::Hybrid),
            "ELECTRIC" => Ok(Self::Electric),
            other => Err(DomainError::Validation(format!("Unknown fuel type: {}", other))),
        }
    }
}

/// Technical parameters of a car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarParameter {
    pub body_type: BodyType,
    pub gearbox_type: GearboxType,
    pub fuel_type: FuelType,
}

/// Partial update of [`CarParameter`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CarParameterUpdate {
    pub body_type: Option<BodyType>,
    pub gearbox_type: Option<GearboxType>,
    pub fuel_type: Option<FuelType>,
}

impl CarParameter {
    pub fn apply(&mut self, update: CarParameterUpdate) {
        if let Some(body_type) = update.body_type {
            self.body_type = body_type;
        }
        if let Some(gearbox_type) = update.gearbox_type {
            self.gearbox_type = gearbox_type;
        }
        if let Some(fuel_type) = update.fuel_type {
            self.fuel_type = fuel_type;
        }
    }
}

/// Car entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Car {
    /// `None` until the car has been saved
    pub id: Option<EntityId>,
    /// Unique registration (licence plate) number
    pub registration_number: String,
    pub car_model_id: EntityId,
    pub location_id: EntityId,
    pub status: CarStatus,
    pub parameters: CarParameter,
}

impl Car {
    pub fn new(
        registration_number: impl Into<String>,
        car_model_id: EntityId,
        location_id: EntityId,
        parameters: CarParameter,
    ) -> Self {
        Self {
            id: None,
            registration_number: registration_number.into(),
            car_model_id,
            location_id,
            status: CarStatus::default(),
            parameters,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == CarStatus::Available
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parameters() -> CarParameter {
        CarParameter {
            body_type: BodyType::Sedan,
            gearbox_type: GearboxType::Manual,
            fuel_type: FuelType::Petrol,
        }
    }

    #[test]
    fn rented_makes_car_unavailable() {
        assert_eq!(
            CarStatus::for_rental_status(RentalStatus::Rented),
            CarStatus::Unavailable
        );
    }

    #[test]
    fn every_other_rental_status_makes_car_available() {
        for status in [
            RentalStatus::Reserved,
            RentalStatus::Returned,
            RentalStatus::Cancelled,
        ] {
            assert_eq!(CarStatus::for_rental_status(status), CarStatus::Available);
        }
    }

    #[test]
    fn new_car_is_available_and_unsaved() {
        let car = Car::new("DW 12345", 1, 2, sample_parameters());
        assert_eq!(car.id, None);
        assert!(car.is_available());
        assert_eq!(car.car_model_id, 1);
        assert_eq!(car.location_id, 2);
    }

    #[test]
    fn parameter_update_only_touches_given_fields() {
        let mut params = sample_parameters();
        params.apply(CarParameterUpdate {
            gearbox_type: Some(GearboxType::Automatic),
            ..Default::default()
        });
        assert_eq!(params.gearbox_type, GearboxType::Automatic);
        assert_eq!(params.body_type, BodyType::Sedan);
        assert_eq!(params.fuel_type, FuelType::Petrol);

        let before = params.clone();
        params.apply(CarParameterUpdate::default());
        assert_eq!(params, before);
    }

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!("available".parse::<CarStatus>().unwrap(), CarStatus::Available);
        assert_eq!(" UNAVAILABLE ".parse::<CarStatus>().unwrap(), CarStatus::Unavailable);
        assert!("broken".parse::<CarStatus>().is_err());
    }

    #[test]
    fn enum_strings_roundtrip() {
        for body in [BodyType::Suv, BodyType::Van, BodyType::Estate] {
            assert_eq!(body.as_str().parse::<BodyType>().unwrap(), body);
        }
        assert_eq!("lpg".parse::<FuelType>().unwrap(), FuelType::Lpg);
        assert_eq!("Automatic".parse::<GearboxType>().unwrap(), GearboxType::Automatic);
    }
}
