//! Rental domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::EntityId;
use crate::shared::DomainError;

/// Rental lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    /// Booked, car not handed over yet
    Reserved,
    /// Car is with the customer
    Rented,
    /// Car came back
    Returned,
    /// Booking withdrawn before hand-over
    Cancelled,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Rented => "RENTED",
            Self::Returned => "RETURNED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn is_active(&self) -> bool {
        *self == Self::Rented
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RESERVED" => Ok(Self::Reserved),
            "RENTED" => Ok(Self::Rented),
            "RETURNED" => Ok(Self::Returned),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "Unknown rental status: {}",
                other
            ))),
        }
    }
}

/// A car handed to a user over a time window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rental {
    pub id: Option<EntityId>,
    pub car_id: EntityId,
    pub user_id: EntityId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: RentalStatus,
}

impl Rental {
    pub fn new(
        car_id: EntityId,
        user_id: EntityId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            car_id,
            user_id,
            starts_at,
            ends_at,
            status: RentalStatus::Reserved,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Payload for opening a rental
#[derive(Debug, Clone, Deserialize)]
pub struct NewRental {
    pub car_id: EntityId,
    pub user_id: EntityId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_rental_is_reserved() {
        let now = Utc::now();
        let r = Rental::new(1, 2, now, now + Duration::days(3));
        assert_eq!(r.status, RentalStatus::Reserved);
        assert!(!r.is_active());
        assert_eq!(r.id, None);
    }

    #[test]
    fn only_rented_is_active() {
        assert!(RentalStatus::Rented.is_active());
        assert!(!RentalStatus::Reserved.is_active());
        assert!(!RentalStatus::Returned.is_active());
        assert!(!RentalStatus::Cancelled.is_active());
    }

    #[test]
    fn status_parsing() {
        assert_eq!("rented".parse::<RentalStatus>().unwrap(), RentalStatus::Rented);
        assert_eq!(
            RentalStatus::Cancelled.as_str().parse::<RentalStatus>().unwrap(),
            RentalStatus::Cancelled
        );
        assert!("lost".parse::<RentalStatus>().is_err());
    }
}
