use async_trait::async_trait;

use super::model::Rental;
use crate::domain::{EntityId, Repository};
use crate::shared::DomainResult;

#[async_trait]
pub trait RentalRepository: Repository<Rental> {
    /// The RENTED rental currently holding the car, if any
    async fn find_active_by_car(&self, car_id: EntityId) -> DomainResult<Option<Rental>>;

    /// Save the rental and bring its car in line in one transaction.
    ///
    /// RENTED makes the car UNAVAILABLE. Any other status releases the car
    /// unless another RENTED rental holds it. A second RENTED rental for the
    /// same car is a `Conflict` and nothing is written.
    async fn save_with_car_status(&self, rental: Rental) -> DomainResult<Rental>;
}
