//! Car repository interface

use async_trait::async_trait;

use super::filter::CarFilter;
use super::model::Car;
use crate::domain::{EntityId, Repository};
use crate::shared::{DomainResult, Page, PageRequest};

#[async_trait]
pub trait CarRepository: Repository<Car> {
    async fn find_by_filter(
        &self,
        filter: &CarFilter,
        request: &PageRequest,
    ) -> DomainResult<Page<Car>>;

    /// Make the car AVAILABLE unless it has an active (RENTED) rental.
    ///
    /// Runs as one conditional statement in the store, so a rental that
    /// becomes active concurrently wins. Returns whether a row changed.
    async fn change_to_available_if_not_rented(&self, car_id: EntityId) -> DomainResult<bool>;
}
