//! Car business logic service
//!
//! Owns the car status state machine: a car becomes UNAVAILABLE while a
//! rental for it is RENTED and AVAILABLE otherwise.

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use super::car_model::CarModelService;
use super::location::LocationService;
use crate::domain::{
    check_found, Car, CarFilter, CarRepository, CarStatus, CarUpdate, EntityId, NewCar,
    RentalStatus, RepositoryProvider, Service,
};
use crate::shared::{DomainResult, Page, PageRequest};

/// Service for car business operations
pub struct CarService {
    repos: Arc<dyn RepositoryProvider>,
    car_models: Arc<CarModelService>,
    locations: Arc<LocationService>,
}

impl CarService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        car_models: Arc<CarModelService>,
        locations: Arc<LocationService>,
    ) -> Self {
        Self {
            repos,
            car_models,
            locations,
        }
    }

    /// Cars matching every criterion of `filter`.
    pub async fn find_by_filter(
        &self,
        filter: &CarFilter,
        request: &PageRequest,
    ) -> DomainResult<Page<Car>> {
        let page = self.repos.cars().find_by_filter(filter, request).await?;
        check_found(page, || format!("No cars found for filter: {}", filter))
    }

    /// Whether the car currently has a RENTED rental
    pub async fn check_if_rented(&self, car_id: EntityId) -> DomainResult<bool> {
        self.find_by_id(car_id).await?;
        let active = self.repos.rentals().find_active_by_car(car_id).await?;
        Ok(active.is_some())
    }

    pub async fn change_status(&self, car_id: EntityId, status: CarStatus) -> DomainResult<Car> {
        let mut car = self.find_by_id(car_id).await?;
        if car.status == status {
            debug!(car_id, %status, "Car status unchanged");
            return Ok(car);
        }

        car.status = status;
        let car = self.save(car).await?;
        info!(car_id, %status, "Car status changed");
        Ok(car)
    }

    /// RENTED makes the car UNAVAILABLE, every other rental status makes it
    /// AVAILABLE.
    pub async fn change_car_status_by_rental_status(
        &self,
        car_id: EntityId,
        rental_status: RentalStatus,
    ) -> DomainResult<Car> {
        self.change_status(car_id, CarStatus::for_rental_status(rental_status))
            .await
    }

    /// Flip the car to AVAILABLE unless a RENTED rental holds it.
    ///
    /// The check and the write are one statement in the store. Returns
    /// whether the car row changed.
    pub async fn mark_available_if_not_rented(&self, car_id: EntityId) -> DomainResult<bool> {
        self.find_by_id(car_id).await?;
        let changed = self
            .repos
            .cars()
            .change_to_available_if_not_rented(car_id)
            .await?;

        if changed {
            info!(car_id, "Car released to AVAILABLE");
        } else {
            debug!(car_id, "Car kept, an active rental holds it");
        }
        Ok(changed)
    }

    pub async fn create_new_car(&self, new_car: NewCar) -> DomainResult<Car> {
        new_car.validate()?;

        self.car_models.find_by_id(new_car.car_model_id).await?;
        self.locations.find_by_id(new_car.location_id).await?;

        let car = Car::new(
            new_car.registration_number,
            new_car.car_model_id,
            new_car.location_id,
            new_car.parameters,
        );
        let car = self.save(car).await?;

        info!(
            car_id = ?car.id,
            registration_number = %car.registration_number,
            "Car created"
        );
        Ok(car)
    }

    /// Merge the provided fields of `update` into the stored car.
    pub async fn edit_car(&self, car_id: EntityId, update: CarUpdate) -> DomainResult<Car> {
        update.validate()?;

        let mut car = self.find_by_id(car_id).await?;

        if let Some(registration_number) = update.registration_number {
            car.registration_number = registration_number;
        }
        if let Some(model_id) = update.car_model_id {
            self.car_models.find_by_id(model_id).await?;
            car.car_model_id = model_id;
        }
        if let Some(status) = update.status {
            car.status = status;
        }
        if let Some(location_id) = update.location_id {
            self.locations.find_by_id(location_id).await?;
            car.location_id = location_id;
        }
        car.parameters.apply(update.parameters);

        let car = self.save(car).await?;
        info!(car_id, "Car edited");
        Ok(car)
    }
}

impl Service<Car> for CarService {
    type Repo = dyn CarRepository;

    const ENTITY: &'static str = "car";

    fn repository(&self) -> &Self::Repo {
        self.repos.cars()
    }
}

// ── Tests ──────────────────────────────────────────────────────
