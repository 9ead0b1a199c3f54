//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    CarModelRepository, CarRepository, LocationRepository, RentalRepository, RepositoryProvider,
    RoleRepository, UserRepository,
};

use super::car_model_repository::SeaOrmCarModelRepository;
use super::car_repository::SeaOrmCarRepository;
use super::location_repository::SeaOrmLocationRepository;
use super::rental_repository::SeaOrmRentalRepository;
use super::role_repository::SeaOrmRoleRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let car = repos.cars().find_by_id(7).await?;
/// let admin = repos.users().find_by_email("admin@example.com").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    cars: SeaOrmCarRepository,
    car_models: SeaOrmCarModelRepository,
    locations: SeaOrmLocationRepository,
    rentals: SeaOrmRentalRepository,
    roles: SeaOrmRoleRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cars: SeaOrmCarRepository::new(db.clone()),
            car_models: SeaOrmCarModelRepository::new(db.clone()),
            locations: SeaOrmLocationRepository::new(db.clone()),
            rentals: SeaOrmRentalRepository::new(db.clone()),
            roles: SeaOrmRoleRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn cars(&self) -> &(dyn CarRepository + 'static) {
        &self.cars
    }

    fn car_models(&self) -> &(dyn CarModelRepository + 'static) {
        &self.car_models
    }

    fn locations(&self) -> &(dyn LocationRepository + 'static) {
        &self.locations
    }

    fn rentals(&self) -> &(dyn RentalRepository + 'static) {
        &self.rentals
    }

    fn roles(&self) -> &(dyn RoleRepository + 'static) {
        &self.roles
    }

    fn users(&self) -> &(dyn UserRepository + 'static) {
        &self.users
    }
}
