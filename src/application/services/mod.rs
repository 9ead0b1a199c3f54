//! Entity services
//!
//! Each service implements [`Service`](crate::domain::Service) for its
//! entity and adds the entity's own operations on top.

pub mod car;
pub mod car_model;
pub mod location;
pub mod rental;
pub mod role;
pub mod user;

use std::sync::Arc;

pub use car::CarService;
pub use car_model::CarModelService;
pub use location::LocationService;
pub use rental::RentalService;
pub use role::RoleService;
pub use user::UserService;

use crate::domain::{PasswordEncoder, RepositoryProvider};

/// All services, wired over one repository provider
#[derive(Clone)]
pub struct Services {
    pub cars: Arc<CarService>,
    pub car_models: Arc<CarModelService>,
    pub locations: Arc<LocationService>,
    pub rentals: Arc<RentalService>,
    pub roles: Arc<RoleService>,
    pub users: Arc<UserService>,
}

impl Services {
    pub fn new(repos: Arc<dyn RepositoryProvider>, encoder: Arc<dyn PasswordEncoder>) -> Self {
        let car_models = Arc::new(CarModelService::new(repos.clone()));
        let locations = Arc::new(LocationService::new(repos.clone()));
        let roles = Arc::new(RoleService::new(repos.clone()));
        let users = Arc::new(UserService::new(repos.clone(), roles.clone(), encoder));
        let cars = Arc::new(CarService::new(
            repos.clone(),
            car_models.clone(),
            locations.clone(),
        ));
        let rentals = Arc::new(RentalService::new(repos, cars.clone(), users.clone()));

        Self {
            cars,
            car_models,
            locations,
            rentals,
            roles,
            users,
        }
    }
}
