//! Application layer: entity services and startup routines.

pub mod seed;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use seed::{seed_default_users, SeedReport};
pub use services::{
    CarModelService, CarService, LocationService, RentalService, RoleService, Services,
    UserService,
};
