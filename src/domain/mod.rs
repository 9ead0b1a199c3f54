//! Domain layer: entities, DTOs and the persistence/service contracts.

pub mod car;
pub mod car_model;
pub mod location;
pub mod rental;
pub mod repository;
pub mod role;
pub mod service;
pub mod user;

// Re-export commonly used types
pub use car::{Car, CarFilter, CarParameter, CarRepository, CarStatus, CarUpdate, NewCar};
pub use car_model::{CarModel, CarModelRepository};
pub use location::{Location, LocationRepository};
pub use rental::{NewRental, Rental, RentalRepository, RentalStatus};
pub use repository::{EntityId, Repository, RepositoryProvider};
pub use role::{Role, RoleName, RoleRepository};
pub use service::{check_found, Found, Service};
pub use user::{PasswordEncoder, RegisterUser, User, UserDetail, UserRepository};

pub use crate::shared::{DomainError, DomainResult};
