//! Car aggregate
//!
//! Contains the Car entity, its parameter bundle, DTOs, the query filter
//! and the repository interface.

pub mod filter;
pub mod model;
pub mod repository;

mod dto;

pub use dto::{CarUpdate, NewCar};
pub use filter::CarFilter;
pub use model::{
    BodyType, Car, CarParameter, CarParameterUpdate, CarStatus, FuelType, GearboxType,
};
pub use repository::CarRepository;
