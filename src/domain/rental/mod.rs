//! Rental aggregate

pub mod model;
pub mod repository;

pub use model::{NewRental, Rental, RentalStatus};
pub use repository::RentalRepository;
