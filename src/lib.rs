//! # Car Rental Back Office
//!
//! CRUD over cars, users, roles and rentals with a car status state machine
//! driven by rental state.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **shared**: Error and paging types used by every layer
//! - **domain**: Core business entities, DTOs and the repository/service contracts
//! - **application**: Entity services and startup seeding
//! - **infrastructure**: External concerns (SeaORM database, bcrypt)
//! - **interfaces**: HTTP boundary (error mapping, response envelope)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
