//! Car model catalogue (make + model name)

pub mod model;
pub mod repository;

pub use model::CarModel;
pub use repository::CarModelRepository;
