//! Role aggregate

pub mod model;
pub mod repository;

pub use model::{Role, RoleName};
pub use repository::RoleRepository;
