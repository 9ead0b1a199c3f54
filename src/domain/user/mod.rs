//! User aggregate
//!
//! Contains the User entity, its address detail, the registration DTO,
//! the password-hashing port and the repository interface.

pub mod model;
pub mod password;
pub mod repository;

mod dto_register;

pub use dto_register::RegisterUser;
pub use model::{User, UserDetail};
pub use password::PasswordEncoder;
pub use repository::UserRepository;
