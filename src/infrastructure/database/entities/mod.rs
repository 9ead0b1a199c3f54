//! Database entities module

pub mod car;
pub mod car_model;
pub mod location;
pub mod rental;
pub mod role;
pub mod user;
pub mod user_detail;
pub mod user_role;

pub use car::Entity as Car;
pub use car_model::Entity as CarModel;
pub use location::Entity as Location;
pub use rental::Entity as Rental;
pub use role::Entity as Role;
pub use user::Entity as User;
pub use user_detail::Entity as UserDetail;
pub use user_role::Entity as UserRole;
