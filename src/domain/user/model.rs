use serde::Serialize;

use crate::domain::role::{Role, RoleName};
use crate::domain::EntityId;

/// Postal address of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDetail {
    pub id: Option<EntityId>,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
}

/// User model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub detail: UserDetail,
}

impl User {
    pub fn has_role(&self, name: RoleName) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }

    pub fn role_names(&self) -> Vec<RoleName> {
        self.roles.iter().map(|r| r.name).collect()
    }
}
