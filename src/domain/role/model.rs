use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::EntityId;
use crate::shared::DomainError;

/// Role name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    User,
    Admin,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl Default for RoleName {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().trim_start_matches("ROLE_") {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(DomainError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: Option<EntityId>,
    pub name: RoleName,
}

impl Role {
    pub fn new(name: RoleName) -> Self {
        Self { id: None, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        assert_eq!("admin".parse::<RoleName>().unwrap(), RoleName::Admin);
        assert_eq!("ROLE_USER".parse::<RoleName>().unwrap(), RoleName::User);
        assert!("guest".parse::<RoleName>().is_err());
    }
}
