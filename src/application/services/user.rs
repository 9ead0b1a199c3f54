//! User management service
//!
//! Registration, lookups by email and role assignment. Passwords are hashed
//! through the [`PasswordEncoder`] port before they reach the repository.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use super::role::RoleService;
use crate::domain::{
    check_found, EntityId, PasswordEncoder, RegisterUser, RepositoryProvider, RoleName, Service,
    User, UserDetail, UserRepository,
};
use crate::shared::{DomainError, DomainResult};

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    roles: Arc<RoleService>,
    encoder: Arc<dyn PasswordEncoder>,
}

impl UserService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        roles: Arc<RoleService>,
        encoder: Arc<dyn PasswordEncoder>,
    ) -> Self {
        Self {
            repos,
            roles,
            encoder,
        }
    }

    pub async fn find_by_email(&self, email: &str) -> DomainResult<User> {
        let user = self.repos.users().find_by_email(email).await?;
        check_found(user, || format!("The user with email: {} was not found", email))
    }

    pub async fn email_exists(&self, email: &str) -> DomainResult<bool> {
        Ok(self.repos.users().find_by_email(email).await?.is_some())
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user with the USER role.
    ///
    /// Fails with `DuplicateEmail` without writing anything when the email
    /// is taken.
    pub async fn registration_new_user(&self, payload: RegisterUser) -> DomainResult<User> {
        self.registration_with_roles(payload, &[]).await
    }

    /// Register a new user holding USER plus `extra` roles.
    ///
    /// Every role is resolved before the single save, so a missing role
    /// leaves no account behind.
    pub async fn registration_with_roles(
        &self,
        payload: RegisterUser,
        extra: &[RoleName],
    ) -> DomainResult<User> {
        payload.validate()?;

        if self.email_exists(&payload.email).await? {
            warn!(email = %payload.email, "Registration rejected, email taken");
            return Err(DomainError::DuplicateEmail(payload.email));
        }

        let password_hash = self.encoder.encode(&payload.password)?;

        let mut names = vec![RoleName::User];
        for &name in extra {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        let mut roles = Vec::with_capacity(names.len());
        for name in names {
            roles.push(self.roles.find_by_role_name(name).await?);
        }

        let user = User {
            id: None,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password_hash,
            roles,
            detail: UserDetail {
                id: None,
                city: payload.city,
                street: payload.street,
                house_number: payload.house_number,
                postal_code: payload.postal_code,
            },
        };

        let user = self.save(user).await?;
        info!(user_id = ?user.id, email = %user.email, "User registered");
        Ok(user)
    }

    /// Add the named roles the user does not hold yet.
    pub async fn assign_roles(&self, user_id: EntityId, names: &[RoleName]) -> DomainResult<User> {
        let mut user = self.find_by_id(user_id).await?;

        let mut added = Vec::new();
        for &name in names {
            if user.has_role(name) {
                continue;
            }
            user.roles.push(self.roles.find_by_role_name(name).await?);
            added.push(name);
        }

        if added.is_empty() {
            return Ok(user);
        }

        let user = self.save(user).await?;
        info!(user_id, roles = ?added, "Roles assigned");
        Ok(user)
    }

    /// Whether `raw` is the user's password
    pub fn password_matches(&self, user: &User, raw: &str) -> bool {
        self.encoder.matches(raw, &user.password_hash)
    }
}

impl Service<User> for UserService {
    type Repo = dyn UserRepository;

    const ENTITY: &'static str = "user";

    fn repository(&self) -> &Self::Repo {
        self.repos.users()
    }
}

// ── Tests ──────────────────────────────────────────────────────
