//! Role lookup service

use std::sync::Arc;

use crate::domain::{check_found, RepositoryProvider, Role, RoleName, RoleRepository, Service};
use crate::shared::DomainResult;

pub struct RoleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RoleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn find_by_role_name(&self, name: RoleName) -> DomainResult<Role> {
        let role = self.repos.roles().find_by_name(name).await?;
        check_found(role, || format!("The role name: {} was not found", name))
    }
}

impl Service<Role> for RoleService {
    type Repo = dyn RoleRepository;

    const ENTITY: &'static str = "role";

    fn repository(&self) -> &Self::Repo {
        self.repos.roles()
    }
}

#[cfg(test)]
mod tests {
    use crate::application::testing::TestContext;
    use crate::domain::{RoleName, Service};

    #[tokio::test]
    async fn migrated_roles_are_found_by_name() {
        let ctx = TestContext::new().await;

        let user = ctx.services.roles.find_by_role_name(RoleName::User).await.unwrap();
        let admin = ctx.services.roles.find_by_role_name(RoleName::Admin).await.unwrap();

        assert_eq!(user.name, RoleName::User);
        assert_eq!(admin.name, RoleName::Admin);
        assert_ne!(user.id, admin.id);
        assert_eq!(ctx.services.roles.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn deleted_role_is_not_found_by_name() {
        let ctx = TestContext::new().await;
        let admin = ctx.services.roles.find_by_role_name(RoleName::Admin).await.unwrap();
        ctx.services.roles.delete_by_id(admin.id.unwrap()).await.unwrap();

        let err = ctx
            .services
            .roles
            .find_by_role_name(RoleName::Admin)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "The role name: ADMIN was not found");
    }
}
