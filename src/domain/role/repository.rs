use async_trait::async_trait;

use super::model::{Role, RoleName};
use crate::domain::Repository;
use crate::shared::DomainResult;

#[async_trait]
pub trait RoleRepository: Repository<Role> {
    async fn find_by_name(&self, name: RoleName) -> DomainResult<Option<Role>>;
}
