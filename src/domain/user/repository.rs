use async_trait::async_trait;

use super::User;
use crate::domain::Repository;
use crate::shared::DomainResult;

#[async_trait]
pub trait UserRepository: Repository<User> {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
}
