use crate::shared::DomainResult;

/// One-way password transform. Hashes are never reversed.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> DomainResult<String>;
    fn matches(&self, raw: &str, hash: &str) -> bool;
}
