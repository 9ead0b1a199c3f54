//! Generic service contract with uniform not-found semantics.

use async_trait::async_trait;

use super::repository::{EntityId, Repository};
use crate::shared::{DomainError, DomainResult, Page, PageRequest};

/// A lookup result that can be empty.
pub trait Found {
    type Value;

    fn found(self) -> Option<Self::Value>;
}

impl<T> Found for Option<T> {
    type Value = T;

    fn found(self) -> Option<T> {
        self
    }
}

impl<T> Found for Page<T> {
    type Value = Page<T>;

    fn found(self) -> Option<Page<T>> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl<T> Found for Vec<T> {
    type Value = Vec<T>;

    fn found(self) -> Option<Vec<T>> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// Unwrap a lookup result or fail with `NotFound` carrying `describe()`.
///
/// `describe` is only evaluated on the empty path.
pub fn check_found<F: Found>(value: F, describe: impl FnOnce() -> String) -> DomainResult<F::Value> {
    value.found().ok_or_else(|| DomainError::NotFound(describe()))
}

/// CRUD service over one entity type.
///
/// Implementors supply the repository and an entity name; the default
/// methods route every lookup through [`check_found`]. Entity services
/// override a default when they need a different message or extra rules.
#[async_trait]
pub trait Service<T: Send + 'static>: Send + Sync {
    type Repo: Repository<T> + ?Sized;

    /// Lower-case entity name used in messages ("car", "user").
    const ENTITY: &'static str;

    fn repository(&self) -> &Self::Repo;

    async fn find_by_id(&self, id: EntityId) -> DomainResult<T> {
        let found = self.repository().find_by_id(id).await?;
        check_found(found, || {
            format!("The {} with id: {} was not found", Self::ENTITY, id)
        })
    }

    async fn find_all(&self) -> DomainResult<Vec<T>> {
        self.repository().find_all().await
    }

    async fn find_all_paged(&self, request: &PageRequest) -> DomainResult<Page<T>> {
        let page = self.repository().find_all_paged(request).await?;
        check_found(page, || {
            format!("Page {} with {} records not found", request.page(), Self::ENTITY)
        })
    }

    async fn save(&self, entity: T) -> DomainResult<T> {
        self.repository().save(entity).await
    }

    async fn delete_by_id(&self, id: EntityId) -> DomainResult<()> {
        self.find_by_id(id).await?;
        self.repository().delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_option_is_unwrapped() {
        let value = check_found(Some(5), || unreachable!()).unwrap();
        assert_eq!(value, 5);
    }

    #[test]
    fn empty_option_becomes_not_found() {
        let err = check_found(None::<i32>, || "The car with id: 9 was not found".into())
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "The car with id: 9 was not found");
    }

    #[test]
    fn empty_page_becomes_not_found() {
        let page: Page<i32> = Page::new(vec![], 0, &PageRequest::default());
        let err = check_found(page, || "Page with cars not found".into()).unwrap_err();
        assert!(err.is_not_found());

        let page = Page::new(vec![1], 1, &PageRequest::default());
        assert_eq!(check_found(page, String::new).unwrap().items, vec![1]);
    }

    #[test]
    fn empty_vec_becomes_not_found() {
        assert!(check_found(Vec::<u8>::new(), String::new).is_err());
        assert_eq!(check_found(vec![1u8], String::new).unwrap(), vec![1]);
    }
}
