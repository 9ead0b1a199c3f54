//! Repository traits for the domain layer
//!
//! Contains:
//! - `Repository<T>` — the persistence contract every aggregate supports
//! - `RepositoryProvider` — unified access to all per-aggregate repositories

use async_trait::async_trait;

use super::car::CarRepository;
use super::car_model::CarModelRepository;
use super::location::LocationRepository;
use super::rental::RentalRepository;
use super::role::RoleRepository;
use super::user::UserRepository;
use crate::shared::{DomainResult, Page, PageRequest};

/// Store-assigned entity identifier
pub type EntityId = i32;

/// Minimal persistence contract for one entity type.
///
/// `save` inserts when the entity has no id yet and updates otherwise.
/// Nothing is guaranteed across calls: two calls are two units of work.
#[async_trait]
pub trait Repository<T: Send + 'static>: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<T>>;
    async fn find_all(&self) -> DomainResult<Vec<T>>;
    async fn find_all_paged(&self, request: &PageRequest) -> DomainResult<Page<T>>;
    async fn save(&self, entity: T) -> DomainResult<T>;
    async fn delete_by_id(&self, id: EntityId) -> DomainResult<()>;
}

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let car = repos.cars().find_by_id(7).await?;
///     let rental = repos.rentals().find_active_by_car(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn cars(&self) -> &(dyn CarRepository + 'static);
    fn car_models(&self) -> &(dyn CarModelRepository + 'static);
    fn locations(&self) -> &(dyn LocationRepository + 'static);
    fn rentals(&self) -> &(dyn RentalRepository + 'static);
    fn roles(&self) -> &(dyn RoleRepository + 'static);
    fn users(&self) -> &(dyn UserRepository + 'static);
}
