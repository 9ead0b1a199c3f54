//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod car_model_repository;
pub mod car_repository;
pub mod location_repository;
pub mod rental_repository;
pub mod repository_provider;
pub mod role_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Select, SqlErr,
};

use crate::shared::{PageRequest, Sort, SortDirection};

/// Run `query` for one page and count the whole result set.
pub(crate) async fn fetch_page<E, C>(
    db: &C,
    query: Select<E>,
    request: &PageRequest,
) -> Result<(Vec<E::Model>, u64), DbErr>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
    C: ConnectionTrait,
{
    let total = query.clone().count(db).await?;
    let models = query
        .offset(request.offset())
        .limit(u64::from(request.size()))
        .all(db)
        .await?;
    Ok((models, total))
}

/// Order by the column `resolve` maps the sort attribute to, falling back
/// to `default` when unsorted or the attribute is unknown.
pub(crate) fn apply_sort<E>(
    query: Select<E>,
    sort: Option<&Sort>,
    resolve: impl Fn(&str) -> Option<E::Column>,
    default: E::Column,
) -> Select<E>
where
    E: EntityTrait,
{
    let resolved = sort.and_then(|s| resolve(&sort_key(&s.attribute)).map(|c| (c, s.direction)));
    match resolved {
        Some((column, SortDirection::Asc)) => query.order_by_asc(column),
        Some((column, SortDirection::Desc)) => query.order_by_desc(column),
        None => query.order_by_asc(default),
    }
}

/// `registrationNumber`, `registration_number` and `RegistrationNumber`
/// all normalize to `registrationnumber`.
fn sort_key(attribute: &str) -> String {
    attribute
        .chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_normalize() {
        assert_eq!(sort_key("registrationNumber"), "registrationnumber");
        assert_eq!(sort_key("registration_number"), "registrationnumber");
        assert_eq!(sort_key("ID"), "id");
    }
}
