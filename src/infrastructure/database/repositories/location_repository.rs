//! SeaORM implementation of LocationRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, Set};

use super::{apply_sort, fetch_page};
use crate::domain::{EntityId, Location, LocationRepository, Repository};
use crate::infrastructure::database::entities::location;
use crate::shared::{DomainError, DomainResult, Page, PageRequest};

pub struct SeaOrmLocationRepository {
    db: DatabaseConnection,
}

impl SeaOrmLocationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<location::Model> for Location {
    fn from(m: location::Model) -> Self {
        Self {
            id: Some(m.id),
            city: m.city,
            street: m.street,
            postal_code: m.postal_code,
        }
    }
}

fn sort_column(attribute: &str) -> Option<location::Column> {
    match attribute {
        "id" => Some(location::Column::Id),
        "city" => Some(location::Column::City),
        "street" => Some(location::Column::Street),
        "postalcode" => Some(location::Column::PostalCode),
        _ => None,
    }
}

#[async_trait]
impl Repository<Location> for SeaOrmLocationRepository {
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Location>> {
        let model = location::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> DomainResult<Vec<Location>> {
        let models = location::Entity::find().all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_all_paged(&self, request: &PageRequest) -> DomainResult<Page<Location>> {
        let query = apply_sort(
            location::Entity::find(),
            request.sort(),
            sort_column,
            location::Column::Id,
        );
        let (models, total) = fetch_page(&self.db, query, request).await?;
        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            total,
            request,
        ))
    }

    async fn save(&self, entity: Location) -> DomainResult<Location> {
        let active = location::ActiveModel {
            id: entity.id.map_or(NotSet, Set),
            city: Set(entity.city),
            street: Set(entity.street),
            postal_code: Set(entity.postal_code),
        };
        let model = match entity.id {
            None => active.insert(&self.db).await?,
            Some(_) => active.update(&self.db).await?,
        };
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: EntityId) -> DomainResult<()> {
        let result = location::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "The location with id: {} was not found",
                id
            )));
        }
        Ok(())
    }
}

impl LocationRepository for SeaOrmLocationRepository {}
