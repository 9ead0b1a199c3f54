//! SeaORM implementation of CarModelRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, Set};

use super::{apply_sort, fetch_page};
use crate::domain::{CarModel, CarModelRepository, EntityId, Repository};
use crate::infrastructure::database::entities::car_model;
use crate::shared::{DomainError, DomainResult, Page, PageRequest};

pub struct SeaOrmCarModelRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarModelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<car_model::Model> for CarModel {
    fn from(m: car_model::Model) -> Self {
        Self {
            id: Some(m.id),
            make: m.make,
            model_name: m.model_name,
            production_year: m.production_year,
        }
    }
}

fn sort_column(attribute: &str) -> Option<car_model::Column> {
    match attribute {
        "id" => Some(car_model::Column::Id),
        "make" => Some(car_model::Column::Make),
        "modelname" | "model" => Some(car_model::Column::ModelName),
        "productionyear" => Some(car_model::Column::ProductionYear),
        _ => None,
    }
}

#[async_trait]
impl Repository<CarModel> for SeaOrmCarModelRepository {
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<CarModel>> {
        let model = car_model::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> DomainResult<Vec<CarModel>> {
        let models = car_model::Entity::find().all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_all_paged(&self, request: &PageRequest) -> DomainResult<Page<CarModel>> {
        let query = apply_sort(
            car_model::Entity::find(),
            request.sort(),
            sort_column,
            car_model::Column::Id,
        );
        let (models, total) = fetch_page(&self.db, query, request).await?;
        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            total,
            request,
        ))
    }

    async fn save(&self, entity: CarModel) -> DomainResult<CarModel> {
        let active = car_model::ActiveModel {
            id: entity.id.map_or(NotSet, Set),
            make: Set(entity.make),
            model_name: Set(entity.model_name),
            production_year: Set(entity.production_year),
        };
        let model = match entity.id {
            None => active.insert(&self.db).await?,
            Some(_) => active.update(&self.db).await?,
        };
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: EntityId) -> DomainResult<()> {
        let result = car_model::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "The car model with id: {} was not found",
                id
            )));
        }
        Ok(())
    }
}

impl CarModelRepository for SeaOrmCarModelRepository {}
