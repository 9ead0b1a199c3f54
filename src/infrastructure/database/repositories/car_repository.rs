//! SeaORM implementation of CarRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use super::{apply_sort, fetch_page, is_unique_violation};
use crate::domain::car::{Car, CarFilter, CarParameter, CarRepository, CarStatus};
use crate::domain::{EntityId, Repository, RentalStatus};
use crate::infrastructure::database::entities::{car, rental};
use crate::shared::{DomainError, DomainResult, Page, PageRequest};

pub struct SeaOrmCarRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn car_from_model(model: car::Model) -> DomainResult<Car> {
    Ok(Car {
        id: Some(model.id),
        registration_number: model.registration_number,
        car_model_id: model.car_model_id,
        location_id: model.location_id,
        status: model.status.parse()?,
        parameters: CarParameter {
            body_type: model.body_type.parse()?,
            gearbox_type: model.gearbox_type.parse()?,
            fuel_type: model.fuel_type.parse()?,
        },
    })
}

fn cars_from_models(models: Vec<car::Model>) -> DomainResult<Vec<Car>> {
    models.into_iter().map(car_from_model).collect()
}

fn car_to_active(car: &Car) -> car::ActiveModel {
    car::ActiveModel {
        id: car.id.map_or(NotSet, Set),
        registration_number: Set(car.registration_number.clone()),
        car_model_id: Set(car.car_model_id),
        location_id: Set(car.location_id),
        status: Set(car.status.as_str().to_string()),
        body_type: Set(car.parameters.body_type.as_str().to_string()),
        gearbox_type: Set(car.parameters.gearbox_type.as_str().to_string()),
        fuel_type: Set(car.parameters.fuel_type.as_str().to_string()),
    }
}

fn filter_condition(filter: &CarFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(status) = filter.status {
        condition = condition.add(car::Column::Status.eq(status.as_str()));
    }
    if let Some(body_type) = filter.body_type {
        condition = condition.add(car::Column::BodyType.eq(body_type.as_str()));
    }
    if let Some(gearbox_type) = filter.gearbox_type {
        condition = condition.add(car::Column::GearboxType.eq(gearbox_type.as_str()));
    }
    if let Some(fuel_type) = filter.fuel_type {
        condition = condition.add(car::Column::FuelType.eq(fuel_type.as_str()));
    }
    if let Some(id) = filter.car_model_id {
        condition = condition.add(car::Column::CarModelId.eq(id));
    }
    if let Some(id) = filter.location_id {
        condition = condition.add(car::Column::LocationId.eq(id));
    }
    condition
}

fn sort_column(attribute: &str) -> Option<car::Column> {
    match attribute {
        "id" => Some(car::Column::Id),
        "registrationnumber" => Some(car::Column::RegistrationNumber),
        "status" | "carstatus" => Some(car::Column::Status),
        "bodytype" => Some(car::Column::BodyType),
        "gearboxtype" => Some(car::Column::GearboxType),
        "fueltype" => Some(car::Column::FuelType),
        "carmodel" | "carmodelid" => Some(car::Column::CarModelId),
        "location" | "locationid" => Some(car::Column::LocationId),
        _ => None,
    }
}

/// Overwrite the status of one car. A missing car is `NotFound`.
pub(crate) async fn write_status<C: ConnectionTrait>(
    db: &C,
    car_id: EntityId,
    status: CarStatus,
) -> DomainResult<()> {
    let result = car::Entity::update_many()
        .col_expr(car::Column::Status, Expr::value(status.as_str()))
        .filter(car::Column::Id.eq(car_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DomainError::NotFound(format!(
            "The car with id: {} was not found",
            car_id
        )));
    }
    debug!("Car {} status set to {}", car_id, status);
    Ok(())
}

/// `UPDATE cars SET status = 'AVAILABLE' WHERE id = ? AND id NOT IN
/// (SELECT car_id FROM rentals WHERE car_id = ? AND status = 'RENTED')`
pub(crate) async fn release_unless_rented<C: ConnectionTrait>(
    db: &C,
    car_id: EntityId,
) -> Result<bool, DbErr> {
    let active_rentals = Query::select()
        .column(rental::Column::CarId)
        .from(rental::Entity)
        .and_where(rental::Column::CarId.eq(car_id))
        .and_where(rental::Column::Status.eq(RentalStatus::Rented.as_str()))
        .to_owned();

    let result = car::Entity::update_many()
        .col_expr(
            car::Column::Status,
            Expr::value(CarStatus::Available.as_str()),
        )
        .filter(car::Column::Id.eq(car_id))
        .filter(car::Column::Id.not_in_subquery(active_rentals))
        .exec(db)
        .await?;

    debug!(
        "Conditional release of car {}: {} row(s)",
        car_id, result.rows_affected
    );
    Ok(result.rows_affected > 0)
}

impl SeaOrmCarRepository {
    async fn page(
        &self,
        condition: Condition,
        request: &PageRequest,
    ) -> DomainResult<Page<Car>> {
        let query = apply_sort(
            car::Entity::find().filter(condition),
            request.sort(),
            sort_column,
            car::Column::Id,
        );
        let (models, total) = fetch_page(&self.db, query, request).await?;
        Ok(Page::new(cars_from_models(models)?, total, request))
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl Repository<Car> for SeaOrmCarRepository {
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Car>> {
        car::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(car_from_model)
            .transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Car>> {
        let models = car::Entity::find().all(&self.db).await?;
        cars_from_models(models)
    }

    async fn find_all_paged(&self, request: &PageRequest) -> DomainResult<Page<Car>> {
        self.page(Condition::all(), request).await
    }

    async fn save(&self, car: Car) -> DomainResult<Car> {
        let active = car_to_active(&car);
        let result = match car.id {
            None => active.insert(&self.db).await,
            Some(_) => active.update(&self.db).await,
        };

        let model = result.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(format!(
                    "Car with registration number {} already exists",
                    car.registration_number
                ))
            } else {
                DomainError::Database(e)
            }
        })?;

        debug!("Saved car {} ({})", model.id, model.registration_number);
        car_from_model(model)
    }

    async fn delete_by_id(&self, id: EntityId) -> DomainResult<()> {
        let result = car::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "The car with id: {} was not found",
                id
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn find_by_filter(
        &self,
        filter: &CarFilter,
        request: &PageRequest,
    ) -> DomainResult<Page<Car>> {
        self.page(filter_condition(filter), request).await
    }

    async fn change_to_available_if_not_rented(&self, car_id: EntityId) -> DomainResult<bool> {
        Ok(release_unless_rented(&self.db, car_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::application::testing::TestContext;
    use crate::domain::{Rental, Service};

    async fn rent(ctx: &TestContext, car_id: EntityId, status: RentalStatus) {
        let user = ctx
            .user(&format!("r{}-{}@example.com", car_id, status.as_str().to_lowercase()))
            .await;
        let now = Utc::now();
        let mut rental = Rental::new(car_id, user.id.unwrap(), now, now + Duration::days(1));
        rental.status = status;
        ctx.services.rentals.save(rental).await.unwrap();
    }

    #[tokio::test]
    async fn conditional_update_skips_cars_with_rented_rental() {
        let ctx = TestContext::new().await;
        let repo = SeaOrmCarRepository::new(ctx.db.clone());

        let held = ctx.car("DW 1").await.id.unwrap();
        let free = ctx.car("DW 2").await.id.unwrap();
        rent(&ctx, held, RentalStatus::Rented).await;
        rent(&ctx, free, RentalStatus::Returned).await;
        write_status(&ctx.db, held, CarStatus::Unavailable).await.unwrap();
        write_status(&ctx.db, free, CarStatus::Unavailable).await.unwrap();

        assert!(!repo.change_to_available_if_not_rented(held).await.unwrap());
        assert!(repo.change_to_available_if_not_rented(free).await.unwrap());

        let held = repo.find_by_id(held).await.unwrap().unwrap();
        let free = repo.find_by_id(free).await.unwrap().unwrap();
        assert_eq!(held.status, CarStatus::Unavailable);
        assert_eq!(free.status, CarStatus::Available);
    }

    #[tokio::test]
    async fn conditional_update_of_missing_car_changes_nothing() {
        let ctx = TestContext::new().await;
        let repo = SeaOrmCarRepository::new(ctx.db.clone());

        assert!(!repo.change_to_available_if_not_rented(123).await.unwrap());
    }

    #[tokio::test]
    async fn write_status_of_missing_car_is_not_found() {
        let ctx = TestContext::new().await;
        let err = write_status(&ctx.db, 9, CarStatus::Unavailable)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unknown_sort_attribute_falls_back_to_id() {
        let ctx = TestContext::new().await;
        let repo = SeaOrmCarRepository::new(ctx.db.clone());
        let first = ctx.car("DW 9").await;
        let second = ctx.car("DW 1").await;

        let request = PageRequest::default().with_sort(Some(crate::shared::Sort::asc("colour")));
        let page = repo.find_all_paged(&request).await.unwrap();

        let ids: Vec<_> = page.items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn delete_missing_car_is_not_found() {
        let ctx = TestContext::new().await;
        let repo = SeaOrmCarRepository::new(ctx.db.clone());
        assert!(repo.delete_by_id(5).await.unwrap_err().is_not_found());
    }
}
