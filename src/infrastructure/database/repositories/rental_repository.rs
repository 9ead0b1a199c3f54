//! SeaORM implementation of RentalRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, Set, TransactionTrait,
};

use super::car_repository::{release_unless_rented, write_status};
use super::{apply_sort, fetch_page, is_unique_violation};
use crate::domain::{CarStatus, EntityId, Rental, RentalRepository, RentalStatus, Repository};
use crate::infrastructure::database::entities::rental;
use crate::shared::{DomainError, DomainResult, Page, PageRequest};

pub struct SeaOrmRentalRepository {
    db: DatabaseConnection,
}

impl SeaOrmRentalRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn rental_from_model(m: rental::Model) -> DomainResult<Rental> {
    Ok(Rental {
        id: Some(m.id),
        car_id: m.car_id,
        user_id: m.user_id,
        starts_at: m.starts_at,
        ends_at: m.ends_at,
        status: m.status.parse()?,
    })
}

/// Insert or update one rental row. The store allows one RENTED rental
/// per car; a second one is a `Conflict`.
async fn persist<C: ConnectionTrait>(db: &C, entity: &Rental) -> DomainResult<rental::Model> {
    let active = rental::ActiveModel {
        id: entity.id.map_or(NotSet, Set),
        car_id: Set(entity.car_id),
        user_id: Set(entity.user_id),
        starts_at: Set(entity.starts_at),
        ends_at: Set(entity.ends_at),
        status: Set(entity.status.as_str().to_string()),
    };
    let result = match entity.id {
        None => active.insert(db).await,
        Some(_) => active.update(db).await,
    };

    result.map_err(|e| {
        if is_unique_violation(&e) {
            DomainError::Conflict(format!(
                "The car with id: {} is already rented",
                entity.car_id
            ))
        } else {
            DomainError::Database(e)
        }
    })
}

fn sort_column(attribute: &str) -> Option<rental::Column> {
    match attribute {
        "id" => Some(rental::Column::Id),
        "car" | "carid" => Some(rental::Column::CarId),
        "user" | "userid" => Some(rental::Column::UserId),
        "startsat" | "start" => Some(rental::Column::StartsAt),
        "endsat" | "end" => Some(rental::Column::EndsAt),
        "status" => Some(rental::Column::Status),
        _ => None,
    }
}

#[async_trait]
impl Repository<Rental> for SeaOrmRentalRepository {
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Rental>> {
        rental::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(rental_from_model)
            .transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Rental>> {
        rental::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(rental_from_model)
            .collect()
    }

    async fn find_all_paged(&self, request: &PageRequest) -> DomainResult<Page<Rental>> {
        let query = apply_sort(
            rental::Entity::find(),
            request.sort(),
            sort_column,
            rental::Column::Id,
        );
        let (models, total) = fetch_page(&self.db, query, request).await?;
        let items = models
            .into_iter()
            .map(rental_from_model)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Page::new(items, total, request))
    }

    async fn save(&self, entity: Rental) -> DomainResult<Rental> {
        let model = persist(&self.db, &entity).await?;
        debug!(
            "Saved rental {} (car {}, {})",
            model.id, model.car_id, model.status
        );
        rental_from_model(model)
    }

    async fn delete_by_id(&self, id: EntityId) -> DomainResult<()> {
        let result = rental::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "The rental with id: {} was not found",
                id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RentalRepository for SeaOrmRentalRepository {
    async fn find_active_by_car(&self, car_id: EntityId) -> DomainResult<Option<Rental>> {
        rental::Entity::find()
            .filter(rental::Column::CarId.eq(car_id))
            .filter(rental::Column::Status.eq(RentalStatus::Rented.as_str()))
            .one(&self.db)
            .await?
            .map(rental_from_model)
            .transpose()
    }

    async fn save_with_car_status(&self, entity: Rental) -> DomainResult<Rental> {
        let txn = self.db.begin().await?;

        let model = persist(&txn, &entity).await?;
        if entity.status.is_active() {
            write_status(&txn, model.car_id, CarStatus::for_rental_status(entity.status)).await?;
        } else {
            release_unless_rented(&txn, model.car_id).await?;
        }

        txn.commit().await?;

        debug!(
            "Saved rental {} (car {}, {}) with car status",
            model.id, model.car_id, model.status
        );
        rental_from_model(model)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::application::testing::TestContext;
    use crate::domain::Service;

    async fn booking(ctx: &TestContext, car_id: EntityId, email: &str) -> Rental {
        let user = ctx.user(email).await.id.unwrap();
        let now = Utc::now();
        ctx.services
            .rentals
            .save(Rental::new(car_id, user, now, now + Duration::days(1)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn second_rented_rental_for_a_car_is_a_conflict() {
        let ctx = TestContext::new().await;
        let repo = SeaOrmRentalRepository::new(ctx.db.clone());
        let car = ctx.car("DW 1").await.id.unwrap();

        let mut first = booking(&ctx, car, "a@example.com").await;
        let mut second = booking(&ctx, car, "b@example.com").await;
        first.status = RentalStatus::Rented;
        second.status = RentalStatus::Rented;

        repo.save(first).await.unwrap();
        let err = repo.save(second.clone()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let stored = repo.find_by_id(second.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.status, RentalStatus::Reserved);
    }

    #[tokio::test]
    async fn returned_rentals_do_not_count_as_active() {
        let ctx = TestContext::new().await;
        let repo = SeaOrmRentalRepository::new(ctx.db.clone());
        let car = ctx.car("DW 1").await.id.unwrap();

        for email in ["a@example.com", "b@example.com"] {
            let mut done = booking(&ctx, car, email).await;
            done.status = RentalStatus::Returned;
            repo.save(done).await.unwrap();
        }
        assert!(repo.find_active_by_car(car).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn conflicting_save_leaves_car_untouched() {
        let ctx = TestContext::new().await;
        let repo = SeaOrmRentalRepository::new(ctx.db.clone());
        let car = ctx.car("DW 1").await.id.unwrap();

        let mut first = booking(&ctx, car, "a@example.com").await;
        first.status = RentalStatus::Rented;
        repo.save(first.clone()).await.unwrap();

        let mut second = booking(&ctx, car, "b@example.com").await;
        second.status = RentalStatus::Rented;
        let err = repo.save_with_car_status(second).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // The car write never ran, so the car keeps its status
        let status = ctx.services.cars.find_by_id(car).await.unwrap().status;
        assert_eq!(status, CarStatus::Available);
    }

    #[tokio::test]
    async fn missing_car_rolls_back_rental_write() {
        let ctx = TestContext::new().await;
        let repo = SeaOrmRentalRepository::new(ctx.db.clone());
        let car = ctx.car("DW 1").await.id.unwrap();
        let mut pending = booking(&ctx, car, "a@example.com").await;

        // Point the rental at a car that does not exist; the rental row
        // update must be undone with the failed car write.
        ctx.db
            .execute_unprepared("PRAGMA foreign_keys = OFF")
            .await
            .unwrap();
        pending.car_id = 404;
        pending.status = RentalStatus::Rented;
        let err = repo.save_with_car_status(pending.clone()).await.unwrap_err();
        assert!(err.is_not_found());

        let stored = repo.find_by_id(pending.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.car_id, car);
        assert_eq!(stored.status, RentalStatus::Reserved);
    }
}
