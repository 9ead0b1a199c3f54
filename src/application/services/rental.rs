//! Rental lifecycle service

use std::sync::Arc;

use tracing::info;

use super::car::CarService;
use super::user::UserService;
use crate::domain::{
    EntityId, NewRental, Rental, RentalRepository, RentalStatus, RepositoryProvider, Service,
};
use crate::shared::{DomainError, DomainResult};

pub struct RentalService {
    repos: Arc<dyn RepositoryProvider>,
    cars: Arc<CarService>,
    users: Arc<UserService>,
}

impl RentalService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        cars: Arc<CarService>,
        users: Arc<UserService>,
    ) -> Self {
        Self { repos, cars, users }
    }

    /// Book a car for a user. The rental starts out RESERVED.
    pub async fn open_rental(&self, new_rental: NewRental) -> DomainResult<Rental> {
        if new_rental.ends_at <= new_rental.starts_at {
            return Err(DomainError::Validation(
                "Rental must end after it starts".to_string(),
            ));
        }

        self.cars.find_by_id(new_rental.car_id).await?;
        self.users.find_by_id(new_rental.user_id).await?;

        let rental = Rental::new(
            new_rental.car_id,
            new_rental.user_id,
            new_rental.starts_at,
            new_rental.ends_at,
        );
        let rental = self.save(rental).await?;

        info!(
            rental_id = ?rental.id,
            car_id = rental.car_id,
            user_id = rental.user_id,
            "Rental opened"
        );
        Ok(rental)
    }

    /// Move a rental to `status` and drive the car status from it.
    ///
    /// A car holds at most one RENTED rental. Leaving RENTED releases the
    /// car only when no other RENTED rental holds it. The rental and car
    /// writes commit together.
    pub async fn change_status(
        &self,
        rental_id: EntityId,
        status: RentalStatus,
    ) -> DomainResult<Rental> {
        let mut rental = self.find_by_id(rental_id).await?;

        if status.is_active() {
            let active = self.repos.rentals().find_active_by_car(rental.car_id).await?;
            if let Some(other) = active.filter(|r| r.id != rental.id) {
                return Err(DomainError::Conflict(format!(
                    "The car with id: {} is already rented by rental {}",
                    rental.car_id,
                    other.id.unwrap_or_default()
                )));
            }
        }

        let previous = rental.status;
        rental.status = status;
        let rental = self.repos.rentals().save_with_car_status(rental).await?;

        info!(
            rental_id,
            car_id = rental.car_id,
            from = %previous,
            to = %status,
            "Rental status changed"
        );
        Ok(rental)
    }
}

impl Service<Rental> for RentalService {
    type Repo = dyn RentalRepository;

    const ENTITY: &'static str = "rental";

    fn repository(&self) -> &Self::Repo {
        self.repos.rentals()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use crate::application::testing::TestContext;
    use crate::domain::{CarStatus, DomainError, EntityId, NewRental, RentalStatus, Service};

    fn booking(car_id: EntityId, user_id: EntityId) -> NewRental {
        let now = Utc::now();
        NewRental {
            car_id,
            user_id,
            starts_at: now,
            ends_at: now + Duration::days(3),
        }
    }

    #[tokio::test]
    async fn open_rental_is_reserved_and_leaves_car_available() {
        let ctx = TestContext::new().await;
        let car = ctx.car("DW 1").await.id.unwrap();
        let user = ctx.user("ola@example.com").await.id.unwrap();

        let rental = ctx.services.rentals.open_rental(booking(car, user)).await.unwrap();

        assert_eq!(rental.status, RentalStatus::Reserved);
        let car = ctx.services.cars.find_by_id(car).await.unwrap();
        assert_eq!(car.status, CarStatus::Available);
    }

    #[tokio::test]
    async fn empty_window_is_rejected() {
        let ctx = TestContext::new().await;
        let car = ctx.car("DW 1").await.id.unwrap();
        let user = ctx.user("ola@example.com").await.id.unwrap();

        let mut new_rental = booking(car, user);
        new_rental.ends_at = new_rental.starts_at;

        let err = ctx.services.rentals.open_rental(new_rental).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let ctx = TestContext::new().await;
        let car = ctx.car("DW 1").await.id.unwrap();

        let err = ctx.services.rentals.open_rental(booking(car, 31)).await.unwrap_err();
        assert_eq!(err.to_string(), "The user with id: 31 was not found");
    }

    #[tokio::test]
    async fn lifecycle_drives_car_status() {
        let ctx = TestContext::new().await;
        let car = ctx.car("DW 1").await.id.unwrap();
        let user = ctx.user("ola@example.com").await.id.unwrap();
        let rental = ctx.services.rentals.open_rental(booking(car, user)).await.unwrap();
        let rental_id = rental.id.unwrap();

        ctx.services
            .rentals
            .change_status(rental_id, RentalStatus::Rented)
            .await
            .unwrap();
        let status = ctx.services.cars.find_by_id(car).await.unwrap().status;
        assert_eq!(status, CarStatus::Unavailable);

        let returned = ctx
            .services
            .rentals
            .change_status(rental_id, RentalStatus::Returned)
            .await
            .unwrap();
        assert_eq!(returned.status, RentalStatus::Returned);
        let status = ctx.services.cars.find_by_id(car).await.unwrap().status;
        assert_eq!(status, CarStatus::Available);
    }

    #[tokio::test]
    async fn second_active_rental_conflicts() {
        let ctx = TestContext::new().await;
        let car = ctx.car("DW 1").await.id.unwrap();
        let first_user = ctx.user("a@example.com").await.id.unwrap();
        let second_user = ctx.user("b@example.com").await.id.unwrap();

        let first = ctx
            .services
            .rentals
            .open_rental(booking(car, first_user))
            .await
            .unwrap();
        let second = ctx
            .services
            .rentals
            .open_rental(booking(car, second_user))
            .await
            .unwrap();

        ctx.services
            .rentals
            .change_status(first.id.unwrap(), RentalStatus::Rented)
            .await
            .unwrap();
        let err = ctx
            .services
            .rentals
            .change_status(second.id.unwrap(), RentalStatus::Rented)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Cancelling the other booking must not release the rented car
        ctx.services
            .rentals
            .change_status(second.id.unwrap(), RentalStatus::Cancelled)
            .await
            .unwrap();
        let status = ctx.services.cars.find_by_id(car).await.unwrap().status;
        assert_eq!(status, CarStatus::Unavailable);
    }

    #[tokio::test]
    async fn concurrent_rent_of_one_car_admits_one() {
        let ctx = TestContext::new().await;
        let car = ctx.car("DW 1").await.id.unwrap();
        let first_user = ctx.user("a@example.com").await.id.unwrap();
        let second_user = ctx.user("b@example.com").await.id.unwrap();
        let rentals = &ctx.services.rentals;

        let first = rentals.open_rental(booking(car, first_user)).await.unwrap();
        let second = rentals.open_rental(booking(car, second_user)).await.unwrap();

        let (a, b) = tokio::join!(
            rentals.change_status(first.id.unwrap(), RentalStatus::Rented),
            rentals.change_status(second.id.unwrap(), RentalStatus::Rented),
        );

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let err = a.err().or(b.err()).unwrap();
        assert!(matches!(err, DomainError::Conflict(_)));

        let rented = rentals
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.status == RentalStatus::Rented)
            .count();
        assert_eq!(rented, 1);
        let status = ctx.services.cars.find_by_id(car).await.unwrap().status;
        assert_eq!(status, CarStatus::Unavailable);
    }

    #[tokio::test]
    async fn re_renting_the_same_rental_is_idempotent() {
        let ctx = TestContext::new().await;
        let car = ctx.car("DW 1").await.id.unwrap();
        let user = ctx.user("a@example.com").await.id.unwrap();
        let rental = ctx.services.rentals.open_rental(booking(car, user)).await.unwrap();
        let id = rental.id.unwrap();

        ctx.services.rentals.change_status(id, RentalStatus::Rented).await.unwrap();
        let again = ctx
            .services
            .rentals
            .change_status(id, RentalStatus::Rented)
            .await
            .unwrap();
        assert_eq!(again.status, RentalStatus::Rented);
    }
}
