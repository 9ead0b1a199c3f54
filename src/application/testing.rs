//! Shared test fixture: a migrated in-memory database with every service.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use super::services::Services;
use crate::domain::car::{BodyType, FuelType, GearboxType};
use crate::domain::{
    Car, CarModel, CarParameter, EntityId, Location, NewCar, RegisterUser, RepositoryProvider,
    Service, User,
};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, BcryptPasswordEncoder, DatabaseConfig, SeaOrmRepositoryProvider};

pub(crate) struct TestContext {
    pub db: DatabaseConnection,
    pub services: Services,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = init_database(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory database");
        Migrator::up(&db, None).await.expect("migrations");

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let services = Services::new(repos, Arc::new(BcryptPasswordEncoder::new(4)));

        Self { db, services }
    }

    pub async fn car_model(&self) -> CarModel {
        self.services
            .car_models
            .save(CarModel::new("Toyota", "Corolla"))
            .await
            .expect("car model")
    }

    pub async fn location(&self) -> Location {
        self.services
            .locations
            .save(Location::new("Wrocław", "Warszawska 34", "71-000"))
            .await
            .expect("location")
    }

    pub fn new_car(&self, registration_number: &str, model: EntityId, location: EntityId) -> NewCar {
        NewCar {
            registration_number: registration_number.to_string(),
            car_model_id: model,
            location_id: location,
            parameters: CarParameter {
                body_type: BodyType::Sedan,
                gearbox_type: GearboxType::Manual,
                fuel_type: FuelType::Petrol,
            },
        }
    }

    /// A saved car with a fresh model and location
    pub async fn car(&self, registration_number: &str) -> Car {
        let model = self.car_model().await.id.expect("model id");
        let location = self.location().await.id.expect("location id");
        self.services
            .cars
            .create_new_car(self.new_car(registration_number, model, location))
            .await
            .expect("car")
    }

    pub async fn user(&self, email: &str) -> User {
        self.services
            .users
            .registration_new_user(register_payload(email))
            .await
            .expect("user")
    }
}

pub(crate) fn register_payload(email: &str) -> RegisterUser {
    RegisterUser {
        first_name: "Jan".into(),
        last_name: "Kowalski".into(),
        email: email.into(),
        password: "proba".into(),
        matching_password: "proba".into(),
        city: "Wrocław".into(),
        street: "Warszawska".into(),
        house_number: "34".into(),
        postal_code: "71-000".into(),
    }
}
