//! Rental location service

use std::sync::Arc;

use crate::domain::{Location, LocationRepository, RepositoryProvider, Service};

pub struct LocationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl LocationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }
}

impl Service<Location> for LocationService {
    type Repo = dyn LocationRepository;

    const ENTITY: &'static str = "location";

    fn repository(&self) -> &Self::Repo {
        self.repos.locations()
    }
}

#[cfg(test)]
mod tests {
    use crate::application::testing::TestContext;
    use crate::domain::{Location, Service};

    #[tokio::test]
    async fn delete_checks_existence_first() {
        let ctx = TestContext::new().await;
        let saved = ctx
            .services
            .locations
            .save(Location::new("Wrocław", "Legnicka 5", "54-203"))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        ctx.services.locations.delete_by_id(id).await.unwrap();

        let err = ctx.services.locations.delete_by_id(id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("The location with id: {} was not found", id)
        );
    }

    #[tokio::test]
    async fn update_keeps_id() {
        let ctx = TestContext::new().await;
        let mut loc = ctx
            .services
            .locations
            .save(Location::new("Kraków", "Długa 1", "31-147"))
            .await
            .unwrap();
        loc.street = "Długa 2".into();

        let updated = ctx.services.locations.save(loc.clone()).await.unwrap();
        assert_eq!(updated, loc);
        assert_eq!(ctx.services.locations.find_all().await.unwrap().len(), 1);
    }
}
