//! Car model catalogue service

use std::sync::Arc;

use crate::domain::{CarModel, CarModelRepository, RepositoryProvider, Service};

pub struct CarModelService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CarModelService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }
}

impl Service<CarModel> for CarModelService {
    type Repo = dyn CarModelRepository;

    const ENTITY: &'static str = "car model";

    fn repository(&self) -> &Self::Repo {
        self.repos.car_models()
    }
}

#[cfg(test)]
mod tests {
    use crate::application::testing::TestContext;
    use crate::domain::{CarModel, Service};
    use crate::shared::PageRequest;

    #[tokio::test]
    async fn save_then_find() {
        let ctx = TestContext::new().await;
        let mut model = CarModel::new("Skoda", "Octavia");
        model.production_year = Some(2019);

        let saved = ctx.services.car_models.save(model).await.unwrap();
        let found = ctx
            .services
            .car_models
            .find_by_id(saved.id.unwrap())
            .await
            .unwrap();

        assert_eq!(found, saved);
        assert_eq!(found.production_year, Some(2019));
    }

    #[tokio::test]
    async fn missing_model_message() {
        let ctx = TestContext::new().await;
        let err = ctx.services.car_models.find_by_id(404).await.unwrap_err();
        assert_eq!(err.to_string(), "The car model with id: 404 was not found");
    }

    #[tokio::test]
    async fn empty_catalogue_page_is_not_found() {
        let ctx = TestContext::new().await;
        let err = ctx
            .services
            .car_models
            .find_all_paged(&PageRequest::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
