//! SeaORM implementation of RoleRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};

use super::{apply_sort, fetch_page, is_unique_violation};
use crate::domain::{EntityId, Repository, Role, RoleName, RoleRepository};
use crate::infrastructure::database::entities::role;
use crate::shared::{DomainError, DomainResult, Page, PageRequest};

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn role_from_model(m: role::Model) -> DomainResult<Role> {
    Ok(Role {
        id: Some(m.id),
        name: m.name.parse()?,
    })
}

fn sort_column(attribute: &str) -> Option<role::Column> {
    match attribute {
        "id" => Some(role::Column::Id),
        "name" | "rolename" => Some(role::Column::Name),
        _ => None,
    }
}

#[async_trait]
impl Repository<Role> for SeaOrmRoleRepository {
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Role>> {
        role::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(role_from_model)
            .transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Role>> {
        role::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(role_from_model)
            .collect()
    }

    async fn find_all_paged(&self, request: &PageRequest) -> DomainResult<Page<Role>> {
        let query = apply_sort(
            role::Entity::find(),
            request.sort(),
            sort_column,
            role::Column::Id,
        );
        let (models, total) = fetch_page(&self.db, query, request).await?;
        let items = models
            .into_iter()
            .map(role_from_model)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Page::new(items, total, request))
    }

    async fn save(&self, entity: Role) -> DomainResult<Role> {
        let active = role::ActiveModel {
            id: entity.id.map_or(NotSet, Set),
            name: Set(entity.name.as_str().to_string()),
        };
        let result = match entity.id {
            None => active.insert(&self.db).await,
            Some(_) => active.update(&self.db).await,
        };
        let model = result.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(format!("Role {} already exists", entity.name))
            } else {
                DomainError::Database(e)
            }
        })?;
        role_from_model(model)
    }

    async fn delete_by_id(&self, id: EntityId) -> DomainResult<()> {
        let result = role::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "The role with id: {} was not found",
                id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn find_by_name(&self, name: RoleName) -> DomainResult<Option<Role>> {
        role::Entity::find()
            .filter(role::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await?
            .map(role_from_model)
            .transpose()
    }
}
