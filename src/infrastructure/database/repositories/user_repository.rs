//! SeaORM implementation of UserRepository
//!
//! A user spans three tables: `user_details` (address), `users` and the
//! `user_roles` join table. Reads hydrate all three, writes go through one
//! transaction.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, Set, TransactionTrait,
};

use super::role_repository::role_from_model;
use super::{apply_sort, fetch_page, is_unique_violation};
use crate::domain::{EntityId, Repository, Role, User, UserDetail, UserRepository};
use crate::infrastructure::database::entities::{role, user, user_detail, user_role};
use crate::shared::{DomainError, DomainResult, Page, PageRequest};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

impl From<user_detail::Model> for UserDetail {
    fn from(m: user_detail::Model) -> Self {
        Self {
            id: Some(m.id),
            city: m.city,
            street: m.street,
            house_number: m.house_number,
            postal_code: m.postal_code,
        }
    }
}

fn detail_to_active(detail: &UserDetail) -> user_detail::ActiveModel {
    user_detail::ActiveModel {
        id: detail.id.map_or(NotSet, Set),
        city: Set(detail.city.clone()),
        street: Set(detail.street.clone()),
        house_number: Set(detail.house_number.clone()),
        postal_code: Set(detail.postal_code.clone()),
    }
}

fn user_to_active(u: &User, detail_id: EntityId) -> user::ActiveModel {
    user::ActiveModel {
        id: u.id.map_or(NotSet, Set),
        first_name: Set(u.first_name.clone()),
        last_name: Set(u.last_name.clone()),
        email: Set(u.email.clone()),
        password_hash: Set(u.password_hash.clone()),
        user_detail_id: Set(detail_id),
    }
}

fn assemble(model: user::Model, detail: UserDetail, roles: Vec<Role>) -> User {
    User {
        id: Some(model.id),
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        password_hash: model.password_hash,
        roles,
        detail,
    }
}

fn duplicate_email(email: &str) -> impl FnOnce(DbErr) -> DomainError + '_ {
    move |e| {
        if is_unique_violation(&e) {
            DomainError::DuplicateEmail(email.to_string())
        } else {
            DomainError::Database(e)
        }
    }
}

/// Load details and roles for a batch of user rows, preserving row order.
async fn hydrate<C: ConnectionTrait>(db: &C, models: Vec<user::Model>) -> DomainResult<Vec<User>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let detail_ids: Vec<i32> = models.iter().map(|m| m.user_detail_id).collect();

    let mut details: HashMap<i32, user_detail::Model> = user_detail::Entity::find()
        .filter(user_detail::Column::Id.is_in(detail_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    let links = user_role::Entity::find()
        .filter(user_role::Column::UserId.is_in(user_ids))
        .find_also_related(role::Entity)
        .all(db)
        .await?;

    let mut roles: HashMap<i32, Vec<Role>> = HashMap::new();
    for (link, role) in links {
        if let Some(role) = role {
            roles.entry(link.user_id).or_default().push(role_from_model(role)?);
        }
    }

    models
        .into_iter()
        .map(|m| {
            let detail = details.remove(&m.user_detail_id).ok_or_else(|| {
                DomainError::NotFound(format!(
                    "The user detail with id: {} was not found",
                    m.user_detail_id
                ))
            })?;
            let mut user_roles = roles.remove(&m.id).unwrap_or_default();
            user_roles.sort_by_key(|r| r.id);
            Ok(assemble(m, detail.into(), user_roles))
        })
        .collect()
}

fn sort_column(attribute: &str) -> Option<user::Column> {
    match attribute {
        "id" => Some(user::Column::Id),
        "firstname" => Some(user::Column::FirstName),
        "lastname" => Some(user::Column::LastName),
        "email" => Some(user::Column::Email),
        _ => None,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl Repository<User> for SeaOrmUserRepository {
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<User>> {
        let Some(model) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(hydrate(&self.db, vec![model]).await?.pop())
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find().all(&self.db).await?;
        hydrate(&self.db, models).await
    }

    async fn find_all_paged(&self, request: &PageRequest) -> DomainResult<Page<User>> {
        let query = apply_sort(
            user::Entity::find(),
            request.sort(),
            sort_column,
            user::Column::Id,
        );
        let (models, total) = fetch_page(&self.db, query, request).await?;
        let items = hydrate(&self.db, models).await?;
        Ok(Page::new(items, total, request))
    }

    async fn save(&self, entity: User) -> DomainResult<User> {
        let role_ids = entity
            .roles
            .iter()
            .map(|r| {
                r.id.ok_or_else(|| {
                    DomainError::Validation(format!("Role {} is not persisted", r.name))
                })
            })
            .collect::<DomainResult<BTreeSet<EntityId>>>()?;

        let txn = self.db.begin().await?;

        let detail_active = detail_to_active(&entity.detail);
        let detail = match entity.detail.id {
            None => detail_active.insert(&txn).await?,
            Some(_) => detail_active.update(&txn).await?,
        };

        let user_active = user_to_active(&entity, detail.id);
        let saved = match entity.id {
            None => user_active.insert(&txn).await,
            Some(_) => user_active.update(&txn).await,
        }
        .map_err(duplicate_email(&entity.email))?;

        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(saved.id))
            .exec(&txn)
            .await?;

        if !role_ids.is_empty() {
            let links = role_ids.iter().map(|role_id| user_role::ActiveModel {
                user_id: Set(saved.id),
                role_id: Set(*role_id),
            });
            user_role::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        debug!(
            "Saved user {} ({}) with {} role(s)",
            saved.id,
            saved.email,
            role_ids.len()
        );

        let mut roles = entity.roles;
        roles.sort_by_key(|r| r.id);
        roles.dedup_by_key(|r| r.id);
        Ok(assemble(saved, detail.into(), roles))
    }

    async fn delete_by_id(&self, id: EntityId) -> DomainResult<()> {
        let txn = self.db.begin().await?;

        let Some(model) = user::Entity::find_by_id(id).one(&txn).await? else {
            return Err(DomainError::NotFound(format!(
                "The user with id: {} was not found",
                id
            )));
        };

        // user_roles and rentals cascade; the detail row is owned by the user
        user::Entity::delete_by_id(id).exec(&txn).await?;
        user_detail::Entity::delete_by_id(model.user_detail_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let Some(model) = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        Ok(hydrate(&self.db, vec![model]).await?.pop())
    }
}
