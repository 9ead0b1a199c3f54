//! Startup seeding of default accounts

use serde::Serialize;
use tracing::{debug, info};

use super::services::UserService;
use crate::config::SeedConfig;
use crate::shared::DomainResult;

/// Outcome of one seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub created: Vec<String>,
    /// Existing accounts that were missing configured roles
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
}

/// Make sure every configured account exists and holds its roles.
///
/// New accounts are saved once with all their roles. Existing accounts
/// only gain roles they lack, so running this again is a no-op.
pub async fn seed_default_users(
    users: &UserService,
    config: &SeedConfig,
) -> DomainResult<SeedReport> {
    let mut report = SeedReport::default();

    if !config.enabled {
        debug!("Seeding disabled");
        return Ok(report);
    }

    for seed in &config.users {
        if !users.email_exists(&seed.email).await? {
            users
                .registration_with_roles(seed.registration(), &seed.roles)
                .await?;
            report.created.push(seed.email.clone());
            continue;
        }

        let existing = users.find_by_email(&seed.email).await?;
        let missing: Vec<_> = seed
            .roles
            .iter()
            .copied()
            .filter(|name| !existing.has_role(*name))
            .collect();

        match existing.id {
            Some(id) if !missing.is_empty() => {
                users.assign_roles(id, &missing).await?;
                info!(email = %seed.email, roles = ?missing, "Seed user roles restored");
                report.updated.push(seed.email.clone());
            }
            _ => {
                debug!(email = %seed.email, "Seed user exists, skipping");
                report.skipped.push(seed.email.clone());
            }
        }
    }

    info!(
        created = report.created.len(),
        updated = report.updated.len(),
        skipped = report.skipped.len(),
        "Default users seeded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::TestContext;
    use crate::application::testing::register_payload;
    use crate::domain::{Role, RoleName, Service};

    #[tokio::test]
    async fn seeding_twice_creates_users_once() {
        let ctx = TestContext::new().await;
        let config = SeedConfig::default();

        let first = seed_default_users(&ctx.services.users, &config).await.unwrap();
        assert_eq!(first.created.len(), 2);
        assert!(first.skipped.is_empty());

        let second = seed_default_users(&ctx.services.users, &config).await.unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.skipped, first.created);

        assert_eq!(ctx.services.users.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn seeded_admin_holds_both_roles() {
        let ctx = TestContext::new().await;
        let config = SeedConfig::default();
        seed_default_users(&ctx.services.users, &config).await.unwrap();

        let admin = ctx
            .services
            .users
            .find_by_email(&config.users[0].email)
            .await
            .unwrap();
        assert!(admin.has_role(RoleName::Admin));
        assert!(admin.has_role(RoleName::User));
        assert!(ctx.services.users.password_matches(&admin, "proba"));

        let user = ctx
            .services
            .users
            .find_by_email(&config.users[1].email)
            .await
            .unwrap();
        assert_eq!(user.role_names(), vec![RoleName::User]);
    }

    #[tokio::test]
    async fn failed_run_is_completed_by_the_next_one() {
        let ctx = TestContext::new().await;
        let config = SeedConfig::default();
        let roles = &ctx.services.roles;

        let admin_role = roles.find_by_role_name(RoleName::Admin).await.unwrap();
        roles.delete_by_id(admin_role.id.unwrap()).await.unwrap();

        let err = seed_default_users(&ctx.services.users, &config)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!ctx
            .services
            .users
            .email_exists(&config.users[0].email)
            .await
            .unwrap());

        roles.save(Role::new(RoleName::Admin)).await.unwrap();
        let report = seed_default_users(&ctx.services.users, &config).await.unwrap();
        assert_eq!(report.created.len(), 2);

        let admin = ctx
            .services
            .users
            .find_by_email(&config.users[0].email)
            .await
            .unwrap();
        assert!(admin.has_role(RoleName::Admin));
        assert!(admin.has_role(RoleName::User));
    }

    #[tokio::test]
    async fn existing_account_gains_missing_roles() {
        let ctx = TestContext::new().await;
        let config = SeedConfig::default();
        let admin_email = config.users[0].email.clone();
        ctx.services
            .users
            .registration_new_user(register_payload(&admin_email))
            .await
            .unwrap();

        let report = seed_default_users(&ctx.services.users, &config).await.unwrap();
        assert_eq!(report.updated, vec![admin_email.clone()]);
        assert_eq!(report.created, vec![config.users[1].email.clone()]);

        let admin = ctx.services.users.find_by_email(&admin_email).await.unwrap();
        assert!(admin.has_role(RoleName::Admin));

        let again = seed_default_users(&ctx.services.users, &config).await.unwrap();
        assert!(again.updated.is_empty());
        assert_eq!(again.skipped.len(), 2);
    }

    #[tokio::test]
    async fn disabled_seed_does_nothing() {
        let ctx = TestContext::new().await;
        let config = SeedConfig {
            enabled: false,
            ..SeedConfig::default()
        };

        let report = seed_default_users(&ctx.services.users, &config).await.unwrap();
        assert_eq!(report, SeedReport::default());
        assert!(ctx.services.users.find_all().await.unwrap().is_empty());
    }
}
