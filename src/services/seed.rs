//! Demo dataset loading, available only when the deployment enables it.

use chrono::NaiveDate;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::seed::DemoDataset;
use crate::repository::{DemoSeedReader, DemoSeedWriter, SeedCounts};
use crate::services::{ServiceError, ServiceResult, tenant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(SeedCounts),
    /// The tenant already has the demo dataset; nothing was written.
    AlreadySeeded,
}

/// Loads the demo dataset for the signed-in tenant.
///
/// Fails with [`ServiceError::NotFound`] before touching anything when demo
/// mode is off.
pub fn seed_demo_data<R>(
    repo: &R,
    user: &AuthenticatedUser,
    demo_mode: bool,
    today: NaiveDate,
) -> ServiceResult<SeedOutcome>
where
    R: DemoSeedWriter + ?Sized,
{
    if !demo_mode {
        log::warn!("Refusing demo seed for {}: demo mode is off", user.email);
        return Err(ServiceError::NotFound);
    }

    let owner_id = tenant(user)?;
    let dataset = DemoDataset::build(&owner_id, today)?;

    match repo.seed_demo_data(&dataset) {
        Ok(Some(counts)) => {
            log::info!(
                "Seeded {} demo clients and {} tasks for {owner_id}",
                counts.clients,
                counts.tasks
            );
            Ok(SeedOutcome::Seeded(counts))
        }
        Ok(None) => Ok(SeedOutcome::AlreadySeeded),
        Err(err) => {
            log::error!("Failed to seed demo data: {err}");
            Err(err.into())
        }
    }
}

/// Whether the dashboard should offer to load the demo dataset.
pub fn can_seed<R>(repo: &R, user: &AuthenticatedUser, demo_mode: bool) -> bool
where
    R: DemoSeedReader + ?Sized,
{
    if !demo_mode {
        return false;
    }
    let Ok(owner_id) = tenant(user) else {
        return false;
    };
    match repo.is_demo_seeded(&owner_id) {
        Ok(seeded) => !seeded,
        Err(err) => {
            log::error!("Failed to check demo seed marker: {err}");
            false
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{owner, user};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn disabled_demo_mode_fails_closed() {
        let mut repo = MockRepository::new();
        repo.expect_seed_demo_data().never();

        let result = seed_demo_data(&repo, &user(&["crm"]), false, today());
        assert!(matches!(result, Err(ServiceError::NotFound)));
        // Even unauthorized callers only ever see "not found".
        let result = seed_demo_data(&repo, &user(&[]), false, today());
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn seeds_the_full_dataset_for_the_tenant() {
        let mut repo = MockRepository::new();
        repo.expect_seed_demo_data()
            .withf(|dataset| {
                dataset.owner_id == owner() && dataset.clients.len() == 5 && dataset.tasks.len() == 5
            })
            .returning(|dataset| {
                Ok(Some(SeedCounts {
                    clients: dataset.clients.len(),
                    tasks: dataset.tasks.len(),
                }))
            });

        let outcome = seed_demo_data(&repo, &user(&["crm"]), true, today()).unwrap();
        assert_eq!(
            outcome,
            SeedOutcome::Seeded(SeedCounts {
                clients: 5,
                tasks: 5
            })
        );
    }

    #[test]
    fn second_seed_is_informational() {
        let mut repo = MockRepository::new();
        repo.expect_seed_demo_data().returning(|_| Ok(None));

        let outcome = seed_demo_data(&repo, &user(&["crm"]), true, today()).unwrap();
        assert_eq!(outcome, SeedOutcome::AlreadySeeded);
    }

    #[test]
    fn can_seed_hides_the_offer_when_unavailable() {
        let mut repo = MockRepository::new();
        repo.expect_is_demo_seeded().returning(|_| Ok(true));
        assert!(!can_seed(&repo, &user(&["crm"]), true));
        assert!(!can_seed(&repo, &user(&["crm"]), false));

        let mut repo = MockRepository::new();
        repo.expect_is_demo_seeded()
            .returning(|_| Err(RepositoryError::Connection("down".into())));
        assert!(!can_seed(&repo, &user(&["crm"]), true));

        let mut repo = MockRepository::new();
        repo.expect_is_demo_seeded().returning(|_| Ok(false));
        assert!(can_seed(&repo, &user(&["crm"]), true));
    }
}
