//! `UserRepository` kept in a mutex-guarded map.
//!
//! The email index and the account map are updated under one lock, so the
//! duplicate check and the insert are atomic.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserAccount, UserId};

#[derive(Default)]
struct Store {
    accounts: HashMap<UserId, UserAccount>,
    emails: HashMap<String, UserId>,
}

/// In-memory credential store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut store = self.lock()?;
        let email = account.user().email().as_ref();
        if store.emails.contains_key(email) {
            return Err(UserPersistenceError::duplicate_email(email));
        }

        let id = account.user().id().clone();
        store.emails.insert(email.to_owned(), id.clone());
        store.accounts.insert(id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let store = self.lock()?;
        Ok(store.accounts.get(id).map(|account| account.user().clone()))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let store = self.lock()?;
        Ok(store
            .emails
            .get(email.as_ref())
            .and_then(|id| store.accounts.get(id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{PasswordHash, Username};
    use rstest::{fixture, rstest};

    fn account(email: &str) -> UserAccount {
        let user = User::new(
            UserId::random(),
            Username::new("ada").expect("username"),
            EmailAddress::new(email).expect("email"),
        );
        UserAccount::new(user, PasswordHash::new("$2b$04$hash").expect("hash"))
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn stored_account_is_found_by_id_and_email(repo: InMemoryUserRepository) {
        let stored = account("ada@example.com");
        repo.insert(&stored).await.expect("insert succeeds");

        let by_id = repo
            .find_by_id(stored.user().id())
            .await
            .expect("lookup succeeds");
        assert_eq!(by_id.as_ref(), Some(stored.user()));

        let by_email = repo
            .find_by_email(stored.user().email())
            .await
            .expect("lookup succeeds")
            .expect("account present");
        assert_eq!(by_email.password_hash(), stored.password_hash());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(repo: InMemoryUserRepository) {
        repo.insert(&account("ada@example.com"))
            .await
            .expect("first insert");

        let error = repo
            .insert(&account("ada@example.com"))
            .await
            .expect_err("second insert");
        assert_eq!(error, UserPersistenceError::duplicate_email("ada@example.com"));
    }

    #[rstest]
    #[tokio::test]
    async fn email_lookup_is_exact(repo: InMemoryUserRepository) {
        repo.insert(&account("ada@example.com"))
            .await
            .expect("insert");

        let other_case = EmailAddress::new("Ada@Example.com").expect("email");
        let found = repo.find_by_email(&other_case).await.expect("lookup");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_id_is_absent(repo: InMemoryUserRepository) {
        let found = repo.find_by_id(&UserId::random()).await.expect("lookup");
        assert!(found.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_admit_one_account_per_email() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.insert(&account("race@example.com")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.expect("task completes").is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
    }
}
