//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `users_email_key` index; a violation
//! is reported as `DuplicateEmail` so the domain can treat a lost registration
//! race the same as a taken address.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, PasswordHash, User, UserAccount, UserId, UserValidationError,
};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to user persistence errors.
///
/// `email` is only used to label unique violations raised by inserts.
fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_email(email.unwrap_or_default())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}

fn map_row_error(error: UserValidationError) -> UserPersistenceError {
    UserPersistenceError::query(format!("stored user row is invalid: {error}"))
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let user = User::try_from_strings(row.id.to_string(), row.username, row.email)
        .map_err(map_row_error)?;
    let password_hash = PasswordHash::new(row.password_hash).map_err(map_row_error)?;
    Ok(UserAccount::new(user, password_hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user = account.user();
        let email = user.email().as_ref();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            email,
            password_hash: account.password_hash().as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(email)))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_account)
            .transpose()
            .map(|account| account.map(UserAccount::into_user))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_account).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Mapping coverage; query behaviour needs a live database.
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("violation".to_owned()))
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_email() {
        let error = map_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation),
            Some("ada@example.com"),
        );
        assert_eq!(error, UserPersistenceError::duplicate_email("ada@example.com"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let error = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection), None);
        assert!(matches!(error, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_errors_map_to_query_error(#[case] error: DieselError) {
        assert!(matches!(
            map_diesel_error(error, None),
            UserPersistenceError::Query { .. }
        ));
    }

    #[rstest]
    fn row_converts_to_account() {
        let id = Uuid::new_v4();
        let row = UserRow {
            id,
            username: "ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$2b$04$hash".into(),
            created_at: Utc::now(),
        };

        let account = row_to_account(row).expect("valid row");
        assert_eq!(account.user().id().as_uuid(), &id);
        assert_eq!(account.user().email().as_ref(), "ada@example.com");
        assert_eq!(account.password_hash().as_str(), "$2b$04$hash");
    }

    #[rstest]
    fn blank_row_fields_are_query_errors() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "  ".into(),
            email: "ada@example.com".into(),
            password_hash: "$2b$04$hash".into(),
            created_at: Utc::now(),
        };

        assert!(matches!(
            row_to_account(row),
            Err(UserPersistenceError::Query { .. })
        ));
    }
}
