//! Tests for the account service.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockTokenService, MockUserRepository};
use crate::domain::{EmailAddress, ErrorCode, PasswordHash, Username};

type TestService = AccountService<MockUserRepository, MockPasswordHasher, MockTokenService>;

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenService,
) -> TestService {
    AccountService::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens))
}

fn stored_account(email: &str) -> UserAccount {
    let user = User::new(
        UserId::random(),
        Username::new("ada").expect("valid username"),
        EmailAddress::new(email).expect("valid email"),
    );
    UserAccount::new(user, PasswordHash::new("$2b$04$stored").expect("valid hash"))
}

fn registration() -> Registration {
    Registration::try_from_parts("ada", "ada@example.com", "secret", "secret")
        .expect("valid registration")
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("ada@example.com", password).expect("valid credentials")
}

#[tokio::test]
async fn register_hashes_password_and_stores_account() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|account: &UserAccount| {
            account.password_hash().as_str() == "hashed:secret"
                && account.user().email().as_ref() == "ada@example.com"
        })
        .times(1)
        .return_once(|_| Ok(()));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .return_once(|plain| Ok(PasswordHash::new(format!("hashed:{plain}")).expect("hash")));

    let service = make_service(users, hasher, MockTokenService::new());
    let user = service
        .register(&registration())
        .await
        .expect("registration succeeds");

    assert_eq!(user.username().as_ref(), "ada");
    assert_eq!(user.email().as_ref(), "ada@example.com");
}

#[tokio::test]
async fn register_rejects_taken_email_without_hashing() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(stored_account("ada@example.com"))));
    users.expect_insert().never();
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().never();

    let service = make_service(users, hasher, MockTokenService::new());
    let error = service
        .register(&registration())
        .await
        .expect_err("duplicate email");

    assert_eq!(error.code(), ErrorCode::UnprocessableEntity);
    assert_eq!(
        error.details(),
        Some(&json!({ "field": "email", "code": "email_taken" }))
    );
}

#[tokio::test]
async fn register_maps_racing_insert_to_email_taken() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    users
        .expect_insert()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::duplicate_email("ada@example.com")));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .return_once(|_| Ok(PasswordHash::new("hashed").expect("hash")));

    let service = make_service(users, hasher, MockTokenService::new());
    let error = service
        .register(&registration())
        .await
        .expect_err("duplicate email");

    assert_eq!(error, email_taken());
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn register_maps_repository_failures(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = make_service(users, MockPasswordHasher::new(), MockTokenService::new());
    let error = service
        .register(&registration())
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn register_reports_hashing_failure_as_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    users.expect_insert().never();
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .return_once(|_| Err(PasswordHashError::hash("cost out of range")));

    let service = make_service(users, hasher, MockTokenService::new());
    let error = service
        .register(&registration())
        .await
        .expect_err("hash failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn authenticate_issues_token_for_matching_password() {
    let account = stored_account("ada@example.com");
    let expected_id = account.user().id().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(account)));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|plain: &str, _hash: &PasswordHash| plain == "secret")
        .times(1)
        .return_once(|_, _| Ok(true));
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .withf(move |id: &UserId| *id == expected_id)
        .times(1)
        .return_once(|_| Ok(AccessToken::new("signed.token.value")));

    let service = make_service(users, hasher, tokens);
    let token = service
        .authenticate(&credentials("secret"))
        .await
        .expect("login succeeds");

    assert_eq!(token.as_str(), "signed.token.value");
}

#[tokio::test]
async fn authenticate_reports_unknown_email_as_not_found() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().never();

    let service = make_service(users, hasher, MockTokenService::new());
    let error = service
        .authenticate(&credentials("secret"))
        .await
        .expect_err("unknown email");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn authenticate_rejects_wrong_password_without_issuing() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(stored_account("ada@example.com"))));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .times(1)
        .return_once(|_, _| Ok(false));
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().never();

    let service = make_service(users, hasher, tokens);
    let error = service
        .authenticate(&credentials("wrong"))
        .await
        .expect_err("wrong password");

    assert_eq!(error.code(), ErrorCode::UnprocessableEntity);
    assert_eq!(
        error.details(),
        Some(&json!({ "field": "password", "code": "invalid_password" }))
    );
}

#[tokio::test]
async fn authenticate_reports_signing_failure_as_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(stored_account("ada@example.com"))));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .times(1)
        .return_once(|_, _| Ok(true));
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .times(1)
        .return_once(|_| Err(TokenError::signing("bad key")));

    let service = make_service(users, hasher, tokens);
    let error = service
        .authenticate(&credentials("secret"))
        .await
        .expect_err("signing failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn fetch_profile_returns_own_profile() {
    let account = stored_account("ada@example.com");
    let user = account.user().clone();
    let id = user.id().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(user)));

    let service = make_service(users, MockPasswordHasher::new(), MockTokenService::new());
    let profile = service
        .fetch_profile(&id, &id)
        .await
        .expect("profile loads");

    assert_eq!(profile.id(), &id);
    assert_eq!(profile.username().as_ref(), "ada");
}

#[tokio::test]
async fn fetch_profile_forbids_other_users_before_lookup() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().never();

    let service = make_service(users, MockPasswordHasher::new(), MockTokenService::new());
    let error = service
        .fetch_profile(&UserId::random(), &UserId::random())
        .await
        .expect_err("foreign profile");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn fetch_profile_reports_missing_user() {
    let id = UserId::random();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));

    let service = make_service(users, MockPasswordHasher::new(), MockTokenService::new());
    let error = service
        .fetch_profile(&id, &id)
        .await
        .expect_err("deleted user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
