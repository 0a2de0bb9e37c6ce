//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn ada() -> User {
    User::try_from_strings(VALID_ID, "ada", "ada@example.com").expect("valid fixture user")
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_from_uuid_matches_parsed_form() {
    let uuid = Uuid::new_v4();
    let id = UserId::from_uuid(uuid);
    assert_eq!(UserId::new(uuid.to_string()), Ok(id.clone()));
    assert_eq!(id.as_uuid(), &uuid);
}

#[rstest]
#[case("")]
#[case("   ")]
fn username_rejects_blank(#[case] raw: &str) {
    assert_eq!(Username::new(raw), Err(UserValidationError::EmptyUsername));
}

#[rstest]
fn username_and_email_are_trimmed() {
    let username = Username::new("  ada ").expect("valid username");
    let email = EmailAddress::new(" ada@example.com\n").expect("valid email");
    assert_eq!(username.as_ref(), "ada");
    assert_eq!(email.as_ref(), "ada@example.com");
}

#[rstest]
fn email_rejects_blank() {
    assert_eq!(EmailAddress::new("\t"), Err(UserValidationError::EmptyEmail));
}

#[rstest]
fn password_hash_is_redacted_in_debug_output() {
    let hash = PasswordHash::new("$2b$04$abcdefghijklmnopqrstuv").expect("non-empty hash");
    let rendered = format!("{hash:?}");
    assert!(!rendered.contains("$2b$"));
    assert_eq!(PasswordHash::new(""), Err(UserValidationError::EmptyPasswordHash));
}

#[rstest]
fn user_serialises_without_credentials(ada: User) {
    let value = serde_json::to_value(&ada).expect("serialise user");
    assert_eq!(
        value,
        json!({ "id": VALID_ID, "username": "ada", "email": "ada@example.com" })
    );
}

#[rstest]
fn user_deserialisation_validates_fields() {
    let payload = json!({ "id": "nope", "username": "ada", "email": "ada@example.com" });
    let result: Result<User, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn account_exposes_user_view(ada: User) {
    let hash = PasswordHash::new("hash").expect("non-empty hash");
    let account = UserAccount::new(ada.clone(), hash.clone());
    assert_eq!(account.password_hash(), &hash);
    assert_eq!(account.into_user(), ada);
}
