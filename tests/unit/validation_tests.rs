// ==============================
// tests/unit/validation_tests.rs
// ==============================
//! Boundary checks for registration and profile validation
use chatter_backend::validation::{
    validate_profile_update, validate_registration, ValidationError, MAX_NAME_LENGTH,
    MAX_PASSWORD_LENGTH, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH,
};
use chatter_common::{RegisterRequest, UpdateProfileRequest};

fn registration(name: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_name_length_boundaries() {
    let ok = |n: usize| validate_registration(&registration(&"a".repeat(n), "a@b.co", "secret1"));

    assert!(matches!(ok(MIN_NAME_LENGTH - 1), Err(ValidationError::InvalidName(_))));
    assert!(ok(MIN_NAME_LENGTH).is_ok());
    assert!(ok(MAX_NAME_LENGTH).is_ok());
    assert!(matches!(ok(MAX_NAME_LENGTH + 1), Err(ValidationError::InvalidName(_))));
}

#[test]
fn test_password_length_boundaries() {
    let ok = |n: usize| validate_registration(&registration("Ann", "a@b.co", &"p".repeat(n)));

    assert!(matches!(
        ok(MIN_PASSWORD_LENGTH - 1),
        Err(ValidationError::InvalidPassword(_))
    ));
    assert!(ok(MIN_PASSWORD_LENGTH).is_ok());
    assert!(ok(MAX_PASSWORD_LENGTH).is_ok());
    assert!(matches!(
        ok(MAX_PASSWORD_LENGTH + 1),
        Err(ValidationError::InvalidPassword(_))
    ));
}

#[test]
fn test_lengths_count_characters() {
    // Two characters, four bytes
    assert!(validate_registration(&registration("éé", "a@b.co", "secret1")).is_ok());
}

#[test]
fn test_first_failing_field_is_reported() {
    let err = validate_registration(&registration("", "not-an-email", "")).unwrap_err();
    assert_eq!(err, ValidationError::InvalidName("name is required".to_string()));

    let err = validate_registration(&registration("Ann", "not-an-email", "")).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidEmail("invalid email format".to_string())
    );
}

#[test]
fn test_profile_update_checks_only_supplied_fields() {
    assert_eq!(
        validate_profile_update(&UpdateProfileRequest::default()),
        Err(ValidationError::EmptyUpdate)
    );

    let update = UpdateProfileRequest {
        email: Some("new@b.co".to_string()),
        ..Default::default()
    };
    assert!(validate_profile_update(&update).is_ok());

    let update = UpdateProfileRequest {
        name: Some("A".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        validate_profile_update(&update),
        Err(ValidationError::InvalidName(_))
    ));
}
