//! Tests for user records and write models.

use super::*;
use rstest::rstest;
use serde_json::json;

fn id(raw: &str) -> ResourceId {
    ResourceId::new(raw).expect("fixture id is valid")
}

#[rstest]
fn decodes_backend_record_with_numeric_ids() {
    let user: User = serde_json::from_value(json!({
        "id": 23,
        "firstName": "Bill",
        "age": 20,
        "companyId": 1
    }))
    .expect("user should decode");

    assert_eq!(user.id().as_str(), "23");
    assert_eq!(user.first_name(), "Bill");
    assert_eq!(user.age(), 20);
    assert_eq!(user.company_id().map(ResourceId::as_str), Some("1"));
}

#[rstest]
#[case::missing(json!({ "id": "40", "firstName": "Alex", "age": 40 }))]
#[case::null(json!({ "id": "40", "firstName": "Alex", "age": 40, "companyId": null }))]
fn company_id_is_optional(#[case] payload: serde_json::Value) {
    let user: User = serde_json::from_value(payload).expect("user should decode");
    assert!(user.company_id().is_none());
}

#[rstest]
fn empty_object_is_not_a_user() {
    assert!(serde_json::from_value::<User>(json!({})).is_err());
}

#[rstest]
#[case::blank_name("  ", 30, UserValidationError::BlankFirstName)]
#[case::negative_age("Ana", -1, UserValidationError::NegativeAge { age: -1 })]
fn new_user_rejects_invalid_input(
    #[case] first_name: &str,
    #[case] age: i32,
    #[case] expected: UserValidationError,
) {
    assert_eq!(NewUser::new(first_name, age), Err(expected));
}

#[rstest]
fn new_user_body_omits_absent_company() {
    let user = NewUser::new("Ana", 30).expect("valid user");
    assert_eq!(user.to_body(), json!({ "firstName": "Ana", "age": 30 }));
}

#[rstest]
fn new_user_body_forwards_company() {
    let user = NewUser::new("Ana", 30)
        .expect("valid user")
        .with_company(id("2"));
    assert_eq!(
        user.to_body(),
        json!({ "firstName": "Ana", "age": 30, "companyId": "2" })
    );
}

#[rstest]
#[case::untouched(UserPatch::default(), json!({}))]
#[case::unlink(
    UserPatch::default().with_company(CompanyLink::Unlink),
    json!({ "companyId": null })
)]
#[case::relink(
    UserPatch::default().with_company(CompanyLink::Link(id("3"))),
    json!({ "companyId": "3" })
)]
fn patch_body_only_carries_changed_fields(
    #[case] patch: UserPatch,
    #[case] expected: serde_json::Value,
) {
    assert_eq!(patch.to_body(), expected);
}

#[rstest]
fn patch_with_name_and_age() {
    let patch = UserPatch::default()
        .with_first_name("Samantha")
        .and_then(|patch| patch.with_age(31))
        .expect("valid patch");

    assert_eq!(
        patch.to_body(),
        json!({ "firstName": "Samantha", "age": 31 })
    );
}

#[rstest]
fn patch_rejects_negative_age() {
    let result = UserPatch::default().with_age(-5);
    assert_eq!(result, Err(UserValidationError::NegativeAge { age: -5 }));
}
