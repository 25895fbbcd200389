//! Tests for the directory use-case against a mocked backend port.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockRestBackend, RestMethod};
use crate::domain::{CompanyLink, TraceId};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::json;

fn id(raw: &str) -> ResourceId {
    ResourceId::new(raw).expect("fixture id is valid")
}

fn directory(backend: MockRestBackend) -> Directory {
    Directory::new(Arc::new(backend))
}

#[fixture]
fn apple() -> Company {
    Company::new(id("1"), "Apple", Some("iphone".to_owned()))
}

#[rstest]
#[tokio::test]
async fn user_fetches_member_path() {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .with(eq(RestRequest::get(ResourcePath::collection("users").child("23"))))
        .times(1)
        .returning(|_| Ok(json!({ "id": "23", "firstName": "Bill", "age": 20 })));

    let user = directory(backend).user(&id("23")).await.expect("user");
    assert_eq!(user.id().as_str(), "23");
    assert_eq!(user.first_name(), "Bill");
}

#[rstest]
#[tokio::test]
async fn missing_user_maps_to_not_found() {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .times(1)
        .returning(|request| Err(RestBackendError::not_found(request.path.to_string())));

    let error = directory(backend)
        .user(&id("404"))
        .await
        .expect_err("missing user");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "/users/404 not found");
}

#[rstest]
#[case::status(RestBackendError::status(500_u16, "boom"))]
#[case::transport(RestBackendError::transport("connection refused"))]
#[case::timeout(RestBackendError::timeout("deadline exceeded"))]
#[case::decode(RestBackendError::decode("expected value"))]
#[tokio::test]
async fn backend_failures_map_to_upstream(#[case] failure: RestBackendError) {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .times(1)
        .returning(move |_| Err(failure.clone()));

    let error = directory(backend)
        .company(&id("1"))
        .await
        .expect_err("backend failure");
    assert_eq!(error.code(), ErrorCode::Upstream);
}

#[rstest]
#[tokio::test]
async fn adapter_request_errors_are_internal() {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .times(1)
        .returning(|_| Err(RestBackendError::invalid_request("bad base url")));

    let error = directory(backend)
        .user(&id("1"))
        .await
        .expect_err("adapter failure");
    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn malformed_body_maps_to_upstream() {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .times(1)
        .returning(|_| Ok(json!({})));

    let error = directory(backend)
        .user(&id("23"))
        .await
        .expect_err("empty object is not a user");
    assert_eq!(error.code(), ErrorCode::Upstream);
    assert!(error.message().starts_with("malformed backend response for /users/23"));
}

#[rstest]
#[tokio::test]
async fn company_users_uses_nested_path_and_keeps_order(apple: Company) {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .with(eq(RestRequest::get(
            ResourcePath::collection("companies").child("1").child("users"),
        )))
        .times(1)
        .returning(|_| {
            Ok(json!([
                { "id": "23", "firstName": "Bill", "age": 20, "companyId": "1" },
                { "id": "41", "firstName": "Nick", "age": 40, "companyId": "1" }
            ]))
        });

    let users = directory(backend)
        .company_users(&apple)
        .await
        .expect("users");
    let ids: Vec<_> = users.iter().map(|user| user.id().as_str()).collect();
    assert_eq!(ids, ["23", "41"]);
}

#[rstest]
#[case::empty_array(json!([]))]
#[case::empty_body(serde_json::Value::Null)]
#[tokio::test]
async fn company_without_users_yields_empty_list(
    apple: Company,
    #[case] members: serde_json::Value,
) {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .times(1)
        .returning(move |_| Ok(members.clone()));

    let users = directory(backend)
        .company_users(&apple)
        .await
        .expect("users");
    assert!(users.is_empty());
}

#[rstest]
#[tokio::test]
async fn user_without_company_resolves_none_without_calls() {
    let mut backend = MockRestBackend::new();
    backend.expect_send().times(0);

    let user = User::new(id("40"), "Alex", 40);
    let company = directory(backend)
        .user_company(&user)
        .await
        .expect("no call, no error");
    assert!(company.is_none());
}

#[rstest]
#[tokio::test]
async fn user_company_fetches_linked_company() {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .with(eq(RestRequest::get(
            ResourcePath::collection("companies").child("2"),
        )))
        .times(1)
        .returning(|_| Ok(json!({ "id": "2", "name": "Google", "description": "search" })));

    let user = User::new(id("23"), "Bill", 20).with_company(id("2"));
    let company = directory(backend)
        .user_company(&user)
        .await
        .expect("company")
        .expect("linked company");
    assert_eq!(company.name(), "Google");
}

#[rstest]
#[tokio::test]
async fn add_user_posts_payload_including_company() {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .withf(|request| {
            request.method == RestMethod::Post
                && request.path == ResourcePath::collection("users")
                && request.body == Some(json!({ "firstName": "Ana", "age": 30, "companyId": "2" }))
        })
        .times(1)
        .returning(|request| {
            let mut record = request.body.unwrap_or_default();
            record["id"] = json!("a1");
            Ok(record)
        });

    let new_user = NewUser::new("Ana", 30)
        .expect("valid user")
        .with_company(id("2"));
    let created = directory(backend)
        .add_user(&new_user)
        .await
        .expect("created");
    assert_eq!(created.id().as_str(), "a1");
    assert_eq!(created.company_id().map(ResourceId::as_str), Some("2"));
}

#[rstest]
#[tokio::test]
async fn edit_user_patches_only_changed_fields() {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .with(eq(RestRequest::patch(
            ResourcePath::collection("users").child("23"),
            json!({ "age": 31, "companyId": null }),
        )))
        .times(1)
        .returning(|_| Ok(json!({ "id": "23", "firstName": "Bill", "age": 31 })));

    let patch = UserPatch::default()
        .with_age(31)
        .expect("valid age")
        .with_company(CompanyLink::Unlink);
    let updated = directory(backend)
        .edit_user(&id("23"), &patch)
        .await
        .expect("updated");
    assert_eq!(updated.first_name(), "Bill");
    assert_eq!(updated.age(), 31);
}

#[rstest]
#[case::empty_object(json!({}))]
#[case::empty_body(serde_json::Value::Null)]
#[tokio::test]
async fn delete_user_treats_empty_confirmation_as_none(#[case] confirmation: serde_json::Value) {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .with(eq(RestRequest::delete(
            ResourcePath::collection("users").child("23"),
        )))
        .times(1)
        .returning(move |_| Ok(confirmation.clone()));

    let deleted = directory(backend)
        .delete_user(&id("23"))
        .await
        .expect("deleted");
    assert!(deleted.is_none());
}

#[rstest]
#[tokio::test]
async fn delete_user_returns_echoed_record() {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .times(1)
        .returning(|_| Ok(json!({ "id": "23", "firstName": "Bill", "age": 20 })));

    let deleted = directory(backend)
        .delete_user(&id("23"))
        .await
        .expect("deleted")
        .expect("echoed record");
    assert_eq!(deleted.id().as_str(), "23");
}

#[rstest]
#[tokio::test]
async fn errors_carry_trace_id_in_scope() {
    let mut backend = MockRestBackend::new();
    backend
        .expect_send()
        .times(1)
        .returning(|_| Err(RestBackendError::transport("connection reset")));
    let directory = directory(backend);
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000001"
        .parse()
        .expect("valid UUID");

    let error = TraceId::scope(trace_id, async move { directory.user(&id("1")).await })
        .await
        .expect_err("transport failure");
    assert_eq!(
        error.trace_id(),
        Some("00000000-0000-0000-0000-000000000001")
    );
}
