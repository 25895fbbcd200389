//! Test utilities for the gateway crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or when the
//! `test-support` feature is enabled.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::domain::ports::{RestBackend, RestBackendError, RestMethod, RestRequest};

#[derive(Debug, Default)]
struct BackendState {
    users: Vec<Map<String, Value>>,
    companies: Vec<Map<String, Value>>,
    next_id: u64,
    requests: Vec<RestRequest>,
}

/// In-memory REST backend behaving like a json-server instance.
///
/// Records are plain JSON objects keyed by a string `id`. Every request is
/// logged before it is served, so tests can assert exact call counts.
///
/// Supported routes:
/// - `GET /users/:id`, `GET /companies/:id`, `GET /companies/:id/users`
/// - `POST /users` (assigns a fresh `id`)
/// - `PATCH /users/:id` (merges the body, `null` clears a field)
/// - `DELETE /users/:id` (answers `{}`)
///
/// Anything else answers 404.
///
/// # Examples
/// ```
/// use gateway::test_support::InMemoryRestBackend;
/// use serde_json::json;
///
/// let backend = InMemoryRestBackend::new()
///     .with_company(json!({ "id": "1", "name": "Apple" }))
///     .with_user(json!({ "id": "23", "firstName": "Bill", "age": 20, "companyId": "1" }));
/// assert_eq!(backend.request_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRestBackend {
    state: Mutex<BackendState>,
}

impl InMemoryRestBackend {
    /// Empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a company record. Non-object values are ignored.
    #[must_use]
    pub fn with_company(self, record: Value) -> Self {
        if let Value::Object(record) = record {
            self.lock().companies.push(record);
        }
        self
    }

    /// Seed a user record. Non-object values are ignored.
    #[must_use]
    pub fn with_user(self, record: Value) -> Self {
        if let Value::Object(record) = record {
            self.lock().users.push(record);
        }
        self
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RestRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RestBackend for InMemoryRestBackend {
    async fn send(&self, request: RestRequest) -> Result<Value, RestBackendError> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        serve(&mut state, &request)
    }
}

fn serve(state: &mut BackendState, request: &RestRequest) -> Result<Value, RestBackendError> {
    let segments: Vec<&str> = request.path.segments().iter().map(String::as_str).collect();
    let body = request.body.clone().unwrap_or(Value::Null);
    let not_found = || RestBackendError::not_found(request.path.to_string());

    match (request.method, segments.as_slice()) {
        (RestMethod::Get, ["users", id]) => {
            find(&state.users, id).map(object).ok_or_else(not_found)
        }
        (RestMethod::Get, ["companies", id]) => {
            find(&state.companies, id).map(object).ok_or_else(not_found)
        }
        (RestMethod::Get, ["companies", id, "users"]) => {
            if find(&state.companies, id).is_none() {
                return Err(not_found());
            }
            let members = state
                .users
                .iter()
                .filter(|user| user.get("companyId").and_then(id_of) == Some((*id).to_owned()))
                .cloned()
                .map(Value::Object)
                .collect();
            Ok(Value::Array(members))
        }
        (RestMethod::Post, ["users"]) => {
            let Value::Object(mut record) = body else {
                return Err(RestBackendError::status(400_u16, "body must be an object"));
            };
            state.next_id += 1;
            record.insert("id".to_owned(), json!(format!("u{}", state.next_id)));
            state.users.push(record.clone());
            Ok(Value::Object(record))
        }
        (RestMethod::Patch, ["users", id]) => {
            let Value::Object(changes) = body else {
                return Err(RestBackendError::status(400_u16, "body must be an object"));
            };
            let record = state
                .users
                .iter_mut()
                .find(|user| record_id(user).as_deref() == Some(*id))
                .ok_or_else(not_found)?;
            for (key, value) in changes {
                if key == "id" {
                    continue;
                }
                if value.is_null() {
                    record.remove(&key);
                } else {
                    record.insert(key, value);
                }
            }
            Ok(Value::Object(record.clone()))
        }
        (RestMethod::Delete, ["users", id]) => {
            let before = state.users.len();
            state
                .users
                .retain(|user| record_id(user).as_deref() != Some(*id));
            if state.users.len() == before {
                return Err(not_found());
            }
            Ok(json!({}))
        }
        _ => Err(not_found()),
    }
}

fn find<'a>(records: &'a [Map<String, Value>], id: &str) -> Option<&'a Map<String, Value>> {
    records
        .iter()
        .find(|record| record_id(record).as_deref() == Some(id))
}

fn object(record: &Map<String, Value>) -> Value {
    Value::Object(record.clone())
}

fn record_id(record: &Map<String, Value>) -> Option<String> {
    record.get("id").and_then(id_of)
}

fn id_of(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ResourcePath;
    use rstest::{fixture, rstest};

    #[fixture]
    fn backend() -> InMemoryRestBackend {
        InMemoryRestBackend::new()
            .with_company(json!({ "id": "1", "name": "Apple" }))
            .with_user(json!({ "id": "23", "firstName": "Bill", "age": 20, "companyId": "1" }))
            .with_user(json!({ "id": "40", "firstName": "Alex", "age": 40 }))
    }

    fn users() -> ResourcePath {
        ResourcePath::collection("users")
    }

    #[rstest]
    #[tokio::test]
    async fn serves_seeded_records(backend: InMemoryRestBackend) {
        let user = backend
            .send(RestRequest::get(users().child("23")))
            .await
            .expect("seeded user");
        assert_eq!(user["firstName"], "Bill");
        assert_eq!(backend.request_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn lists_company_members(backend: InMemoryRestBackend) {
        let members = backend
            .send(RestRequest::get(
                ResourcePath::collection("companies").child("1").child("users"),
            ))
            .await
            .expect("members");
        assert_eq!(members, json!([
            { "id": "23", "firstName": "Bill", "age": 20, "companyId": "1" }
        ]));
    }

    #[rstest]
    #[tokio::test]
    async fn patch_merges_and_null_clears(backend: InMemoryRestBackend) {
        let updated = backend
            .send(RestRequest::patch(
                users().child("23"),
                json!({ "age": 21, "companyId": null }),
            ))
            .await
            .expect("patched");
        assert_eq!(updated, json!({ "id": "23", "firstName": "Bill", "age": 21 }));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_then_get_is_not_found(backend: InMemoryRestBackend) {
        let confirmation = backend
            .send(RestRequest::delete(users().child("40")))
            .await
            .expect("deleted");
        assert_eq!(confirmation, json!({}));

        let error = backend
            .send(RestRequest::get(users().child("40")))
            .await
            .expect_err("gone");
        assert!(matches!(error, RestBackendError::NotFound { .. }));
        assert_eq!(backend.requests().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn post_assigns_identifiers(backend: InMemoryRestBackend) {
        let created = backend
            .send(RestRequest::post(users(), json!({ "firstName": "Ana", "age": 30 })))
            .await
            .expect("created");
        assert_eq!(created["id"], "u1");
    }
}
