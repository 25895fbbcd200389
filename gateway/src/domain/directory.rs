//! Directory use-case: users and companies served from the REST backend.
//!
//! Every operation selects the method and resource path, sends exactly one
//! request through the [`RestBackend`] port, and decodes the body into a
//! domain record. Nothing is cached: each call re-fetches, and relations are
//! resolved one request at a time.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::ports::{ResourcePath, RestBackend, RestBackendError, RestRequest};
use super::{Company, Error, NewUser, ResourceId, User, UserPatch};

const USERS: &str = "users";
const COMPANIES: &str = "companies";

fn user_path(id: &ResourceId) -> ResourcePath {
    ResourcePath::collection(USERS).child(id.as_str())
}

fn company_path(id: &ResourceId) -> ResourcePath {
    ResourcePath::collection(COMPANIES).child(id.as_str())
}

/// Use-case service backing every GraphQL resolver.
///
/// Cloning is cheap; clones share the same backend handle.
#[derive(Clone)]
pub struct Directory {
    backend: Arc<dyn RestBackend>,
}

impl Directory {
    /// Build a directory over a backend adapter.
    pub fn new(backend: Arc<dyn RestBackend>) -> Self {
        Self { backend }
    }

    /// Fetch one user: `GET /users/:id`.
    pub async fn user(&self, id: &ResourceId) -> Result<User, Error> {
        self.fetch(RestRequest::get(user_path(id))).await
    }

    /// Fetch one company: `GET /companies/:id`.
    pub async fn company(&self, id: &ResourceId) -> Result<Company, Error> {
        self.fetch(RestRequest::get(company_path(id))).await
    }

    /// Users belonging to a company: `GET /companies/:id/users`.
    ///
    /// Order follows the backend response. An empty list or an empty body
    /// both mean the company has no members.
    pub async fn company_users(&self, company: &Company) -> Result<Vec<User>, Error> {
        let request = RestRequest::get(company_path(company.id()).child(USERS));
        let path = request.path.to_string();
        match self.send(request).await? {
            Value::Null => Ok(Vec::new()),
            body => decode(&path, body),
        }
    }

    /// Company a user belongs to.
    ///
    /// Users without a `companyId` resolve to `None` without a backend call.
    pub async fn user_company(&self, user: &User) -> Result<Option<Company>, Error> {
        let Some(company_id) = user.company_id() else {
            return Ok(None);
        };
        self.company(company_id).await.map(Some)
    }

    /// Create a user: `POST /users`. The backend assigns the identifier.
    pub async fn add_user(&self, user: &NewUser) -> Result<User, Error> {
        let path = ResourcePath::collection(USERS);
        self.fetch(RestRequest::post(path, user.to_body())).await
    }

    /// Partially update a user: `PATCH /users/:id` with the changed fields.
    pub async fn edit_user(&self, id: &ResourceId, patch: &UserPatch) -> Result<User, Error> {
        self.fetch(RestRequest::patch(user_path(id), patch.to_body()))
            .await
    }

    /// Remove a user: `DELETE /users/:id`.
    ///
    /// Returns the deleted record when the backend echoes one, and `None`
    /// for empty confirmations such as `{}` or an empty body.
    pub async fn delete_user(&self, id: &ResourceId) -> Result<Option<User>, Error> {
        let request = RestRequest::delete(user_path(id));
        let path = request.path.to_string();
        let body = self.send(request).await?;
        if echoes_record(&body) {
            decode(&path, body).map(Some)
        } else {
            Ok(None)
        }
    }

    async fn fetch<T>(&self, request: RestRequest) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let path = request.path.to_string();
        let body = self.send(request).await?;
        decode(&path, body)
    }

    async fn send(&self, request: RestRequest) -> Result<Value, Error> {
        let method = request.method;
        let path = request.path.to_string();
        self.backend.send(request).await.map_err(|error| {
            warn!(%method, %path, %error, "backend call failed");
            map_backend_error(&error)
        })
    }
}

fn echoes_record(body: &Value) -> bool {
    body.as_object()
        .is_some_and(|record| record.get("id").is_some_and(|id| !id.is_null()))
}

fn decode<T>(path: &str, body: Value) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    serde_json::from_value(body).map_err(|error| {
        warn!(%path, %error, "backend body does not match the expected shape");
        Error::upstream(format!("malformed backend response for {path}: {error}"))
    })
}

fn map_backend_error(error: &RestBackendError) -> Error {
    match error {
        RestBackendError::NotFound { path } => Error::not_found(format!("{path} not found")),
        RestBackendError::InvalidRequest { .. } => Error::internal(error.to_string()),
        RestBackendError::Status { .. }
        | RestBackendError::Transport { .. }
        | RestBackendError::Timeout { .. }
        | RestBackendError::Decode { .. } => Error::upstream(error.to_string()),
    }
}

#[cfg(test)]
mod tests;
