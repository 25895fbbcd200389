//! User records and the write models used by the user mutations.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::ResourceId;

/// Validation errors raised while building [`NewUser`] or [`UserPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// `firstName` is empty once trimmed.
    #[error("firstName must not be blank")]
    BlankFirstName,
    /// `age` is below zero.
    #[error("age must not be negative (got {age})")]
    NegativeAge { age: i32 },
}

fn validate_first_name(first_name: String) -> Result<String, UserValidationError> {
    if first_name.trim().is_empty() {
        return Err(UserValidationError::BlankFirstName);
    }
    Ok(first_name)
}

fn validate_age(age: i32) -> Result<i32, UserValidationError> {
    if age < 0 {
        return Err(UserValidationError::NegativeAge { age });
    }
    Ok(age)
}

/// User as reported by the REST backend.
///
/// ## Invariants
/// - `id` is assigned by the backend and is a valid [`ResourceId`].
/// - `company_id` is absent when the user belongs to no company.
///
/// Unknown fields in backend payloads are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: ResourceId,
    first_name: String,
    age: i32,
    #[serde(default)]
    company_id: Option<ResourceId>,
}

impl User {
    /// Construct a user record without a company.
    pub fn new(id: ResourceId, first_name: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            age,
            company_id: None,
        }
    }

    /// Link the record to a company.
    #[must_use]
    pub fn with_company(mut self, company_id: ResourceId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Backend identifier.
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Age in years.
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Identifier of the owning company, if any.
    pub fn company_id(&self) -> Option<&ResourceId> {
        self.company_id.as_ref()
    }
}

/// Payload for creating a user. The backend assigns the identifier.
///
/// # Examples
/// ```
/// use gateway::domain::NewUser;
///
/// let user = NewUser::new("Ana", 30).expect("valid user");
/// assert_eq!(user.first_name(), "Ana");
/// assert!(NewUser::new("  ", 30).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    first_name: String,
    age: i32,
    company_id: Option<ResourceId>,
}

impl NewUser {
    /// Validate and construct a creation payload.
    pub fn new(first_name: impl Into<String>, age: i32) -> Result<Self, UserValidationError> {
        Ok(Self {
            first_name: validate_first_name(first_name.into())?,
            age: validate_age(age)?,
            company_id: None,
        })
    }

    /// Forward the company link in the creation payload.
    #[must_use]
    pub fn with_company(mut self, company_id: ResourceId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Age in years.
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Company the new user is linked to, if any.
    pub fn company_id(&self) -> Option<&ResourceId> {
        self.company_id.as_ref()
    }

    /// JSON body sent to the backend.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("firstName".to_owned(), Value::from(self.first_name.as_str()));
        body.insert("age".to_owned(), Value::from(self.age));
        if let Some(company_id) = &self.company_id {
            body.insert("companyId".to_owned(), Value::from(company_id.as_str()));
        }
        Value::Object(body)
    }
}

/// How a partial update treats the company link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CompanyLink {
    /// Leave the link untouched (field omitted from the update).
    #[default]
    Keep,
    /// Remove the link (`companyId` sent as null).
    Unlink,
    /// Point the user at another company.
    Link(ResourceId),
}

/// Partial update for an existing user. Only provided fields are sent.
///
/// # Examples
/// ```
/// use gateway::domain::UserPatch;
/// use serde_json::json;
///
/// let patch = UserPatch::default().with_age(31).expect("valid age");
/// assert_eq!(patch.to_body(), json!({ "age": 31 }));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    first_name: Option<String>,
    age: Option<i32>,
    company: CompanyLink,
}

impl UserPatch {
    /// Replace the given name.
    pub fn with_first_name(
        mut self,
        first_name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        self.first_name = Some(validate_first_name(first_name.into())?);
        Ok(self)
    }

    /// Replace the age.
    pub fn with_age(mut self, age: i32) -> Result<Self, UserValidationError> {
        self.age = Some(validate_age(age)?);
        Ok(self)
    }

    /// Change the company link.
    #[must_use]
    pub fn with_company(mut self, company: CompanyLink) -> Self {
        self.company = company;
        self
    }

    /// JSON body sent to the backend, omitting untouched fields.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        if let Some(first_name) = &self.first_name {
            body.insert("firstName".to_owned(), Value::from(first_name.as_str()));
        }
        if let Some(age) = self.age {
            body.insert("age".to_owned(), Value::from(age));
        }
        match &self.company {
            CompanyLink::Keep => {}
            CompanyLink::Unlink => {
                body.insert("companyId".to_owned(), Value::Null);
            }
            CompanyLink::Link(company_id) => {
                body.insert("companyId".to_owned(), Value::from(company_id.as_str()));
            }
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests;
