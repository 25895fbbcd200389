//! Company record.

use serde::Deserialize;

use super::ResourceId;

/// Company as reported by the REST backend. Read-only in the gateway.
///
/// ## Invariants
/// - `id` is a valid [`ResourceId`].
/// - `description` is optional; backends may omit it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    id: ResourceId,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

impl Company {
    /// Construct a company record.
    pub fn new(id: ResourceId, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description,
        }
    }

    /// Backend identifier.
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Company name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-form description, when the backend provides one.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
