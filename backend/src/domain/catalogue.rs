//! Universities and careers offered on the onboarding form.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ReferenceId;

/// University a student can pick during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct University {
    #[schema(value_type = Object, example = 5)]
    pub id: ReferenceId,
    #[schema(example = "Universidad de Buenos Aires")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "UBA")]
    pub short_name: Option<String>,
}

/// Career offered by a university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    #[schema(value_type = Object, example = 2)]
    pub id: ReferenceId,
    #[schema(example = "Ingeniería en Informática")]
    pub name: String,
    #[schema(value_type = Object, example = 5)]
    pub university_id: ReferenceId,
}

impl Career {
    /// Whether this career is taught at `university`.
    pub fn belongs_to(&self, university: &ReferenceId) -> bool {
        // Ids may arrive as numbers from one query and strings from another.
        self.university_id == *university
            || self.university_id.to_string() == university.to_string()
    }
}
