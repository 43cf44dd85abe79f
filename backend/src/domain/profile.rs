//! Profile completeness and academic references.
//!
//! The profile store keeps university and career references as nullable
//! columns. A reference only counts as set when it is "truthy": a non-zero
//! number or a non-blank string. Rows arrive from the store with whatever JSON
//! type the column has, so references keep their original representation.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Identifier of a university or career row.
///
/// # Examples
/// ```
/// use prisma_backend::domain::ReferenceId;
///
/// assert_eq!(ReferenceId::parse("5"), Some(ReferenceId::Numeric(5)));
/// assert_eq!(ReferenceId::parse("0"), None);
/// assert_eq!(ReferenceId::parse(" "), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ReferenceId {
    /// Integer primary key.
    Numeric(i64),
    /// Textual primary key such as a UUID or slug.
    Text(String),
}

impl ReferenceId {
    /// Parse a path segment, preferring the numeric representation.
    ///
    /// Returns `None` for values that would not count as set.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(number) => Self::Numeric(number).into_truthy(),
            Err(_) => Self::Text(trimmed.to_owned()).into_truthy(),
        }
    }

    /// Interpret an arbitrary JSON value, keeping only truthy references.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Self::Numeric)?.into_truthy(),
            Value::String(text) => Self::Text(text.clone()).into_truthy(),
            _ => None,
        }
    }

    /// Whether this reference counts as set.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Numeric(number) => *number != 0,
            Self::Text(text) => !text.trim().is_empty(),
        }
    }

    fn into_truthy(self) -> Option<Self> {
        self.is_truthy().then_some(self)
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Deserialise an optional reference, folding falsy values to `None`.
pub(crate) fn truthy_reference<'de, D>(deserializer: D) -> Result<Option<ReferenceId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(ReferenceId::from_json))
}

/// The two profile columns that decide where a user lands after sign-in.
///
/// ## Invariants
/// - A profile is complete iff both references are set.
///
/// # Examples
/// ```
/// use prisma_backend::domain::ProfileCompleteness;
/// use serde_json::json;
///
/// let row: ProfileCompleteness =
///     serde_json::from_value(json!({"university_id": 5, "career_id": 2})).unwrap();
/// assert!(row.is_complete());
///
/// let row: ProfileCompleteness =
///     serde_json::from_value(json!({"university_id": null, "career_id": 2})).unwrap();
/// assert!(!row.is_complete());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileCompleteness {
    /// University the student belongs to.
    #[serde(default, deserialize_with = "truthy_reference")]
    pub university_id: Option<ReferenceId>,
    /// Career the student is enrolled in.
    #[serde(default, deserialize_with = "truthy_reference")]
    pub career_id: Option<ReferenceId>,
}

impl ProfileCompleteness {
    /// True iff both the university and the career are set.
    pub fn is_complete(&self) -> bool {
        let set = |reference: &Option<ReferenceId>| {
            reference.as_ref().is_some_and(ReferenceId::is_truthy)
        };
        set(&self.university_id) && set(&self.career_id)
    }
}

/// Validation errors for the onboarding selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcademicSelectionError {
    /// No university was chosen.
    MissingUniversity,
    /// No career was chosen.
    MissingCareer,
}

impl fmt::Display for AcademicSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUniversity => write!(f, "university is required"),
            Self::MissingCareer => write!(f, "career is required"),
        }
    }
}

impl std::error::Error for AcademicSelectionError {}

/// University and career picked on the onboarding form.
///
/// ## Invariants
/// - Both references are truthy, so saving a selection always yields a
///   complete profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicSelection {
    university_id: ReferenceId,
    career_id: ReferenceId,
}

impl AcademicSelection {
    /// Validate the raw form values.
    pub fn try_new(
        university_id: Option<ReferenceId>,
        career_id: Option<ReferenceId>,
    ) -> Result<Self, AcademicSelectionError> {
        let university_id = university_id
            .filter(ReferenceId::is_truthy)
            .ok_or(AcademicSelectionError::MissingUniversity)?;
        let career_id = career_id
            .filter(ReferenceId::is_truthy)
            .ok_or(AcademicSelectionError::MissingCareer)?;
        Ok(Self {
            university_id,
            career_id,
        })
    }

    /// Selected university.
    pub fn university_id(&self) -> &ReferenceId {
        &self.university_id
    }

    /// Selected career.
    pub fn career_id(&self) -> &ReferenceId {
        &self.career_id
    }
}
