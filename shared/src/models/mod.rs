//! Data models
//!
//! Records exchanged with the staff API. All records are flat camelCase JSON
//! objects whose only required field is the server-assigned numeric `id`.
//! Foreign keys (e.g. `departmentId`) are plain numbers resolved server-side.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Declares a field-name enum whose variants serialize to the exact names the
/// server expects (search `condition` values, sort columns).
macro_rules! wire_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::ParseFieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::models::ParseFieldError {
                    field: s.to_string(),
                    expected: $name::ALL.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", "),
                })
            }
        }
    };
}

pub mod department;
pub mod employee;
pub mod medical_staff;
pub mod position;

// Re-exports
pub use department::*;
pub use employee::*;
pub use medical_staff::*;
pub use position::*;

/// A record type served by one REST resource of the staff API.
pub trait Entity:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Payload accepted by create/update (the record minus server-owned fields)
    type Input: Clone + Debug + Serialize + Send + Sync + 'static;
    /// Field names accepted by the search endpoint
    type SearchField: Copy + Debug + Serialize + Send + Sync + 'static;

    /// Path segment of the resource, e.g. `employees`
    const RESOURCE: &'static str;
    /// Name of the JSON part in a multipart create; `None` for JSON-only resources
    const MULTIPART_PART: Option<&'static str> = None;
    /// Whether the resource exposes `GET {base}/search`
    const SEARCHABLE: bool = false;
    /// Reload the whole list after a successful create, for resources whose
    /// create response lacks fields the server only fills in on list reads
    const REFETCH_AFTER_CREATE: bool = false;

    fn id(&self) -> i64;
}

/// Entities that carry an uploadable profile image.
pub trait ProfileImage: Entity {
    fn profile_image_url(&self) -> Option<&str>;
}

/// Search field type for resources without a search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unsearchable {}

impl std::str::FromStr for Unsearchable {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Err(ParseFieldError {
            field: s.to_string(),
            expected: "nothing, this resource has no search endpoint".to_string(),
        })
    }
}

/// Server-side filter: `?condition=<field>&value=<value>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCondition<F> {
    pub condition: F,
    pub value: String,
}

impl<F> SearchCondition<F> {
    pub fn new(condition: F, value: impl Into<String>) -> Self {
        Self {
            condition,
            value: value.into(),
        }
    }
}

/// Comparable value extracted from a record for client-side sorting.
///
/// Variant order matters: missing values sort before everything else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Missing,
    Number(i64),
    Text(String),
}

impl SortKey {
    /// Empty strings compare equal to missing values.
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) if !s.is_empty() => SortKey::Text(s.to_string()),
            _ => SortKey::Missing,
        }
    }

    pub fn number(value: Option<i64>) -> Self {
        value.map_or(SortKey::Missing, SortKey::Number)
    }
}

/// Records that can be ordered by a column in a list view.
pub trait Sortable: Entity {
    type SortField: Copy + Debug + PartialEq + Send + Sync + 'static;

    fn sort_key(&self, field: Self::SortField) -> SortKey;
}

/// Unknown field name given where a field enum was expected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field `{field}` (expected one of: {expected})")]
pub struct ParseFieldError {
    pub field: String,
    pub expected: String,
}
