use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::StudentId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown area {0:?}, expected Urban or Rural")]
pub struct ParseAreaError(String);

/// Where a registered student lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Urban,
    Rural,
}

impl Area {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::Rural => "Rural",
        }
    }

    /// Parses the storage representation produced by [`Area::as_str`].
    ///
    /// # Errors
    ///
    /// Returns `ParseAreaError` for any other string.
    pub fn parse(s: &str) -> Result<Self, ParseAreaError> {
        match s {
            "Urban" => Ok(Self::Urban),
            "Rural" => Ok(Self::Rural),
            other => Err(ParseAreaError(other.to_string())),
        }
    }
}

/// Registered student, as created by the registration flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    pub id: StudentId,
    pub name: Option<String>,
    pub area: Area,
    pub created_at: DateTime<Utc>,
}
