//! Maven-style artifact coordinates.

use std::fmt;

use serde::Serialize;

use crate::error::{is_blank, ValidationError};

/// The `(group_id, artifact_id, version)` triple identifying an artifact.
///
/// Ordering is lexicographic by group, artifact and then version. Versions
/// compare as plain strings, so `1.10.0` sorts before `1.9.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Coordinates {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl Coordinates {
    /// Validate and create coordinates. Checks run in field order and the
    /// first failure is returned.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        validate(Some(group_id.into()), Some(artifact_id.into()), Some(version.into()))
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Check whether both coordinates point at the same artifact,
    /// ignoring the version.
    pub fn same_artifact(&self, other: &Coordinates) -> bool {
        self.group_id == other.group_id && self.artifact_id == other.artifact_id
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Coordinate validation shared by every builder that carries an artifact
/// identity.
pub(crate) fn validate(
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
) -> Result<Coordinates, ValidationError> {
    let group_id = non_blank(group_id).ok_or(ValidationError::BlankGroupId)?;
    let artifact_id = non_blank(artifact_id).ok_or(ValidationError::BlankArtifactId)?;
    let version = non_blank(version).ok_or(ValidationError::BlankVersion)?;

    Ok(Coordinates {
        group_id,
        artifact_id,
        version,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_blank(v))
}
