//! Releases: the registry's record of processing a component upload.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, ArtifactBuilder};
use crate::checksum;
use crate::coordinates::Coordinates;
use crate::error::{is_blank, IntegrityError, Result, ValidationError};
use crate::metadata::ArtifactMetadata;

/// Processing state of a release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseState {
    /// Accepted for processing; not yet the current property set.
    #[default]
    Pending,
    /// Fully processed and authoritative.
    Released,
    /// Processing rejected the upload; see the release errors.
    Failed,
}

impl ReleaseState {
    /// Check if processing has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released | Self::Failed)
    }

    /// Check if clients may treat the release as the current property set.
    pub fn is_authoritative(&self) -> bool {
        matches!(self, Self::Released)
    }
}

impl fmt::Display for ReleaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Released => write!(f, "RELEASED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Outcome of processing an artifact metadata upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReleaseBuilder")]
pub struct Release {
    #[serde(flatten)]
    artifact: Artifact,
    state: ReleaseState,
    errors: Vec<String>,
    checksum: String,
    release_date: DateTime<Utc>,
}

impl Release {
    pub fn builder() -> ReleaseBuilder {
        ReleaseBuilder::default()
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn coordinates(&self) -> &Coordinates {
        self.artifact.coordinates()
    }

    pub fn group_id(&self) -> &str {
        self.artifact.group_id()
    }

    pub fn artifact_id(&self) -> &str {
        self.artifact.artifact_id()
    }

    pub fn version(&self) -> &str {
        self.artifact.version()
    }

    pub fn state(&self) -> ReleaseState {
        self.state
    }

    /// Processing errors, in the order they were reported.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Checksum of the artifact metadata this release was produced from.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// When processing completed.
    pub fn release_date(&self) -> DateTime<Utc> {
        self.release_date
    }

    /// Canonical ordering by coordinates.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.artifact.canonical_cmp(&other.artifact)
    }

    /// Verify that `metadata` is the property set this release was produced
    /// from: same coordinates, and a checksum recomputed from its properties
    /// that equals the release checksum.
    pub fn verify(&self, metadata: &ArtifactMetadata) -> Result<()> {
        if self.coordinates() != metadata.coordinates() {
            return Err(IntegrityError::CoordinateMismatch {
                release: self.coordinates().clone(),
                metadata: metadata.coordinates().clone(),
            }
            .into());
        }

        checksum::verify(self.coordinates(), &self.checksum, metadata.properties())?;
        tracing::trace!(release = %self.coordinates(), "release checksum verified");
        Ok(())
    }
}

/// Builder for [`Release`].
///
/// Also the deserialization form of a release.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReleaseBuilder {
    #[serde(flatten)]
    artifact: ArtifactBuilder,
    state: Option<ReleaseState>,
    errors: Vec<String>,
    checksum: Option<String>,
    release_date: Option<DateTime<Utc>>,
}

impl ReleaseBuilder {
    /// Copy the coordinates and descriptive fields of `artifact`.
    pub fn artifact(mut self, artifact: &Artifact) -> Self {
        self.artifact = artifact.to_builder();
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.artifact = self.artifact.group_id(group_id);
        self
    }

    pub fn artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact = self.artifact.artifact_id(artifact_id);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.artifact = self.artifact.version(version);
        self
    }

    pub fn state(mut self, state: ReleaseState) -> Self {
        self.state = Some(state);
        self
    }

    /// Add a processing error. Blank messages are ignored.
    pub fn error(mut self, error: impl Into<String>) -> Self {
        let error = error.into();
        if !is_blank(&error) {
            self.errors.push(error);
        }
        self
    }

    pub fn errors<I, S>(self, errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        errors.into_iter().fold(self, |builder, error| builder.error(error))
    }

    pub fn checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    pub fn release_date(mut self, release_date: DateTime<Utc>) -> Self {
        self.release_date = Some(release_date);
        self
    }

    pub fn build(self) -> Result<Release, ValidationError> {
        let artifact = self.artifact.build()?;
        let state = self.state.unwrap_or_default();

        let checksum = self
            .checksum
            .filter(|c| !is_blank(c))
            .ok_or(ValidationError::BlankChecksum)?;
        let release_date = self.release_date.ok_or(ValidationError::MissingReleaseDate)?;

        let mut errors = self.errors;
        errors.retain(|e| !is_blank(e));

        if state == ReleaseState::Failed && errors.is_empty() {
            tracing::debug!(release = %artifact.coordinates(), "failed release carries no errors");
        }

        Ok(Release {
            artifact,
            state,
            errors,
            checksum,
            release_date,
        })
    }
}

impl TryFrom<ReleaseBuilder> for Release {
    type Error = ValidationError;

    fn try_from(builder: ReleaseBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
