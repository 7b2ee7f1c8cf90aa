//! Artifact identity and descriptive metadata.

use std::cmp::Ordering;

use artifactory_wire::PropertyDescriptor;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::coordinates::{self, Coordinates};
use crate::error::ValidationError;
use crate::metadata::ArtifactMetadata;

/// A software component identified by its Maven coordinates.
///
/// Equality covers every field. Sorting uses [`Artifact::canonical_cmp`],
/// which only looks at the coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ArtifactBuilder")]
pub struct Artifact {
    #[serde(flatten)]
    coordinates: Coordinates,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<String>,
}

impl Artifact {
    /// Create an artifact from its coordinates only.
    pub fn of(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::builder()
            .group_id(group_id)
            .artifact_id(artifact_id)
            .version(version)
            .build()
    }

    pub fn builder() -> ArtifactBuilder {
        ArtifactBuilder::default()
    }

    /// Create a builder pre-populated with every field of this artifact.
    pub fn to_builder(&self) -> ArtifactBuilder {
        ArtifactBuilder {
            group_id: Some(self.coordinates.group_id().to_string()),
            artifact_id: Some(self.coordinates.artifact_id().to_string()),
            version: Some(self.coordinates.version().to_string()),
            name: self.name.clone(),
            description: self.description.clone(),
            website: self.website.clone(),
            repository: self.repository.clone(),
        }
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn group_id(&self) -> &str {
        self.coordinates.group_id()
    }

    pub fn artifact_id(&self) -> &str {
        self.coordinates.artifact_id()
    }

    pub fn version(&self) -> &str {
        self.coordinates.version()
    }

    /// Human-readable name of the artifact.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Documentation or home page, exactly as it was set.
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    /// Source control repository, exactly as it was set.
    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    /// Canonical ordering by coordinates.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.coordinates.cmp(&other.coordinates)
    }

    /// Sort artifacts into canonical order.
    pub fn sort_canonical(artifacts: &mut [Artifact]) {
        artifacts.sort_by(Self::canonical_cmp);
    }

    /// Create artifact metadata for this artifact with the given property
    /// descriptors.
    pub fn to_metadata<I>(&self, descriptors: I) -> Result<ArtifactMetadata, ValidationError>
    where
        I: IntoIterator<Item = PropertyDescriptor>,
    {
        ArtifactMetadata::builder()
            .artifact(self)
            .properties(descriptors)
            .build()
    }
}

/// Builder for [`Artifact`].
///
/// Also used as the deserialization form of an artifact so that stored
/// values go through the same validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtifactBuilder {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    name: Option<String>,
    description: Option<String>,
    website: Option<String>,
    repository: Option<String>,
}

impl ArtifactBuilder {
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the website.
    ///
    /// The value must be an absolute URI. It is checked on build and kept
    /// verbatim, without normalization.
    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Set the source repository. Same rules as [`ArtifactBuilder::website`].
    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    pub fn build(self) -> Result<Artifact, ValidationError> {
        let coordinates = coordinates::validate(self.group_id, self.artifact_id, self.version)?;

        Ok(Artifact {
            coordinates,
            name: self.name,
            description: self.description,
            website: check_uri("website", self.website)?,
            repository: check_uri("repository", self.repository)?,
        })
    }
}

impl TryFrom<ArtifactBuilder> for Artifact {
    type Error = ValidationError;

    fn try_from(builder: ArtifactBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

fn check_uri(field: &'static str, value: Option<String>) -> Result<Option<String>, ValidationError> {
    if let Some(uri) = &value {
        Url::parse(uri).map_err(|e| ValidationError::InvalidUri {
            field,
            reason: e.to_string(),
        })?;
    }
    Ok(value)
}
