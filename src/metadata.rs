//! Artifact metadata: the upload unit sent by build plugins.
//!
//! Carries the artifact identity together with the property descriptors
//! discovered in the build, sorted by name.

use std::io::Read;
use std::slice;

use artifactory_wire::{CodecError, PropertyDescriptor, Serializer};

use crate::artifact::{Artifact, ArtifactBuilder};
use crate::checksum;
use crate::coordinates::Coordinates;
use crate::error::{IntegrityError, Result, ValidationError};

/// Property metadata of one artifact version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMetadata {
    artifact: Artifact,
    checksum: Option<String>,
    properties: Vec<PropertyDescriptor>,
}

impl ArtifactMetadata {
    pub fn builder() -> ArtifactMetadataBuilder {
        ArtifactMetadataBuilder::default()
    }

    /// Create metadata from coordinates and descriptors.
    pub fn of<I>(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        descriptors: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = PropertyDescriptor>,
    {
        Self::builder()
            .group_id(group_id)
            .artifact_id(artifact_id)
            .version(version)
            .properties(descriptors)
            .build()
    }

    /// Decode an uploaded payload for `artifact` using the default codec.
    ///
    /// The checksum of the decoded properties is computed and stored on the
    /// returned metadata.
    pub fn from_slice(artifact: &Artifact, data: &[u8]) -> Result<Self> {
        Self::decode(&Serializer::new(), artifact, data)
    }

    /// Decode an uploaded payload stream for `artifact` using the default codec.
    pub fn from_reader<R: Read>(artifact: &Artifact, reader: R) -> Result<Self> {
        let properties = Serializer::new().decode_reader(reader)?;
        Self::from_decoded(artifact, properties)
    }

    /// Decode an uploaded payload for `artifact` with a configured codec.
    pub fn decode(serializer: &Serializer, artifact: &Artifact, data: &[u8]) -> Result<Self> {
        let properties = serializer.decode(data)?;
        Self::from_decoded(artifact, properties)
    }

    fn from_decoded(artifact: &Artifact, mut properties: Vec<PropertyDescriptor>) -> Result<Self> {
        PropertyDescriptor::sort_canonical(&mut properties);
        let checksum = checksum::compute(&properties)?;

        tracing::debug!(
            artifact = %artifact.coordinates(),
            properties = properties.len(),
            %checksum,
            "decoded artifact metadata"
        );

        let metadata = Self::builder()
            .artifact(artifact)
            .checksum(checksum)
            .properties(properties)
            .build()?;
        Ok(metadata)
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

    /// Base64 encoded SHA-256 checksum of the property set, if known.
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    /// Property descriptors sorted by name.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn iter(&self) -> slice::Iter<'_, PropertyDescriptor> {
        self.properties.iter()
    }

    /// Encode the property descriptors in canonical order.
    pub fn serialize(&self) -> Result<Vec<u8>, CodecError> {
        Serializer::new().encode(&self.properties)
    }

    /// Compute the checksum of the current property set.
    pub fn compute_checksum(&self) -> Result<String, CodecError> {
        checksum::compute(&self.properties)
    }

    /// Verify that the stored checksum matches the property set.
    pub fn verify_checksum(&self) -> Result<()> {
        let expected = self
            .checksum
            .as_deref()
            .ok_or_else(|| IntegrityError::MissingChecksum(self.coordinates().clone()))?;

        checksum::verify(self.coordinates(), expected, &self.properties)
    }
}

impl<'a> IntoIterator for &'a ArtifactMetadata {
    type Item = &'a PropertyDescriptor;
    type IntoIter = slice::Iter<'a, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for [`ArtifactMetadata`].
#[derive(Debug, Clone, Default)]
pub struct ArtifactMetadataBuilder {
    artifact: ArtifactBuilder,
    checksum: Option<String>,
    properties: Vec<PropertyDescriptor>,
}

impl ArtifactMetadataBuilder {
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

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.artifact = self.artifact.name(name);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.artifact = self.artifact.description(description);
        self
    }

    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.artifact = self.artifact.website(website);
        self
    }

    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.artifact = self.artifact.repository(repository);
        self
    }

    pub fn checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    pub fn property(mut self, descriptor: PropertyDescriptor) -> Self {
        self.properties.push(descriptor);
        self
    }

    pub fn properties<I>(mut self, descriptors: I) -> Self
    where
        I: IntoIterator<Item = PropertyDescriptor>,
    {
        self.properties.extend(descriptors);
        self
    }

    pub fn build(self) -> Result<ArtifactMetadata, ValidationError> {
        let artifact = self.artifact.build()?;

        let mut properties = self.properties;
        if properties.is_empty() {
            return Err(ValidationError::NoProperties);
        }
        PropertyDescriptor::sort_canonical(&mut properties);

        Ok(ArtifactMetadata {
            artifact,
            checksum: self.checksum,
            properties,
        })
    }
}
