//! Component uploads.
//!
//! A [`Component`] is the package a build plugin uploads to draft a new
//! release: a semantic version, a flag telling the registry whether the
//! release should become the latest one, and the property descriptors used by
//! that version.

use std::io::Read;
use std::slice;

use artifactory_wire::{CodecError, PropertyDescriptor, Serializer};
use semver::Version;

use crate::artifact::Artifact;
use crate::checksum;
use crate::error::{Result, ValidationError};
use crate::metadata::ArtifactMetadata;

/// Property descriptors of one artifact version, as uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    version: Version,
    latest: bool,
    properties: Vec<PropertyDescriptor>,
}

impl Component {
    /// Create a component. Properties are sorted by name.
    pub fn new(version: Version, latest: bool, mut properties: Vec<PropertyDescriptor>) -> Self {
        PropertyDescriptor::sort_canonical(&mut properties);
        Self {
            version,
            latest,
            properties,
        }
    }

    /// Create a component from serialized property descriptors.
    pub fn from_slice(version: Version, latest: bool, data: &[u8]) -> Result<Self, CodecError> {
        Self::decode(&Serializer::new(), version, latest, data)
    }

    /// Create a component from a stream of serialized property descriptors.
    pub fn from_reader<R: Read>(version: Version, latest: bool, reader: R) -> Result<Self, CodecError> {
        let properties = Serializer::new().decode_reader(reader)?;
        Ok(Self::new(version, latest, properties))
    }

    /// Create a component from serialized property descriptors with a
    /// configured codec.
    pub fn decode(
        serializer: &Serializer,
        version: Version,
        latest: bool,
        data: &[u8],
    ) -> Result<Self, CodecError> {
        let properties = serializer.decode(data)?;
        Ok(Self::new(version, latest, properties))
    }

    /// Parse a semantic version string.
    pub fn parse_version(version: &str) -> Result<Version, ValidationError> {
        Version::parse(version.trim()).map_err(|e| ValidationError::InvalidSemver {
            version: version.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Whether the drafted release should be marked as the latest one.
    pub fn latest(&self) -> bool {
        self.latest
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn iter(&self) -> slice::Iter<'_, PropertyDescriptor> {
        self.properties.iter()
    }

    /// Serialize the property descriptors for upload.
    pub fn serialize(&self) -> Result<Vec<u8>, CodecError> {
        Serializer::new().encode(&self.properties)
    }

    pub fn checksum(&self) -> Result<String, CodecError> {
        checksum::compute(&self.properties)
    }

    /// Bind this component to `artifact`, producing checksummed metadata.
    ///
    /// The artifact version must be the component version.
    pub fn into_metadata(self, artifact: &Artifact) -> Result<ArtifactMetadata> {
        let version = self.version.to_string();
        if artifact.version() != version {
            return Err(ValidationError::VersionMismatch {
                component: version,
                artifact: artifact.version().to_string(),
            }
            .into());
        }

        let checksum = self.checksum()?;
        let metadata = ArtifactMetadata::builder()
            .artifact(artifact)
            .checksum(checksum)
            .properties(self.properties)
            .build()?;
        Ok(metadata)
    }
}

impl<'a> IntoIterator for &'a Component {
    type Item = &'a PropertyDescriptor;
    type IntoIter = slice::Iter<'a, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
