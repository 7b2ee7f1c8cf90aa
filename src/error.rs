//! Error types for the artifactory model.

use artifactory_wire::{CodecError, DescriptorError};

use crate::config::ConfigError;
use crate::coordinates::Coordinates;

/// Validation failures raised by the entity builders.
///
/// Each variant carries the field-specific message reported to the caller;
/// the first failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("groupId can not be blank")]
    BlankGroupId,

    #[error("artifactId can not be blank")]
    BlankArtifactId,

    #[error("version can not be blank")]
    BlankVersion,

    #[error("{field} is not a valid URI: {reason}")]
    InvalidUri { field: &'static str, reason: String },

    #[error("Artifact metadata must contain at least one property descriptor")]
    NoProperties,

    #[error("checksum can not be blank")]
    BlankChecksum,

    #[error("release date can not be null")]
    MissingReleaseDate,

    #[error("Service identifier can not be blank")]
    BlankServiceId,

    #[error("Service name can not be blank")]
    BlankServiceName,

    #[error("version '{version}' is not a valid semantic version: {reason}")]
    InvalidSemver { version: String, reason: String },

    #[error("component version {component} does not match artifact version {artifact}")]
    VersionMismatch { component: String, artifact: String },

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

/// Integrity check failures between a release and the metadata it claims to
/// describe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    #[error("release {release} does not belong to artifact {metadata}")]
    CoordinateMismatch {
        release: Coordinates,
        metadata: Coordinates,
    },

    #[error("checksum mismatch for {coordinates}: expected {expected}, computed {actual}")]
    ChecksumMismatch {
        coordinates: Coordinates,
        expected: String,
        actual: String,
    },

    #[error("artifact metadata {0} has no checksum")]
    MissingChecksum(Coordinates),
}

/// Umbrella error for every fallible operation in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<DescriptorError> for Error {
    fn from(err: DescriptorError) -> Self {
        Self::Validation(ValidationError::Descriptor(err))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::BlankGroupId.to_string(), "groupId can not be blank");
        assert_eq!(ValidationError::BlankArtifactId.to_string(), "artifactId can not be blank");
        assert_eq!(ValidationError::BlankVersion.to_string(), "version can not be blank");
        assert_eq!(ValidationError::BlankChecksum.to_string(), "checksum can not be blank");
        assert_eq!(
            ValidationError::MissingReleaseDate.to_string(),
            "release date can not be null"
        );
        assert!(ValidationError::NoProperties
            .to_string()
            .ends_with("must contain at least one property descriptor"));
    }

    #[test]
    fn test_descriptor_error_converts_to_validation() {
        let err: Error = DescriptorError::BlankName.into();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::Descriptor(DescriptorError::BlankName))
        ));
        assert_eq!(err.to_string(), "Property name can not be blank");
    }
}
