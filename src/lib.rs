//! Konfigyr Artifactory - building blocks of the configuration registry
//!
//! This crate defines the values exchanged between build plugins and the
//! Konfigyr Artifactory: artifacts, the configuration property metadata they
//! expose, releases produced from uploads, and service manifests. Every type
//! is an immutable, validated value created through a builder.

pub mod artifact;
pub mod checksum;
pub mod component;
pub mod config;
pub mod coordinates;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod release;

pub use artifact::{Artifact, ArtifactBuilder};
pub use component::Component;
pub use config::{ArtifactoryConfig, ConfigError};
pub use coordinates::Coordinates;
pub use error::{Error, IntegrityError, Result, ValidationError};
pub use manifest::{Manifest, ManifestBuilder, ManifestDiff};
pub use metadata::{ArtifactMetadata, ArtifactMetadataBuilder};
pub use release::{Release, ReleaseBuilder, ReleaseState};

pub use semver::Version;

pub use artifactory_wire::{
    CodecError, CodecLimits, DataType, Deprecation, DescriptorError, PropertyDescriptor,
    PropertyDescriptorBuilder, PropertyType, Serializer,
};
