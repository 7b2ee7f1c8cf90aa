//! Artifactory Wire Types
//!
//! Defines the configuration property descriptor model and the JSON wire
//! format used by build plugins to upload property metadata.

pub mod descriptor;
pub mod error;
pub mod serializer;

pub use descriptor::{DataType, Deprecation, PropertyDescriptor, PropertyDescriptorBuilder, PropertyType};
pub use error::{CodecError, DescriptorError};
pub use serializer::{CodecLimits, Serializer};

/// Default maximum size of an encoded property descriptor payload (16 MiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 16 * 1024 * 1024;
