//! JSON wire codec for property descriptor sequences.
//!
//! The payload is a JSON array of descriptor objects. Absent optional
//! scalars are omitted, `hints` is always present, and decoding rejects any
//! key it does not know about.

use std::io::Read;

use crate::descriptor::{PropertyDescriptor, WireDescriptor};
use crate::error::CodecError;
use crate::DEFAULT_MAX_PAYLOAD_BYTES;

/// Limits applied when decoding a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecLimits {
    /// Largest accepted payload, in bytes.
    pub max_payload_bytes: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

/// Stateless encoder/decoder for property descriptor payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Serializer {
    limits: CodecLimits,
}

impl Serializer {
    /// Create a serializer with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: CodecLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    /// Encode descriptors in the order given.
    pub fn encode(&self, properties: &[PropertyDescriptor]) -> Result<Vec<u8>, CodecError> {
        let bytes =
            serde_json::to_vec(properties).map_err(|e| CodecError::Encode(e.to_string()))?;

        tracing::debug!(
            properties = properties.len(),
            bytes = bytes.len(),
            "encoded property descriptors"
        );
        Ok(bytes)
    }

    /// Decode a payload held in memory.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<PropertyDescriptor>, CodecError> {
        self.check_size(data.len())?;

        let wire: Vec<WireDescriptor> = serde_json::from_slice(data).map_err(|e| {
            tracing::debug!(error = %e, "rejected property descriptor payload");
            CodecError::from_decode(e)
        })?;

        Self::validate(wire)
    }

    /// Decode a payload from a reader.
    ///
    /// At most `max_payload_bytes + 1` bytes are read, so an oversized stream
    /// is rejected without being buffered in full.
    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Vec<PropertyDescriptor>, CodecError> {
        let limit = (self.limits.max_payload_bytes as u64).saturating_add(1);
        let mut data = Vec::new();
        reader.take(limit).read_to_end(&mut data)?;
        self.decode(&data)
    }

    fn check_size(&self, size: usize) -> Result<(), CodecError> {
        let max = self.limits.max_payload_bytes;
        if size > max {
            tracing::warn!(size, max, "property descriptor payload exceeds size limit");
            return Err(CodecError::PayloadTooLarge { size, max });
        }
        Ok(())
    }

    fn validate(wire: Vec<WireDescriptor>) -> Result<Vec<PropertyDescriptor>, CodecError> {
        let properties = wire
            .into_iter()
            .map(|descriptor| descriptor.into_builder().build())
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(properties = properties.len(), "decoded property descriptors");
        Ok(properties)
    }
}
