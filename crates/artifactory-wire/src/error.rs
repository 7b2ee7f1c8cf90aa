//! Error types for property descriptors and the wire codec.

use std::io;

/// Validation failures raised while building a [`PropertyDescriptor`].
///
/// [`PropertyDescriptor`]: crate::PropertyDescriptor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("Property name can not be blank")]
    BlankName,

    #[error("Property value schema can not be blank")]
    BlankSchema,

    #[error("Property type name can not be blank")]
    BlankTypeName,
}

/// Errors produced while encoding or decoding a property descriptor payload.
///
/// `Malformed` and `Invalid` only carry the rendered parser message, the
/// underlying parser error is not exposed as a source.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload is not syntactically valid JSON.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// The payload is valid JSON but does not match the descriptor schema,
    /// e.g. it contains an unknown field or an unknown enum constant.
    #[error("invalid property descriptor payload: {0}")]
    Invalid(String),

    /// A decoded descriptor failed validation.
    #[error("invalid property descriptor: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("payload size {size} exceeds maximum {max}")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode property descriptors: {0}")]
    Encode(String),
}

impl CodecError {
    /// Classify a decoding error reported by `serde_json`.
    pub(crate) fn from_decode(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Syntax | Category::Eof => Self::Malformed(err.to_string()),
            Category::Data => Self::Invalid(err.to_string()),
            Category::Io => Self::Io(io::Error::from(err)),
        }
    }

    /// Check if this error denotes input that could not be understood.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::Invalid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_syntax_error_is_malformed_without_source() {
        let err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = CodecError::from_decode(err);

        assert!(matches!(err, CodecError::Malformed(_)));
        assert!(err.is_malformed_input());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_truncated_input_is_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("[{\"name\":").unwrap_err();
        assert!(matches!(CodecError::from_decode(err), CodecError::Malformed(_)));
    }

    #[test]
    fn test_descriptor_error_messages() {
        assert_eq!(DescriptorError::BlankName.to_string(), "Property name can not be blank");
        assert_eq!(
            DescriptorError::BlankSchema.to_string(),
            "Property value schema can not be blank"
        );
        assert_eq!(
            DescriptorError::BlankTypeName.to_string(),
            "Property type name can not be blank"
        );
    }
}
