//! Configuration property descriptor types.
//!
//! A [`PropertyDescriptor`] describes a single configuration property exposed
//! by an artifact. Descriptors are immutable once built; use
//! [`PropertyDescriptor::builder`] to create them.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;

/// Semantic type of a configuration property value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    #[default]
    String,
    Number,
    Boolean,
    Duration,
    TimeZone,
    Date,
    DateTime,
    Uri,
    InternetAddress,
    DataSize,
    MimeType,
    Charset,
    Locale,
}

/// Shape of a configuration property value, independent of its [`PropertyType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// A single value.
    #[default]
    Atomic,
    /// A list, set or array of values.
    Collection,
    /// A map or a nested object.
    Composite,
}

/// Deprecation details attached to a property descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deprecation {
    /// Why the property was deprecated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Name of the property that should be used instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

impl Deprecation {
    /// Create a deprecation with a reason and no replacement.
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            replacement: None,
        }
    }

    /// Create a deprecation pointing to a replacement property.
    pub fn replaced_by(reason: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            replacement: Some(replacement.into()),
        }
    }
}

/// Metadata of a single configuration property.
///
/// Field order matches the wire layout; absent optional scalars are omitted
/// while `hints` is always written. The value schema is an in-memory detail
/// and never travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireDescriptor")]
pub struct PropertyDescriptor {
    name: String,

    #[serde(rename = "type")]
    property_type: PropertyType,

    data_type: DataType,

    #[serde(skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,

    #[serde(skip)]
    schema: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,

    hints: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    deprecation: Option<Deprecation>,
}

impl PropertyDescriptor {
    /// Start building a new descriptor.
    pub fn builder() -> PropertyDescriptorBuilder {
        PropertyDescriptorBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Name of the type in the source language, e.g. `java.lang.String`.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// JSON schema describing the property value. Not part of the encoded
    /// form, so decoded descriptors never carry one.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Suggested values, in insertion order.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn deprecation(&self) -> Option<&Deprecation> {
        self.deprecation.as_ref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }

    /// Canonical ordering of descriptors, by name only.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// Sort descriptors into canonical order. The sort is stable, so
    /// descriptors sharing a name keep their relative order.
    pub fn sort_canonical(descriptors: &mut [PropertyDescriptor]) {
        descriptors.sort_by(Self::canonical_cmp);
    }
}

/// Builder for [`PropertyDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct PropertyDescriptorBuilder {
    name: Option<String>,
    property_type: PropertyType,
    data_type: DataType,
    type_name: Option<String>,
    schema: Option<String>,
    description: Option<String>,
    default_value: Option<String>,
    hints: Vec<String>,
    deprecation: Option<Deprecation>,
}

impl PropertyDescriptorBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = property_type;
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Add a suggested value. Blank hints are ignored.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        if !is_blank(&hint) {
            self.hints.push(hint);
        }
        self
    }

    /// Add several suggested values, skipping blank ones.
    pub fn hints<I, S>(self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        hints.into_iter().fold(self, |builder, hint| builder.hint(hint))
    }

    pub fn deprecation(mut self, deprecation: Deprecation) -> Self {
        self.deprecation = Some(deprecation);
        self
    }

    /// Build the descriptor, requiring only a non-blank name.
    pub fn build(self) -> Result<PropertyDescriptor, DescriptorError> {
        let name = match self.name {
            Some(name) if !is_blank(&name) => name,
            _ => return Err(DescriptorError::BlankName),
        };

        Ok(PropertyDescriptor {
            name,
            property_type: self.property_type,
            data_type: self.data_type,
            type_name: self.type_name,
            schema: self.schema,
            description: self.description,
            default_value: self.default_value,
            hints: self.hints,
            deprecation: self.deprecation,
        })
    }

    /// Build the descriptor, additionally requiring a value schema and a
    /// type name.
    pub fn build_strict(self) -> Result<PropertyDescriptor, DescriptorError> {
        if self.name.as_deref().map_or(true, is_blank) {
            return Err(DescriptorError::BlankName);
        }
        if self.schema.as_deref().map_or(true, is_blank) {
            return Err(DescriptorError::BlankSchema);
        }
        if self.type_name.as_deref().map_or(true, is_blank) {
            return Err(DescriptorError::BlankTypeName);
        }
        self.build()
    }
}

/// Descriptor object as it appears on the wire.
///
/// Decoding goes through this type so that unknown keys are rejected and the
/// result passes through the same validation as [`PropertyDescriptorBuilder`].
#[doc(hidden)]
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireDescriptor {
    name: Option<String>,
    #[serde(rename = "type", default)]
    property_type: PropertyType,
    #[serde(default)]
    data_type: DataType,
    #[serde(default)]
    type_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    default_value: Option<String>,
    #[serde(default)]
    hints: Vec<String>,
    #[serde(default)]
    deprecation: Option<Deprecation>,
}

impl WireDescriptor {
    pub(crate) fn into_builder(self) -> PropertyDescriptorBuilder {
        PropertyDescriptorBuilder {
            name: self.name,
            property_type: self.property_type,
            data_type: self.data_type,
            type_name: self.type_name,
            schema: None,
            description: self.description,
            default_value: self.default_value,
            hints: Vec::new(),
            deprecation: self.deprecation,
        }
        .hints(self.hints)
    }
}

impl TryFrom<WireDescriptor> for PropertyDescriptor {
    type Error = DescriptorError;

    fn try_from(wire: WireDescriptor) -> Result<Self, Self::Error> {
        wire.into_builder().build()
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
