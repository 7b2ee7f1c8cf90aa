//! Upload Lifecycle Tests
//!
//! Walks a property set from the build plugin to the registry: descriptors are
//! serialized into a component, decoded into checksummed artifact metadata,
//! recorded as a release and checked against manifests.

use chrono::Utc;
use konfigyr_artifactory::{
    Artifact, ArtifactMetadata, ArtifactoryConfig, CodecError, Component, DataType, Deprecation,
    Error, IntegrityError, Manifest, PropertyDescriptor, PropertyType, Release, ReleaseState,
    Version,
};
use serde_json::Value;

fn artifact() -> Artifact {
    Artifact::builder()
        .group_id("com.konfigyr")
        .artifact_id("konfigyr-artifactory")
        .version("1.2.0")
        .name("Konfigyr Artifactory")
        .website("https://konfigyr.com")
        .build()
        .unwrap()
}

fn discovered_properties() -> Vec<PropertyDescriptor> {
    vec![
        PropertyDescriptor::builder()
            .name("konfigyr.artifactory.url")
            .property_type(PropertyType::Uri)
            .type_name("java.net.URI")
            .default_value("https://api.konfigyr.com")
            .build()
            .unwrap(),
        PropertyDescriptor::builder()
            .name("konfigyr.artifactory.enabled")
            .property_type(PropertyType::Boolean)
            .type_name("java.lang.Boolean")
            .hints(["true", "false"])
            .build()
            .unwrap(),
        PropertyDescriptor::builder()
            .name("konfigyr.artifactory.timeout")
            .property_type(PropertyType::Duration)
            .data_type(DataType::Atomic)
            .deprecation(Deprecation::replaced_by(
                "Use the connect timeout",
                "konfigyr.artifactory.connect-timeout",
            ))
            .build()
            .unwrap(),
    ]
}

// =============================================================================
// Plugin -> registry
// =============================================================================

#[test]
fn test_uploaded_component_decodes_into_checksummed_metadata() {
    let component = Component::new(Version::new(1, 2, 0), true, discovered_properties());
    let payload = component.serialize().unwrap();

    let metadata = ArtifactMetadata::from_slice(&artifact(), &payload).unwrap();

    assert_eq!(metadata.artifact(), &artifact());
    assert_eq!(metadata.properties(), component.properties());
    assert_eq!(metadata.checksum(), Some(component.checksum().unwrap().as_str()));
    metadata.verify_checksum().unwrap();
}

#[test]
fn test_payload_is_a_json_array_in_canonical_order() {
    let component = Component::new(Version::new(1, 2, 0), false, discovered_properties());
    let payload: Value = serde_json::from_slice(&component.serialize().unwrap()).unwrap();

    let names: Vec<&str> = payload
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "konfigyr.artifactory.enabled",
            "konfigyr.artifactory.timeout",
            "konfigyr.artifactory.url"
        ]
    );

    let timeout = &payload[1];
    assert_eq!(timeout["type"], "DURATION");
    assert_eq!(timeout["hints"], Value::Array(vec![]));
    assert!(timeout.get("description").is_none());
    assert_eq!(
        timeout["deprecation"]["replacement"],
        "konfigyr.artifactory.connect-timeout"
    );
}

#[test]
fn test_unknown_descriptor_field_rejects_upload() {
    let payload = br#"[{"name":"konfigyr.artifactory.url","secret":true,"hints":[]}]"#;

    let err = ArtifactMetadata::from_slice(&artifact(), payload).unwrap_err();
    assert!(matches!(err, Error::Codec(CodecError::Invalid(_))));
}

#[test]
fn test_configured_codec_enforces_limits() {
    let config = ArtifactoryConfig::from_toml_str("[codec]\nmax_payload_bytes = 16\n").unwrap();
    let payload = Component::new(Version::new(1, 2, 0), false, discovered_properties())
        .serialize()
        .unwrap();

    let err = ArtifactMetadata::decode(&config.serializer(), &artifact(), &payload).unwrap_err();
    assert!(matches!(err, Error::Codec(CodecError::PayloadTooLarge { max: 16, .. })));
}

// =============================================================================
// Registry -> release
// =============================================================================

#[test]
fn test_release_records_processing_outcome() {
    let metadata = Component::new(Version::new(1, 2, 0), true, discovered_properties())
        .into_metadata(&artifact())
        .unwrap();

    let release = Release::builder()
        .artifact(metadata.artifact())
        .state(ReleaseState::Released)
        .checksum(metadata.checksum().unwrap())
        .release_date(Utc::now())
        .build()
        .unwrap();

    assert!(release.state().is_authoritative());
    release.verify(&metadata).unwrap();
}

#[test]
fn test_failed_release_is_data_not_error() {
    let release = Release::builder()
        .artifact(&artifact())
        .state(ReleaseState::Failed)
        .checksum("checksum")
        .error("Property 'konfigyr.artifactory.url' has an invalid default value")
        .release_date(Utc::now())
        .build()
        .unwrap();

    assert_eq!(release.state(), ReleaseState::Failed);
    assert_eq!(release.errors().len(), 1);
}

#[test]
fn test_release_detects_partial_write() {
    let metadata = Component::new(Version::new(1, 2, 0), true, discovered_properties())
        .into_metadata(&artifact())
        .unwrap();
    let release = Release::builder()
        .artifact(&artifact())
        .checksum(metadata.checksum().unwrap())
        .release_date(Utc::now())
        .build()
        .unwrap();

    let mut persisted = discovered_properties();
    persisted.pop();
    let stored = artifact().to_metadata(persisted).unwrap();

    assert!(matches!(
        release.verify(&stored),
        Err(Error::Integrity(IntegrityError::ChecksumMismatch { .. }))
    ));
}

// =============================================================================
// Manifests
// =============================================================================

#[test]
fn test_manifest_diff_selects_artifacts_to_upload() {
    let manifest = Manifest::builder()
        .id("konfigyr-service")
        .name("Konfigyr example service")
        .artifact(Artifact::of("com.konfigyr", "konfigyr-artifactory", "1.1.0").unwrap())
        .artifact(Artifact::of("com.konfigyr", "konfigyr-crypto-api", "1.0.0").unwrap())
        .build()
        .unwrap();

    let discovered = vec![
        artifact(),
        Artifact::of("com.konfigyr", "konfigyr-crypto-api", "1.0.0").unwrap(),
    ];

    let diff = manifest.diff(&discovered);

    assert_eq!(diff.added, vec![artifact()]);
    assert_eq!(diff.removed.len(), 1);
    assert_eq!(diff.removed[0].version(), "1.1.0");
    assert_eq!(
        manifest
            .find("com.konfigyr", "konfigyr-artifactory")
            .map(Artifact::version),
        Some("1.1.0")
    );
}
