//! Service manifests.
//!
//! A manifest lists the artifacts a service depends on at a point in time.
//! Artifacts are kept in canonical order and may repeat; lookups are linear
//! scans over that order.

use std::slice;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artifact::Artifact;
use crate::error::{is_blank, ValidationError};

/// Artifacts used by a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ManifestBuilder")]
pub struct Manifest {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
    artifacts: Vec<Artifact>,
}

impl Manifest {
    pub fn builder() -> ManifestBuilder {
        ManifestBuilder::default()
    }

    /// Service identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Artifacts in canonical order.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }

    /// Check if an artifact with the same coordinates is listed.
    /// Descriptive fields are ignored.
    pub fn contains(&self, artifact: &Artifact) -> bool {
        self.iter().any(|candidate| candidate.coordinates() == artifact.coordinates())
    }

    /// Find an artifact by group and artifact identifier, regardless of
    /// version.
    ///
    /// Returns the first match in canonical order, which is the smallest
    /// version (compared as a string) when several are listed.
    pub fn find(&self, group_id: &str, artifact_id: &str) -> Option<&Artifact> {
        self.iter()
            .find(|artifact| artifact.group_id() == group_id && artifact.artifact_id() == artifact_id)
    }

    /// Compare this manifest against a freshly discovered artifact set.
    pub fn diff<'a, I>(&self, discovered: I) -> ManifestDiff
    where
        I: IntoIterator<Item = &'a Artifact>,
    {
        let discovered: Vec<&Artifact> = discovered.into_iter().collect();

        let mut added: Vec<Artifact> = discovered
            .iter()
            .filter(|artifact| !self.contains(artifact))
            .map(|artifact| (*artifact).clone())
            .collect();
        Artifact::sort_canonical(&mut added);

        let removed: Vec<Artifact> = self
            .iter()
            .filter(|artifact| {
                !discovered
                    .iter()
                    .any(|candidate| candidate.coordinates() == artifact.coordinates())
            })
            .cloned()
            .collect();

        tracing::debug!(
            manifest = %self.id,
            added = added.len(),
            removed = removed.len(),
            "computed manifest diff"
        );

        ManifestDiff { added, removed }
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a Artifact;
    type IntoIter = slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Difference between a manifest and a discovered artifact set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDiff {
    /// Discovered artifacts missing from the manifest.
    pub added: Vec<Artifact>,
    /// Manifest entries that were not discovered.
    pub removed: Vec<Artifact>,
}

impl ManifestDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Builder for [`Manifest`].
///
/// Also the deserialization form of a manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManifestBuilder {
    id: Option<String>,
    name: Option<String>,
    created_at: Option<DateTime<Utc>>,
    artifacts: Vec<Artifact>,
}

impl ManifestBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    pub fn artifacts<I>(mut self, artifacts: I) -> Self
    where
        I: IntoIterator<Item = Artifact>,
    {
        self.artifacts.extend(artifacts);
        self
    }

    /// Build the manifest. `created_at` defaults to now.
    pub fn build(self) -> Result<Manifest, ValidationError> {
        let id = self
            .id
            .filter(|id| !is_blank(id))
            .ok_or(ValidationError::BlankServiceId)?;
        let name = self
            .name
            .filter(|name| !is_blank(name))
            .ok_or(ValidationError::BlankServiceName)?;

        let mut artifacts = self.artifacts;
        Artifact::sort_canonical(&mut artifacts);

        Ok(Manifest {
            id,
            name,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            artifacts,
        })
    }
}

impl TryFrom<ManifestBuilder> for Manifest {
    type Error = ValidationError;

    fn try_from(builder: ManifestBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn artifact(artifact_id: &str, version: &str) -> Artifact {
        Artifact::of("com.konfigyr", artifact_id, version).unwrap()
    }

    fn manifest(artifacts: Vec<Artifact>) -> Manifest {
        Manifest::builder()
            .id("konfigyr-service")
            .name("Konfigyr example service")
            .artifacts(artifacts)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_sorts_artifacts() {
        let created_at = Utc::now() - Duration::seconds(6000);
        let manifest = Manifest::builder()
            .id("konfigyr-service")
            .name("Konfigyr example service")
            .artifacts([
                artifact("konfigyr-crypto-api", "1.0.0"),
                artifact("konfigyr-crypto-tink", "1.0.0"),
            ])
            .artifact(artifact("konfigyr-artifactory", "1.0.0"))
            .created_at(created_at)
            .build()
            .unwrap();

        assert_eq!(manifest.id(), "konfigyr-service");
        assert_eq!(manifest.name(), "Konfigyr example service");
        assert_eq!(manifest.created_at(), created_at);
        assert_eq!(
            manifest.artifacts(),
            [
                artifact("konfigyr-artifactory", "1.0.0"),
                artifact("konfigyr-crypto-api", "1.0.0"),
                artifact("konfigyr-crypto-tink", "1.0.0"),
            ]
        );
    }

    #[test]
    fn test_builder_validates_required_fields() {
        let builder = Manifest::builder();
        assert_eq!(builder.clone().build().unwrap_err(), ValidationError::BlankServiceId);

        let builder = builder.id("id");
        assert_eq!(builder.clone().build().unwrap_err(), ValidationError::BlankServiceName);

        let before = Utc::now();
        let manifest = builder.name("name").build().unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.created_at() >= before);
        assert!(manifest.created_at() - before < Duration::milliseconds(500));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let manifest = manifest(vec![
            artifact("konfigyr-artifactory", "1.0.0"),
            artifact("konfigyr-artifactory", "1.0.0"),
        ]);
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_contains_is_coordinate_exact() {
        let manifest = manifest(vec![artifact("konfigyr-crypto-api", "1.0.0")]);

        assert!(manifest.contains(&artifact("konfigyr-crypto-api", "1.0.0")));
        assert!(!manifest.contains(&artifact("konfigyr-crypto-api", "1.0.1")));
        assert!(!manifest.contains(&artifact("konfigyr-crypto-jdbc", "1.0.0")));
        assert!(!manifest.contains(&Artifact::of("com.other", "konfigyr-crypto-api", "1.0.0").unwrap()));
    }

    #[test]
    fn test_contains_ignores_descriptive_fields() {
        let manifest = manifest(vec![artifact("konfigyr-crypto-api", "1.0.0")]);
        let named = artifact("konfigyr-crypto-api", "1.0.0")
            .to_builder()
            .name("Crypto API")
            .build()
            .unwrap();

        assert!(manifest.contains(&named));
    }

    #[test]
    fn test_find_ignores_version() {
        let manifest = manifest(vec![artifact("konfigyr-crypto-api", "1.0.0")]);

        assert_eq!(
            manifest.find("com.konfigyr", "konfigyr-crypto-api"),
            Some(&artifact("konfigyr-crypto-api", "1.0.0"))
        );
        assert_eq!(manifest.find("com.konfigyr", "konfigyr-crypto-jdbc"), None);
        assert_eq!(manifest.find("com.other", "konfigyr-crypto-api"), None);
    }

    #[test]
    fn test_find_returns_smallest_version() {
        let manifest = manifest(vec![
            artifact("konfigyr-crypto-api", "2.0.0"),
            artifact("konfigyr-crypto-api", "1.0.0"),
            artifact("konfigyr-crypto-api", "1.1.0"),
        ]);

        assert_eq!(
            manifest.find("com.konfigyr", "konfigyr-crypto-api").map(Artifact::version),
            Some("1.0.0")
        );
    }

    #[test]
    fn test_diff() {
        let manifest = manifest(vec![
            artifact("konfigyr-artifactory", "1.0.0"),
            artifact("konfigyr-crypto-api", "1.0.0"),
        ]);
        let discovered = vec![
            artifact("konfigyr-crypto-api", "1.0.0"),
            artifact("konfigyr-artifactory", "1.1.0"),
        ];

        let diff = manifest.diff(&discovered);

        assert_eq!(diff.added, vec![artifact("konfigyr-artifactory", "1.1.0")]);
        assert_eq!(diff.removed, vec![artifact("konfigyr-artifactory", "1.0.0")]);
        assert!(!diff.is_empty());
        assert!(manifest.diff(manifest.artifacts()).is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let manifest = manifest(vec![artifact("konfigyr-artifactory", "1.0.0")]);

        let json = serde_json::to_string(&manifest).unwrap();
        let parsed: Manifest = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, manifest);
    }
}
