//! Built-in defaults
//!
//! Values used for every setting a configuration file leaves out.

use artifactory_wire::DEFAULT_MAX_PAYLOAD_BYTES;
use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Largest accepted property descriptor payload (default: 16 MiB)
    pub max_payload_bytes: usize,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}
