//! Config struct definition and default implementation.

use super::types::{DecomposeConfig, SolveConfig};
use crate::agent::GeneratorProfile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for planloop.
///
/// This struct represents the contents of `planloop.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text generator backend.
    pub generator: GeneratorProfile,

    /// Decomposition stage settings.
    pub decompose: DecomposeConfig,

    /// Solve stage settings.
    pub solve: SolveConfig,

    /// NDJSON event journal path. Journaling is off when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_path: Option<PathBuf>,
}
