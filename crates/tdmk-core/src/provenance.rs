//! Provenance and schema descriptors attached to constructed landscapes.

use serde::{Deserialize, Serialize};

use crate::params::{CodomainFamily, Parameters};

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Construction provenance embedded in every landscape.
///
/// A landscape is a pure function of this record (plus externally supplied
/// tables when the family is [`CodomainFamily::Unknown`]), so storing it is
/// enough to reproduce the instance byte for byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionProvenance {
    /// Master seed the construction call was given; `None` when the caller
    /// threaded its own stream or supplied the tables directly.
    pub seed: Option<u64>,
    /// Input parameters `(m, k, o, b)`.
    pub parameters: Parameters,
    /// Codomain family used to fill the fitness tables.
    pub codomain: CodomainFamily,
    /// Derived variable count `L`.
    pub num_variables: u32,
}
