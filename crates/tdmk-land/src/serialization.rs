use serde::{Deserialize, Serialize};

use tdmk_core::errors::{ErrorInfo, TdmkError};
use tdmk_core::{ConstructionProvenance, SchemaVersion};

use crate::landscape::Landscape;

/// Serializes the landscape to a compact binary representation using
/// `bincode`. The topology is not stored; it is a pure function of the
/// parameters and is rebuilt on restore.
pub fn landscape_to_bytes(landscape: &Landscape) -> Result<Vec<u8>, TdmkError> {
    let serializable = SerializableLandscape::from_landscape(landscape);
    bincode::serialize(&serializable)
        .map_err(|err| TdmkError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a landscape from its binary representation, re-verifying the
/// stored ground truth.
pub fn landscape_from_bytes(bytes: &[u8]) -> Result<Landscape, TdmkError> {
    let serializable: SerializableLandscape = bincode::deserialize(bytes)
        .map_err(|err| TdmkError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_landscape()
}

/// Serializes the landscape to a JSON string.
pub fn landscape_to_json(landscape: &Landscape) -> Result<String, TdmkError> {
    let serializable = SerializableLandscape::from_landscape(landscape);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| TdmkError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a landscape from a JSON string, re-verifying the stored ground
/// truth.
pub fn landscape_from_json(json: &str) -> Result<Landscape, TdmkError> {
    let serializable: SerializableLandscape = serde_json::from_str(json)
        .map_err(|err| TdmkError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_landscape()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableLandscape {
    schema_version: SchemaVersion,
    provenance: ConstructionProvenance,
    tables: Vec<Vec<f64>>,
    optimum_score: f64,
    optima: Vec<Vec<u8>>,
}

impl SerializableLandscape {
    fn from_landscape(landscape: &Landscape) -> Self {
        Self {
            schema_version: landscape.schema_version(),
            provenance: landscape.provenance().clone(),
            tables: landscape.tables().to_vec(),
            optimum_score: landscape.optimum_score(),
            optima: landscape.optima().to_vec(),
        }
    }

    fn into_landscape(self) -> Result<Landscape, TdmkError> {
        Landscape::reassemble(
            self.schema_version,
            self.provenance,
            self.tables,
            self.optimum_score,
            self.optima,
        )
        .map_err(|err| {
            TdmkError::Serde(
                ErrorInfo::new("deserialize-verify", err.to_string())
                    .with_hint("the payload does not describe a consistent landscape"),
            )
        })
    }
}
