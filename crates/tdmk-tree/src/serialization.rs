use serde::{Deserialize, Serialize};

use tdmk_core::errors::{ErrorInfo, TdmkError};
use tdmk_core::{Parameters, SchemaVersion};

use crate::arena::{CliqueRecord, CliqueTree};

/// Serializes the tree to a compact binary representation using `bincode`.
pub fn tree_to_bytes(tree: &CliqueTree) -> Result<Vec<u8>, TdmkError> {
    let serializable = SerializableTree::from_tree(tree);
    bincode::serialize(&serializable)
        .map_err(|err| TdmkError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a tree from its binary representation.
pub fn tree_from_bytes(bytes: &[u8]) -> Result<CliqueTree, TdmkError> {
    let serializable: SerializableTree = bincode::deserialize(bytes)
        .map_err(|err| TdmkError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_tree()
}

/// Serializes the tree to a JSON string.
pub fn tree_to_json(tree: &CliqueTree) -> Result<String, TdmkError> {
    let serializable = SerializableTree::from_tree(tree);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| TdmkError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a tree from a JSON string.
pub fn tree_from_json(json: &str) -> Result<CliqueTree, TdmkError> {
    let serializable: SerializableTree = serde_json::from_str(json)
        .map_err(|err| TdmkError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_tree()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableTree {
    schema_version: SchemaVersion,
    parameters: Parameters,
    cliques: Vec<SerializableClique>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableClique {
    variables: Vec<u32>,
    parent: Option<usize>,
}

impl SerializableTree {
    fn from_tree(tree: &CliqueTree) -> Self {
        let cliques = tree
            .records()
            .iter()
            .map(|record| SerializableClique {
                variables: record.variables().to_vec(),
                parent: record.parent(),
            })
            .collect();
        Self {
            schema_version: tree.schema_version(),
            parameters: tree.parameters(),
            cliques,
        }
    }

    fn into_tree(self) -> Result<CliqueTree, TdmkError> {
        self.parameters.validate()?;
        let records = self
            .cliques
            .into_iter()
            .map(|clique| CliqueRecord::new(clique.variables, clique.parent))
            .collect();
        CliqueTree::assemble(self.parameters, self.schema_version, records).map_err(|err| {
            TdmkError::Serde(
                ErrorInfo::new("deserialize-verify", err.to_string())
                    .with_hint("the payload does not describe a valid clique tree"),
            )
        })
    }
}
