use sha2::{Digest, Sha256};

use crate::arena::CliqueTree;

/// Computes the canonical structural hash for the provided tree.
pub fn canonical_tree_hash(tree: &CliqueTree) -> String {
    let mut hasher = Sha256::new();
    let schema = tree.schema_version();
    hasher.update(schema.major.to_le_bytes());
    hasher.update(schema.minor.to_le_bytes());
    hasher.update(schema.patch.to_le_bytes());

    let parameters = tree.parameters();
    for value in [parameters.m, parameters.k, parameters.o, parameters.b] {
        hasher.update(value.to_le_bytes());
    }

    hasher.update((tree.num_cliques() as u64).to_le_bytes());
    for record in tree.records() {
        match record.parent() {
            Some(parent) => {
                hasher.update(b"parent:some");
                hasher.update((parent as u64).to_le_bytes());
            }
            None => hasher.update(b"parent:none"),
        }
        hasher.update((record.variables().len() as u64).to_le_bytes());
        for &variable in record.variables() {
            hasher.update(variable.to_le_bytes());
        }
    }

    format!("{:x}", hasher.finalize())
}
