use sha2::{Digest, Sha256};

use tdmk_core::CodomainFamily;
use tdmk_tree::canonical_tree_hash;

use crate::landscape::Landscape;

/// Computes the canonical fingerprint of a landscape: schema version,
/// codomain family, topology, table bits, and ground truth.
pub fn canonical_landscape_hash(landscape: &Landscape) -> String {
    let mut hasher = Sha256::new();
    let schema = landscape.schema_version();
    hasher.update(schema.major.to_le_bytes());
    hasher.update(schema.minor.to_le_bytes());
    hasher.update(schema.patch.to_le_bytes());

    encode_family(landscape.codomain(), &mut hasher);
    hasher.update(canonical_tree_hash(landscape.tree()).as_bytes());

    hasher.update((landscape.tables().len() as u64).to_le_bytes());
    for table in landscape.tables() {
        hasher.update((table.len() as u64).to_le_bytes());
        for value in table {
            hasher.update(value.to_bits().to_le_bytes());
        }
    }

    hasher.update(landscape.optimum_score().to_bits().to_le_bytes());
    hasher.update((landscape.optimum_count() as u64).to_le_bytes());
    for optimum in landscape.optima() {
        hasher.update(optimum);
    }

    format!("{:x}", hasher.finalize())
}

fn encode_family(family: &CodomainFamily, hasher: &mut Sha256) {
    hasher.update(family.name().as_bytes());
    match family {
        CodomainFamily::NKq { q } => hasher.update(q.to_le_bytes()),
        CodomainFamily::NKp { p } => hasher.update(p.to_bits().to_le_bytes()),
        CodomainFamily::RandomDeceptiveTrap { p_deceptive } => {
            hasher.update(p_deceptive.to_bits().to_le_bytes())
        }
        _ => {}
    }
}
