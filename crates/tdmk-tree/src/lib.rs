#![deny(missing_docs)]
#![doc = "Clique-tree topology for TD Mk Landscapes: arena records, the deterministic builder, canonical hashing, and serialization."]

mod arena;
mod builder;
mod hash;
mod serialization;

pub use arena::{CliqueRecord, CliqueTree};
pub use hash::canonical_tree_hash;
pub use serialization::{tree_from_bytes, tree_from_json, tree_to_bytes, tree_to_json};
