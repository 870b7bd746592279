#![deny(missing_docs)]
#![doc = "TD Mk Landscape aggregate: the ground-truth tree solver, the solution evaluator, optimum queries, hashing, and serialization."]

mod fitness;
mod hash;
mod landscape;
mod serialization;
mod solver;

pub use fitness::{approx_equal, better, better_or_equal, FITNESS_EPSILON};
pub use hash::canonical_landscape_hash;
pub use landscape::{table_seed, Landscape};
pub use serialization::{
    landscape_from_bytes, landscape_from_json, landscape_to_bytes, landscape_to_json,
};
