#![deny(missing_docs)]
#![doc = "Core types for TD Mk Landscape construction: input parameters, codomain families, structured errors, provenance, and the deterministic random stream."]

pub mod errors;
pub mod params;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, TdmkError};
pub use params::{CodomainFamily, Parameters};
pub use provenance::{ConstructionProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
