#![deny(missing_docs)]
#![doc = "Fitness-table generation for TD Mk Landscapes: one generator per codomain family, consuming the deterministic stream in clique order and ascending local-pattern order."]

mod generate;

pub use generate::generate_tables;
