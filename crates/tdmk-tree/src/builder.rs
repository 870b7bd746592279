use tdmk_core::{Parameters, SchemaVersion, TdmkError};

use crate::arena::{CliqueRecord, CliqueTree};

impl CliqueTree {
    /// Builds the deterministic topology for the given parameters.
    ///
    /// Consumes no randomness: clique 0 claims variables `0..k`, clique `i`
    /// attaches to the earliest clique with spare child capacity (the
    /// complete b-ary layout `parent = (i-1)/b`), inherits the parent's
    /// trailing `o` variables as its leading positions, and claims the next
    /// `k-o` fresh indices.
    pub fn build(parameters: Parameters) -> Result<Self, TdmkError> {
        parameters.validate()?;
        let m = parameters.m as usize;
        let k = parameters.k as usize;
        let o = parameters.o as usize;
        let b = parameters.b as usize;

        let mut records = Vec::with_capacity(m);
        records.push(CliqueRecord::new((0..parameters.k).collect(), None));

        let mut next_fresh = parameters.k;
        for index in 1..m {
            let parent = (index - 1) / b;
            let mut variables: Vec<u32> = records[parent].variables()[k - o..].to_vec();
            for _ in 0..(k - o) {
                variables.push(next_fresh);
                next_fresh += 1;
            }
            records.push(CliqueRecord::new(variables, Some(parent)));
        }

        Self::assemble(parameters, SchemaVersion::default(), records)
    }
}
