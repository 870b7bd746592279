use serde::{Deserialize, Serialize};

use tdmk_core::errors::{ErrorInfo, TdmkError};
use tdmk_core::{Parameters, SchemaVersion};

/// One clique in the arena: its ordered variables, parent link, and derived
/// children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueRecord {
    variables: Vec<u32>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl CliqueRecord {
    pub(crate) fn new(variables: Vec<u32>, parent: Option<usize>) -> Self {
        Self {
            variables,
            parent,
            children: Vec::new(),
        }
    }

    /// Ordered variable indices governed by this clique. For a non-root
    /// clique the leading `o` positions are the overlap with its parent.
    pub fn variables(&self) -> &[u32] {
        &self.variables
    }

    /// Arena index of the parent clique; `None` for the root.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Arena indices of the child cliques.
    pub fn children(&self) -> &[usize] {
        &self.children
    }
}

/// Immutable tree of cliques addressed by arena position.
///
/// Parent indices are strictly smaller than child indices, so a reverse index
/// sweep visits children before parents and a forward sweep visits parents
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliqueTree {
    schema_version: SchemaVersion,
    parameters: Parameters,
    num_variables: u32,
    records: Vec<CliqueRecord>,
}

impl CliqueTree {
    /// Derives children lists, verifies the arena invariants, and seals the
    /// tree. Shared by the builder and the deserializer.
    pub(crate) fn assemble(
        parameters: Parameters,
        schema_version: SchemaVersion,
        mut records: Vec<CliqueRecord>,
    ) -> Result<Self, TdmkError> {
        for index in 0..records.len() {
            if let Some(parent) = records[index].parent {
                if parent >= index {
                    return Err(TdmkError::Invariant(
                        ErrorInfo::new("parent-order", "a parent index must precede its child")
                            .with_context("clique", index.to_string())
                            .with_context("parent", parent.to_string()),
                    ));
                }
                records[parent].children.push(index);
            }
        }

        let tree = Self {
            schema_version,
            parameters,
            num_variables: parameters.num_variables(),
            records,
        };
        tree.verify()?;
        Ok(tree)
    }

    /// Checks every structural invariant of the arena.
    pub fn verify(&self) -> Result<(), TdmkError> {
        let m = self.parameters.m as usize;
        let k = self.parameters.k as usize;
        let o = self.parameters.o as usize;
        let b = self.parameters.b as usize;
        let l = self.num_variables as usize;

        if self.records.len() != m {
            return Err(TdmkError::Invariant(
                ErrorInfo::new("clique-count", "arena size does not match the clique count")
                    .with_context("expected", m.to_string())
                    .with_context("actual", self.records.len().to_string()),
            ));
        }

        let mut seen = vec![false; l];
        for (index, record) in self.records.iter().enumerate() {
            if record.variables.len() != k {
                return Err(TdmkError::Invariant(
                    ErrorInfo::new("clique-arity", "a clique does not hold exactly k variables")
                        .with_context("clique", index.to_string())
                        .with_context("arity", record.variables.len().to_string()),
                ));
            }
            if record.children.len() > b {
                return Err(TdmkError::Invariant(
                    ErrorInfo::new("fan-out", "a clique exceeds the branching factor")
                        .with_context("clique", index.to_string())
                        .with_context("children", record.children.len().to_string()),
                ));
            }
            for &variable in &record.variables {
                if variable as usize >= l {
                    return Err(TdmkError::Invariant(
                        ErrorInfo::new("variable-range", "a variable index exceeds L")
                            .with_context("clique", index.to_string())
                            .with_context("variable", variable.to_string()),
                    ));
                }
            }

            match record.parent {
                None => {
                    if index != 0 {
                        return Err(TdmkError::Invariant(
                            ErrorInfo::new("orphan-clique", "only the root may lack a parent")
                                .with_context("clique", index.to_string()),
                        ));
                    }
                }
                Some(parent) => {
                    let parent_tail = &self.records[parent].variables[k - o..];
                    if record.variables[..o] != *parent_tail {
                        return Err(TdmkError::Invariant(
                            ErrorInfo::new("bad-overlap", "overlap positions do not alias the parent")
                                .with_context("clique", index.to_string())
                                .with_context("parent", parent.to_string()),
                        ));
                    }
                }
            }

            let fresh = if index == 0 {
                &record.variables[..]
            } else {
                &record.variables[o..]
            };
            for &variable in fresh {
                if seen[variable as usize] {
                    return Err(TdmkError::Invariant(
                        ErrorInfo::new("variable-coverage", "a fresh variable is claimed twice")
                            .with_context("clique", index.to_string())
                            .with_context("variable", variable.to_string()),
                    ));
                }
                seen[variable as usize] = true;
            }
        }

        if seen.iter().any(|&claimed| !claimed) {
            return Err(TdmkError::Invariant(
                ErrorInfo::new("variable-coverage", "not every variable in [0, L) is claimed")
                    .with_context("l", l.to_string()),
            ));
        }

        Ok(())
    }

    /// Schema version of the arena layout.
    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    /// Input parameters the topology was built from.
    pub fn parameters(&self) -> Parameters {
        self.parameters
    }

    /// Total number of binary variables `L`.
    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    /// Number of cliques in the arena.
    pub fn num_cliques(&self) -> usize {
        self.records.len()
    }

    /// All clique records in arena order.
    pub fn records(&self) -> &[CliqueRecord] {
        &self.records
    }

    /// The record at the given arena index, if any.
    pub fn record(&self, index: usize) -> Option<&CliqueRecord> {
        self.records.get(index)
    }
}
