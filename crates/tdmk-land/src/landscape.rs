//! The immutable landscape aggregate and its query surface.

use tdmk_codomain::generate_tables;
use tdmk_core::errors::{ErrorInfo, TdmkError};
use tdmk_core::{
    derive_substream_seed, CodomainFamily, ConstructionProvenance, Parameters, RngHandle,
    SchemaVersion,
};
use tdmk_tree::CliqueTree;

use crate::fitness::{approx_equal, FITNESS_EPSILON};
use crate::solver;

/// Substream identifier reserved for fitness-table generation.
const TABLE_SUBSTREAM: u64 = 0;

/// Derives the deterministic seed for the table-generation stream.
pub fn table_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, TABLE_SUBSTREAM)
}

/// Immutable TD Mk Landscape: topology, fitness tables, and ground truth.
///
/// A landscape is a pure function of `(parameters, codomain, seed)`. Once
/// constructed it is read-only; evaluation and membership queries may run
/// concurrently from any number of threads, and release is `Drop`.
#[derive(Debug, Clone)]
pub struct Landscape {
    schema_version: SchemaVersion,
    provenance: ConstructionProvenance,
    tree: CliqueTree,
    tables: Vec<Vec<f64>>,
    optimum_score: f64,
    optima: Vec<Vec<u8>>,
}

impl Landscape {
    /// Constructs a landscape from parameters, a codomain family, and a
    /// master seed.
    pub fn construct(
        parameters: Parameters,
        codomain: CodomainFamily,
        seed: u64,
    ) -> Result<Self, TdmkError> {
        let mut rng = RngHandle::from_seed(table_seed(seed));
        Self::construct_with_stream(parameters, codomain, Some(seed), &mut rng)
    }

    /// Constructs a landscape from an exclusively owned random stream.
    ///
    /// The stream must not be shared with a concurrent construction; the
    /// tables consume it in clique order.
    pub fn construct_with_stream(
        parameters: Parameters,
        codomain: CodomainFamily,
        seed: Option<u64>,
        rng: &mut RngHandle,
    ) -> Result<Self, TdmkError> {
        let tree = CliqueTree::build(parameters)?;
        let tables = generate_tables(&parameters, &codomain, rng)?;
        Self::assemble(tree, codomain, seed, tables)
    }

    /// Assembles a landscape around externally supplied fitness tables.
    ///
    /// The codomain family is recorded as [`CodomainFamily::Unknown`].
    pub fn construct_with_tables(
        parameters: Parameters,
        tables: Vec<Vec<f64>>,
    ) -> Result<Self, TdmkError> {
        let tree = CliqueTree::build(parameters)?;
        validate_tables(&parameters, &tables)?;
        Self::assemble(tree, CodomainFamily::Unknown, None, tables)
    }

    fn assemble(
        tree: CliqueTree,
        codomain: CodomainFamily,
        seed: Option<u64>,
        tables: Vec<Vec<f64>>,
    ) -> Result<Self, TdmkError> {
        let truth = solver::solve(&tree, &tables)?;

        // The DP accumulates partial sums bottom-up; re-deriving the score
        // through the evaluator pins both to one summation order.
        let optimum_score = evaluate_against(&tree, &tables, &truth.optima[0])?;
        if !approx_equal(truth.score, optimum_score) {
            return Err(TdmkError::Invariant(
                ErrorInfo::new(
                    "optimum-score-divergence",
                    "the solver score drifted past the tolerance of the evaluator",
                )
                .with_context("solver", truth.score.to_string())
                .with_context("evaluator", optimum_score.to_string()),
            ));
        }
        for solution in &truth.optima {
            let fitness = evaluate_against(&tree, &tables, solution)?;
            if !approx_equal(fitness, optimum_score) {
                return Err(TdmkError::Invariant(
                    ErrorInfo::new(
                        "optimum-score-divergence",
                        "an expanded optimum does not reach the optimal fitness",
                    )
                    .with_context("expected", optimum_score.to_string())
                    .with_context("actual", fitness.to_string()),
                ));
            }
        }

        let provenance = ConstructionProvenance {
            seed,
            parameters: tree.parameters(),
            codomain,
            num_variables: tree.num_variables(),
        };
        Ok(Self {
            schema_version: SchemaVersion::default(),
            provenance,
            tree,
            tables,
            optimum_score,
            optima: truth.optima,
        })
    }

    /// Re-assembles a landscape from previously serialized parts, verifying
    /// the stored ground truth against the tables.
    pub(crate) fn reassemble(
        schema_version: SchemaVersion,
        provenance: ConstructionProvenance,
        tables: Vec<Vec<f64>>,
        optimum_score: f64,
        optima: Vec<Vec<u8>>,
    ) -> Result<Self, TdmkError> {
        let tree = CliqueTree::build(provenance.parameters)?;
        validate_tables(&provenance.parameters, &tables)?;
        if optima.is_empty() {
            return Err(TdmkError::Invariant(ErrorInfo::new(
                "optima-empty",
                "a landscape must carry at least one global optimum",
            )));
        }
        let mut seen = std::collections::BTreeSet::new();
        for solution in &optima {
            if !seen.insert(solution.clone()) {
                return Err(TdmkError::Invariant(
                    ErrorInfo::new("duplicate-optimum", "the stored optimum set holds a repeated assignment")
                        .with_context("count", optima.len().to_string()),
                ));
            }
            let fitness = evaluate_against(&tree, &tables, solution)?;
            if !approx_equal(fitness, optimum_score) {
                return Err(TdmkError::Invariant(
                    ErrorInfo::new(
                        "optimum-score-divergence",
                        "a stored optimum does not reach the stored score",
                    )
                    .with_context("expected", optimum_score.to_string())
                    .with_context("actual", fitness.to_string()),
                ));
            }
        }
        Ok(Self {
            schema_version,
            provenance,
            tree,
            tables,
            optimum_score,
            optima,
        })
    }

    /// Scores a full-length binary assignment.
    pub fn evaluate(&self, solution: &[u8]) -> Result<f64, TdmkError> {
        evaluate_against(&self.tree, &self.tables, solution)
    }

    /// Returns the fitness of `solution` with the bit at `flip_index`
    /// flipped, given the solution's current fitness.
    ///
    /// Only cliques containing the flipped variable contribute table lookups;
    /// `solution` itself is the pre-flip assignment and is not modified.
    pub fn evaluate_flip(
        &self,
        solution: &[u8],
        current_fitness: f64,
        flip_index: u32,
    ) -> Result<f64, TdmkError> {
        validate_solution(self.tree.num_variables(), solution)?;
        if flip_index >= self.tree.num_variables() {
            return Err(TdmkError::Value(
                ErrorInfo::new("flip-index", "the flipped variable is outside the landscape")
                    .with_context("index", flip_index.to_string())
                    .with_context("l", self.tree.num_variables().to_string()),
            ));
        }

        let mut fitness = current_fitness;
        for (record, table) in self.tree.records().iter().zip(&self.tables) {
            if !record.variables().contains(&flip_index) {
                continue;
            }
            let mut pattern = 0usize;
            let mut flip_position = 0usize;
            for (position, &variable) in record.variables().iter().enumerate() {
                if variable == flip_index {
                    flip_position = position;
                }
                pattern = (pattern << 1) | solution[variable as usize] as usize;
            }
            let flipped = pattern ^ (1usize << (record.variables().len() - 1 - flip_position));
            fitness -= table[pattern];
            fitness += table[flipped];
        }
        Ok(fitness)
    }

    /// Returns whether `(solution, fitness)` is a global optimum.
    ///
    /// Exact score equality is accepted outright; within the tolerance the
    /// solution must additionally be a member of the optimum set, so merely
    /// near-tied local optima are rejected.
    pub fn is_global_optimum(&self, solution: &[u8], fitness: f64) -> Result<bool, TdmkError> {
        if solution.len() != self.tree.num_variables() as usize {
            return Err(length_error(self.tree.num_variables(), solution.len()));
        }
        Ok(fitness == self.optimum_score
            || ((fitness - self.optimum_score).abs() < FITNESS_EPSILON
                && self.optima.iter().any(|optimum| optimum == solution)))
    }

    /// The global optimum fitness.
    pub fn optimum_score(&self) -> f64 {
        self.optimum_score
    }

    /// Number of distinct global optima.
    pub fn optimum_count(&self) -> usize {
        self.optima.len()
    }

    /// All global optima, one assignment per row. Row order is stable for a
    /// given instance but otherwise unspecified.
    pub fn optima(&self) -> &[Vec<u8>] {
        &self.optima
    }

    /// Writes the optima row-major into a caller-allocated buffer of exactly
    /// `optimum_count() * num_variables()` bytes.
    pub fn write_optima(&self, buffer: &mut [u8]) -> Result<(), TdmkError> {
        let l = self.tree.num_variables() as usize;
        let expected = self.optima.len() * l;
        if buffer.len() != expected {
            return Err(TdmkError::Length(
                ErrorInfo::new("buffer-size", "the optimum buffer has the wrong size")
                    .with_context("expected", expected.to_string())
                    .with_context("actual", buffer.len().to_string())
                    .with_hint("allocate optimum_count * num_variables bytes"),
            ));
        }
        for (row, solution) in self.optima.iter().enumerate() {
            buffer[row * l..(row + 1) * l].copy_from_slice(solution);
        }
        Ok(())
    }

    /// Input parameters the landscape was built from.
    pub fn parameters(&self) -> Parameters {
        self.provenance.parameters
    }

    /// Codomain family recorded at construction.
    pub fn codomain(&self) -> &CodomainFamily {
        &self.provenance.codomain
    }

    /// Construction provenance embedded in the landscape.
    pub fn provenance(&self) -> &ConstructionProvenance {
        &self.provenance
    }

    /// Schema version of the landscape payload.
    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    /// Total number of binary variables `L`.
    pub fn num_variables(&self) -> u32 {
        self.tree.num_variables()
    }

    /// Number of cliques.
    pub fn num_cliques(&self) -> usize {
        self.tree.num_cliques()
    }

    /// The underlying clique-tree topology.
    pub fn tree(&self) -> &CliqueTree {
        &self.tree
    }

    /// The per-clique fitness tables in clique order.
    pub fn tables(&self) -> &[Vec<f64>] {
        &self.tables
    }
}

fn length_error(expected: u32, actual: usize) -> TdmkError {
    TdmkError::Length(
        ErrorInfo::new("solution-length", "solution length does not match the landscape")
            .with_context("expected", expected.to_string())
            .with_context("actual", actual.to_string()),
    )
}

fn validate_solution(num_variables: u32, solution: &[u8]) -> Result<(), TdmkError> {
    if solution.len() != num_variables as usize {
        return Err(length_error(num_variables, solution.len()));
    }
    for (index, &bit) in solution.iter().enumerate() {
        if bit > 1 {
            return Err(TdmkError::Value(
                ErrorInfo::new("solution-value", "solutions must hold only 0 or 1")
                    .with_context("index", index.to_string())
                    .with_context("value", bit.to_string()),
            ));
        }
    }
    Ok(())
}

fn evaluate_against(
    tree: &CliqueTree,
    tables: &[Vec<f64>],
    solution: &[u8],
) -> Result<f64, TdmkError> {
    validate_solution(tree.num_variables(), solution)?;

    let mut fitness = 0.0;
    for (record, table) in tree.records().iter().zip(tables) {
        let mut pattern = 0usize;
        for &variable in record.variables() {
            pattern = (pattern << 1) | solution[variable as usize] as usize;
        }
        fitness += table[pattern];
    }
    Ok(fitness)
}

fn validate_tables(parameters: &Parameters, tables: &[Vec<f64>]) -> Result<(), TdmkError> {
    if tables.len() != parameters.m as usize {
        return Err(TdmkError::Config(
            ErrorInfo::new("table-count", "one fitness table per clique is required")
                .with_context("expected", parameters.m.to_string())
                .with_context("actual", tables.len().to_string()),
        ));
    }
    for (index, table) in tables.iter().enumerate() {
        if table.len() != parameters.table_len() {
            return Err(TdmkError::Config(
                ErrorInfo::new("table-len", "a fitness table does not hold 2^k entries")
                    .with_context("clique", index.to_string())
                    .with_context("expected", parameters.table_len().to_string())
                    .with_context("actual", table.len().to_string()),
            ));
        }
        if let Some(position) = table.iter().position(|value| !value.is_finite()) {
            return Err(TdmkError::Config(
                ErrorInfo::new("table-value", "fitness tables must hold finite values")
                    .with_context("clique", index.to_string())
                    .with_context("entry", position.to_string()),
            ));
        }
    }
    Ok(())
}
