//! Input parameters and codomain families with construction-time validation.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, TdmkError};

/// Input parameters of a TD Mk Landscape: `m` cliques of `k` binary variables
/// each, `o` variables shared between a clique and its parent, and at most
/// `b` child cliques per clique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameters {
    /// Number of cliques (subfunctions).
    pub m: u32,
    /// Number of variables per clique.
    pub k: u32,
    /// Number of variables a clique shares with its parent.
    pub o: u32,
    /// Maximum number of child cliques per clique.
    pub b: u32,
}

impl Parameters {
    /// Creates a validated parameter set.
    pub fn new(m: u32, k: u32, o: u32, b: u32) -> Result<Self, TdmkError> {
        let parameters = Self { m, k, o, b };
        parameters.validate()?;
        Ok(parameters)
    }

    /// Checks the `m`/`k`/`o`/`b` combination.
    pub fn validate(&self) -> Result<(), TdmkError> {
        if self.m == 0 {
            return Err(TdmkError::Config(
                ErrorInfo::new("clique-count", "at least one clique is required")
                    .with_context("m", self.m.to_string()),
            ));
        }
        if self.k == 0 {
            return Err(TdmkError::Config(
                ErrorInfo::new("clique-size", "cliques must hold at least one variable")
                    .with_context("k", self.k.to_string()),
            ));
        }
        if self.k >= 32 {
            return Err(TdmkError::Config(
                ErrorInfo::new("clique-size-cap", "clique size exceeds the table index width")
                    .with_context("k", self.k.to_string())
                    .with_hint("fitness tables hold 2^k entries; k must stay below 32"),
            ));
        }
        if self.o >= self.k {
            return Err(TdmkError::Config(
                ErrorInfo::new("overlap-range", "overlap must be strictly smaller than the clique size")
                    .with_context("o", self.o.to_string())
                    .with_context("k", self.k.to_string()),
            ));
        }
        if self.b == 0 {
            return Err(TdmkError::Config(
                ErrorInfo::new("branching", "the branching factor must be at least one")
                    .with_context("b", self.b.to_string()),
            ));
        }
        Ok(())
    }

    /// Total number of binary variables, `(m-1)*(k-o) + k`.
    pub fn num_variables(&self) -> u32 {
        (self.m - 1) * (self.k - self.o) + self.k
    }

    /// Number of entries in one clique's fitness table.
    pub fn table_len(&self) -> usize {
        1usize << self.k
    }
}

/// Statistical family used to fill per-clique fitness tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", content = "detail", rename_all = "kebab-case")]
pub enum CodomainFamily {
    /// Independent uniform draws in `[0, 1)`.
    Random,
    /// Canonical trap keyed by the number of set bits `u`: `k` at `u = k`,
    /// `k-1-u` otherwise.
    Trap,
    /// Deceptive trap keyed by `u` with a fixed deception gap: a unique
    /// all-ones optimum of value `k` and an all-zeros attractor just below it.
    DeceptiveTrap,
    /// Uniform draws over `q` equally spaced levels in `[0, 1]`.
    NKq {
        /// Number of levels; at least two.
        q: u32,
    },
    /// Entries are zero with probability `1 - p`, uniform draws otherwise.
    NKp {
        /// Probability of a non-zero entry.
        p: f64,
    },
    /// Per clique, a single Bernoulli draw selects the deceptive trap shape
    /// with probability `p_deceptive` and random generation otherwise.
    RandomDeceptiveTrap {
        /// Probability that a clique is deceptive.
        p_deceptive: f64,
    },
    /// Sentinel recorded for externally supplied tables; cannot drive
    /// generation.
    Unknown,
}

impl CodomainFamily {
    /// Stable kebab-case identifier used in hashes and error contexts.
    pub fn name(&self) -> &'static str {
        match self {
            CodomainFamily::Random => "random",
            CodomainFamily::Trap => "trap",
            CodomainFamily::DeceptiveTrap => "deceptive-trap",
            CodomainFamily::NKq { .. } => "nk-q",
            CodomainFamily::NKp { .. } => "nk-p",
            CodomainFamily::RandomDeceptiveTrap { .. } => "random-deceptive-trap",
            CodomainFamily::Unknown => "unknown",
        }
    }

    /// Validates the family parameters for table generation.
    pub fn validate(&self) -> Result<(), TdmkError> {
        match self {
            CodomainFamily::NKq { q } => {
                if *q < 2 {
                    return Err(TdmkError::Config(
                        ErrorInfo::new("q-range", "nk-q requires at least two levels")
                            .with_context("q", q.to_string())
                            .with_hint("at least two levels are needed to span [0, 1]"),
                    ));
                }
                Ok(())
            }
            CodomainFamily::NKp { p } => {
                if !(0.0..=1.0).contains(p) {
                    return Err(TdmkError::Config(
                        ErrorInfo::new("p-range", "nk-p probability is outside [0, 1]")
                            .with_context("p", p.to_string()),
                    ));
                }
                Ok(())
            }
            CodomainFamily::RandomDeceptiveTrap { p_deceptive } => {
                if !(0.0..=1.0).contains(p_deceptive) {
                    return Err(TdmkError::Config(
                        ErrorInfo::new(
                            "p-deceptive-range",
                            "random-deceptive-trap probability is outside [0, 1]",
                        )
                        .with_context("p_deceptive", p_deceptive.to_string()),
                    ));
                }
                Ok(())
            }
            CodomainFamily::Unknown => Err(TdmkError::Config(
                ErrorInfo::new("unknown-codomain", "the unknown family cannot generate tables")
                    .with_hint("unknown marks landscapes assembled from externally supplied tables"),
            )),
            _ => Ok(()),
        }
    }
}
