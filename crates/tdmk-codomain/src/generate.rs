use rand::Rng;

use tdmk_core::errors::{ErrorInfo, TdmkError};
use tdmk_core::{CodomainFamily, Parameters, RngHandle};

/// Deception gap separating the all-ones optimum from the all-zeros
/// attractor in the deceptive trap shape.
const DECEPTION_GAP: f64 = 0.5;

/// Generates the per-clique fitness tables for the requested family.
///
/// The stream is consumed in clique order and, within a clique, in ascending
/// local-pattern order, so a given seed reproduces the tables exactly. The
/// `RandomDeceptiveTrap` family consumes one extra Bernoulli draw per clique
/// before that clique's entries.
pub fn generate_tables(
    parameters: &Parameters,
    family: &CodomainFamily,
    rng: &mut RngHandle,
) -> Result<Vec<Vec<f64>>, TdmkError> {
    parameters.validate()?;
    family.validate()?;

    let m = parameters.m as usize;
    let k = parameters.k;
    let mut tables = Vec::with_capacity(m);
    for _ in 0..m {
        let table = match family {
            CodomainFamily::Random => random_table(k, rng),
            CodomainFamily::Trap => trap_table(k),
            CodomainFamily::DeceptiveTrap => deceptive_trap_table(k),
            CodomainFamily::NKq { q } => nk_q_table(k, *q, rng),
            CodomainFamily::NKp { p } => nk_p_table(k, *p, rng),
            CodomainFamily::RandomDeceptiveTrap { p_deceptive } => {
                if rng.next_bool(*p_deceptive) {
                    deceptive_trap_table(k)
                } else {
                    random_table(k, rng)
                }
            }
            CodomainFamily::Unknown => {
                return Err(TdmkError::Config(ErrorInfo::new(
                    "unknown-codomain",
                    "the unknown family cannot generate tables",
                )))
            }
        };
        tables.push(table);
    }

    Ok(tables)
}

fn random_table(k: u32, rng: &mut RngHandle) -> Vec<f64> {
    (0..1usize << k).map(|_| rng.next_uniform()).collect()
}

fn trap_table(k: u32) -> Vec<f64> {
    (0..1usize << k)
        .map(|pattern| trap_value(k, unit_count(pattern)))
        .collect()
}

fn trap_value(k: u32, units: u32) -> f64 {
    if units == k {
        k as f64
    } else {
        (k - 1 - units) as f64
    }
}

fn deceptive_trap_table(k: u32) -> Vec<f64> {
    (0..1usize << k)
        .map(|pattern| deceptive_trap_value(k, unit_count(pattern)))
        .collect()
}

fn deceptive_trap_value(k: u32, units: u32) -> f64 {
    if units == k {
        k as f64
    } else if k == 1 {
        k as f64 - DECEPTION_GAP
    } else {
        (k as f64 - DECEPTION_GAP) * (1.0 - units as f64 / (k - 1) as f64)
    }
}

fn nk_q_table(k: u32, q: u32, rng: &mut RngHandle) -> Vec<f64> {
    (0..1usize << k)
        .map(|_| rng.inner_mut().gen_range(0..q) as f64 / (q - 1) as f64)
        .collect()
}

fn nk_p_table(k: u32, p: f64, rng: &mut RngHandle) -> Vec<f64> {
    (0..1usize << k)
        .map(|_| {
            if rng.next_bool(p) {
                rng.next_uniform()
            } else {
                0.0
            }
        })
        .collect()
}

fn unit_count(pattern: usize) -> u32 {
    (pattern as u32).count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trap_values_for_three_bits() {
        assert_eq!(trap_value(3, 0), 2.0);
        assert_eq!(trap_value(3, 1), 1.0);
        assert_eq!(trap_value(3, 2), 0.0);
        assert_eq!(trap_value(3, 3), 3.0);
    }

    #[test]
    fn deceptive_trap_keeps_its_invariants() {
        for k in 1..8u32 {
            let optimum = deceptive_trap_value(k, k);
            let attractor = deceptive_trap_value(k, 0);
            assert_eq!(optimum, k as f64);
            assert!(attractor < optimum);
            for units in 1..k {
                assert!(deceptive_trap_value(k, units) < attractor);
            }
        }
    }

    #[test]
    fn unit_count_matches_popcount() {
        assert_eq!(unit_count(0b0000), 0);
        assert_eq!(unit_count(0b1011), 3);
        assert_eq!(unit_count(0b1111), 4);
    }
}
