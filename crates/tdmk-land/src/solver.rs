//! Post-order tree dynamic program computing the global optimum score and
//! the full set of tying assignments.

use std::collections::BTreeSet;

use tdmk_core::errors::{ErrorInfo, TdmkError};
use tdmk_tree::CliqueTree;

use crate::fitness::{approx_equal, better};

/// DP output: the optimal total fitness and every assignment achieving it.
pub(crate) struct GroundTruth {
    pub(crate) score: f64,
    pub(crate) optima: Vec<Vec<u8>>,
}

/// Best achievable completion for one overlap pattern, with every tied
/// free-bit choice retained.
struct MessageEntry {
    best: f64,
    free: Vec<usize>,
}

pub(crate) fn solve(tree: &CliqueTree, tables: &[Vec<f64>]) -> Result<GroundTruth, TdmkError> {
    let parameters = tree.parameters();
    let m = parameters.m as usize;
    let k = parameters.k as usize;
    let o = parameters.o as usize;
    let free_bits = k - o;
    let overlap_mask = (1usize << o) - 1;

    // Children carry larger arena indices than their parent, so a reverse
    // index sweep is a post-order traversal.
    let mut messages: Vec<Vec<MessageEntry>> = (0..m).map(|_| Vec::new()).collect();
    for index in (1..m).rev() {
        let record = &tree.records()[index];
        let mut entries = Vec::with_capacity(1 << o);
        for overlap in 0..1usize << o {
            let mut best = f64::NEG_INFINITY;
            let mut free = Vec::new();
            for choice in 0..1usize << free_bits {
                let pattern = (overlap << free_bits) | choice;
                let mut value = tables[index][pattern];
                for &child in record.children() {
                    value += messages[child][pattern & overlap_mask].best;
                }
                if free.is_empty() || better(value, best) {
                    best = value;
                    free.clear();
                    free.push(choice);
                } else if approx_equal(value, best) {
                    free.push(choice);
                }
            }
            entries.push(MessageEntry { best, free });
        }
        messages[index] = entries;
    }

    // The root has no overlap with a parent; its message degenerates to the
    // optimal score plus the tied local patterns.
    let root = &tree.records()[0];
    let mut score = f64::NEG_INFINITY;
    let mut root_ties = Vec::new();
    for pattern in 0..1usize << k {
        let mut value = tables[0][pattern];
        for &child in root.children() {
            value += messages[child][pattern & overlap_mask].best;
        }
        if root_ties.is_empty() || better(value, score) {
            score = value;
            root_ties.clear();
            root_ties.push(pattern);
        } else if approx_equal(value, score) {
            root_ties.push(pattern);
        }
    }

    // Top-down expansion: every clique's fresh variables are unassigned when
    // it is reached, so each tied choice branches without conflicts.
    let l = tree.num_variables() as usize;
    let mut optima: Vec<Vec<u8>> = Vec::with_capacity(root_ties.len());
    for &pattern in &root_ties {
        let mut solution = vec![0u8; l];
        write_pattern(&mut solution, root.variables(), pattern, k);
        optima.push(solution);
    }
    for index in 1..m {
        let record = &tree.records()[index];
        let mut expanded = Vec::with_capacity(optima.len());
        for solution in &optima {
            let overlap = read_pattern(solution, &record.variables()[..o]);
            for &choice in &messages[index][overlap].free {
                let mut next = solution.clone();
                write_pattern(&mut next, &record.variables()[o..], choice, free_bits);
                expanded.push(next);
            }
        }
        optima = expanded;
    }

    let mut seen = BTreeSet::new();
    for solution in &optima {
        if !seen.insert(solution.clone()) {
            return Err(TdmkError::Invariant(
                ErrorInfo::new("duplicate-optimum", "optimum expansion produced a repeated assignment")
                    .with_context("count", optima.len().to_string()),
            ));
        }
    }

    Ok(GroundTruth { score, optima })
}

fn write_pattern(solution: &mut [u8], variables: &[u32], pattern: usize, width: usize) {
    for (position, &variable) in variables.iter().enumerate() {
        solution[variable as usize] = ((pattern >> (width - 1 - position)) & 1) as u8;
    }
}

fn read_pattern(solution: &[u8], variables: &[u32]) -> usize {
    variables
        .iter()
        .fold(0usize, |pattern, &variable| {
            (pattern << 1) | solution[variable as usize] as usize
        })
}
