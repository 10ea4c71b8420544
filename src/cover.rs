//! Minimum cost selection of prime implicants.
//!
//! Essential primes are taken first; the remaining ones are covered by an
//! exact branch-and-bound search. Covers are ranked by implicant count, then
//! total literal count, then by the sorted `(value, mask)` sequence of their
//! implicants, so the result is deterministic.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use log::debug;
use serde::Serialize;

use crate::implicant::Implicant;
use crate::truth_table::TruthTable;

/// Selected prime implicants, as ids into the prime implicant list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cover {
    /// Primes that are the only cover of some one
    pub essential: Vec<usize>,
    /// Every selected prime, essential ones included, ascending
    pub selected: Vec<usize>,
}

impl Cover {
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// `(implicant count, literal count)`, smaller is better.
    pub fn cost(&self, primes: &[Implicant], n_variables: usize) -> (usize, usize) {
        let literals = self
            .selected
            .iter()
            .map(|&id| primes[id].literal_count(n_variables))
            .sum();
        (self.selected.len(), literals)
    }
}

/// This function selects a minimum cost cover of the table's ones
///
/// # Arguments
/// * `primes` - The prime implicants of `table`, sorted by `(value, mask)` as
///   [`prime_implicants`](crate::prime_implicants) returns them
/// * `table` - The function being covered
///
/// # Output
/// The essential primes and the full selection. A table without ones yields an
/// empty cover, the constant 0.
///
/// # Examples
/// ```
/// use kmap_sop::{minimal_cover, prime_implicants, TruthTable};
///
/// // F(A, B, C) = sum m(0, 1, 2, 5, 6, 7): a cyclic core, no essentials
/// let table = TruthTable::from_terms(3, &[0, 1, 2, 5, 6, 7], &[]).unwrap();
/// let primes = prime_implicants(&table);
/// let cover = minimal_cover(&primes, &table);
/// assert!(cover.essential.is_empty());
/// assert_eq!(cover.cost(&primes, 3), (3, 6));
/// ```
pub fn minimal_cover(primes: &[Implicant], table: &TruthTable) -> Cover {
    let n_variables = table.n_variables();
    let ones = table.ones_bits();
    if ones == 0 {
        return Cover::default();
    }

    let coverage: Vec<u32> = primes
        .iter()
        .map(|p| p.covered_bits(n_variables) & ones)
        .collect();

    // for every one: how many primes cover it, and which
    let mut cover_matrix: HashMap<u32, (usize, Vec<usize>)> = HashMap::new();
    for (id, bits) in coverage.iter().enumerate() {
        for one in set_bits(*bits) {
            let (counter, ids) = cover_matrix.entry(one).or_insert((0, Vec::new()));
            *counter += 1;
            ids.push(id);
        }
    }

    let essential: BTreeSet<usize> = cover_matrix
        .values()
        .filter(|(counter, _)| *counter == 1)
        .map(|(_, ids)| ids[0])
        .collect();

    let covered = essential.iter().fold(0, |acc, &id| acc | coverage[id]);
    let remaining = ones & !covered;

    let candidates: Vec<usize> = (0..primes.len())
        .filter(|id| !essential.contains(id) && coverage[*id] & remaining != 0)
        .collect();

    let mut search = Search {
        primes,
        coverage: &coverage,
        candidates: &candidates,
        n_variables,
        best: None,
        nodes: 0,
    };
    if remaining != 0 {
        search.explore(remaining, &mut Vec::new(), 0);
    }
    debug!(
        "{} essential primes, {} candidates for {} uncovered ones, {} search nodes",
        essential.len(),
        candidates.len(),
        remaining.count_ones(),
        search.nodes
    );

    let mut selected: Vec<usize> = essential.iter().copied().collect();
    if let Some(best) = search.best {
        selected.extend(best.ids);
    }
    selected.sort_unstable();

    Cover {
        essential: essential.into_iter().collect(),
        selected,
    }
}

fn set_bits(bits: u32) -> impl Iterator<Item = u32> {
    (0..u32::BITS).filter(move |i| bits & (1 << i) != 0)
}

#[derive(Debug, Clone)]
struct Selection {
    /// Sorted, so comparing ids compares the sorted `(value, mask)` sequence
    ids: Vec<usize>,
    literals: usize,
}

impl Selection {
    fn rank(&self, other: &Selection) -> Ordering {
        (self.ids.len(), self.literals, &self.ids).cmp(&(other.ids.len(), other.literals, &other.ids))
    }
}

struct Search<'a> {
    primes: &'a [Implicant],
    coverage: &'a [u32],
    candidates: &'a [usize],
    n_variables: usize,
    best: Option<Selection>,
    nodes: usize,
}

impl Search<'_> {
    /// Candidates covering assignment `one`.
    fn options(&self, one: u32) -> impl Iterator<Item = usize> + '_ {
        self.candidates
            .iter()
            .copied()
            .filter(move |&id| self.coverage[id] & (1 << one) != 0)
    }

    /// Branches on the uncovered one with the fewest candidates: any cover must
    /// take one of them, so every minimum cover is reached.
    fn explore(&mut self, uncovered: u32, chosen: &mut Vec<usize>, literals: usize) {
        self.nodes += 1;

        if uncovered == 0 {
            let mut ids = chosen.clone();
            ids.sort_unstable();
            let found = Selection { ids, literals };
            let better = self
                .best
                .as_ref()
                .map_or(true, |best| found.rank(best) == Ordering::Less);
            if better {
                self.best = Some(found);
            }
            return;
        }

        // at least one more implicant is needed
        if let Some(best) = &self.best {
            let count = chosen.len() + 1;
            if count > best.ids.len() || (count == best.ids.len() && literals > best.literals) {
                return;
            }
        }

        let Some(pivot) = set_bits(uncovered).min_by_key(|&one| self.options(one).count()) else {
            return;
        };
        let branches: Vec<usize> = self.options(pivot).collect();

        for id in branches {
            chosen.push(id);
            let cost = self.primes[id].literal_count(self.n_variables);
            self.explore(uncovered & !self.coverage[id], chosen, literals + cost);
            chosen.pop();
        }
    }
}
