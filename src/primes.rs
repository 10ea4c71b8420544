//! Prime implicant generation by Quine–McCluskey adjacency reduction.

use std::collections::{BTreeSet, HashMap, HashSet};

use itertools::Itertools;
use log::{debug, trace};

use crate::implicant::Implicant;
use crate::truth_table::TruthTable;

type GroupTable = HashMap<u32, Vec<Implicant>>;

/// This function computes all prime implicants of a truth table
///
/// # Arguments
/// * `table` - The function to reduce; One and DontCare entries both seed the reduction
///
/// # Output
/// The deduplicated prime implicants sorted by `(value, mask)`.
/// Primes covering only don't-cares are left out, they are never needed in a cover.
///
/// # Examples
/// ```
/// use kmap_sop::{prime_implicants, Implicant, TruthTable};
///
/// // F(A, B) = A'B' + AB' + AB
/// let table = TruthTable::from_terms(2, &[0, 2, 3], &[]).unwrap();
/// assert_eq!(
///     prime_implicants(&table),
///     [Implicant::new(0b00, 0b10), Implicant::new(0b10, 0b01)]
/// );
/// ```
pub fn prime_implicants(table: &TruthTable) -> Vec<Implicant> {
    let n_variables = table.n_variables();

    let mut level: BTreeSet<Implicant> = (0..table.len() as u32)
        .filter(|&i| table.kind(i).is_coverable())
        .map(Implicant::minterm)
        .collect();
    let mut primes: BTreeSet<Implicant> = BTreeSet::new();
    let mut depth = 0;

    // Reduce while neighbouring groups still combine; every level doubles the span
    while !level.is_empty() {
        debug_assert!(depth <= n_variables, "reduction ran past {} levels", n_variables + 1);

        // group by number of set value bits, only neighbouring groups can differ in one bit
        let mut group_table: GroupTable = HashMap::new();
        for implicant in &level {
            group_table
                .entry(implicant.value.count_ones())
                .or_default()
                .push(*implicant);
        }

        let mut combined: HashSet<Implicant> = HashSet::new();
        let mut next_level: BTreeSet<Implicant> = BTreeSet::new();

        for (g1, g2) in group_table.keys().sorted().tuple_windows() {
            if g2 - g1 != 1 {
                continue;
            }
            for low in &group_table[g1] {
                for high in &group_table[g2] {
                    if let Some(merged) = low.combine(high) {
                        // same merge reached from different pairs is kept once
                        next_level.insert(merged);
                        combined.insert(*low);
                        combined.insert(*high);
                    }
                }
            }
        }

        let before = primes.len();
        primes.extend(level.iter().filter(|i| !combined.contains(i)));
        trace!(
            "level {}: {} implicants, {} combined into {}, {} new primes",
            depth,
            level.len(),
            combined.len(),
            next_level.len(),
            primes.len() - before
        );

        level = next_level;
        depth += 1;
    }

    let ones = table.ones_bits();
    let total = primes.len();
    let primes: Vec<Implicant> = primes
        .into_iter()
        .filter(|p| p.covered_bits(n_variables) & ones != 0)
        .collect();
    debug!(
        "{} prime implicants after {} levels ({} don't-care-only primes dropped)",
        primes.len(),
        depth,
        total - primes.len()
    );

    primes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn primes_of(n: usize, minterms: &[u32], dont_cares: &[u32]) -> Vec<Implicant> {
        prime_implicants(&TruthTable::from_terms(n, minterms, dont_cares).unwrap())
    }

    #[test]
    fn all_ones_collapse_to_one_prime() {
        let all: Vec<u32> = (0..8).collect();
        assert_eq!(primes_of(3, &all, &[]), [Implicant::new(0, 0b111)]);
    }

    #[test]
    fn no_ones_means_no_primes() {
        assert!(primes_of(3, &[], &[]).is_empty());
        assert!(primes_of(3, &[], &[1, 3, 5]).is_empty());
    }

    #[test]
    fn xor_has_two_single_minterm_primes() {
        assert_eq!(
            primes_of(2, &[1, 2], &[]),
            [Implicant::minterm(1), Implicant::minterm(2)]
        );
    }

    #[test]
    fn dont_cares_enlarge_primes() {
        // ones 0..7, don't-cares 8..11: the primes are !A and !B
        let primes = primes_of(4, &[0, 1, 2, 3, 4, 5, 6, 7], &[8, 9, 10, 11]);
        assert_eq!(
            primes,
            [Implicant::new(0, 0b0111), Implicant::new(0, 0b1011)]
        );
    }

    #[test]
    fn dont_care_only_primes_are_dropped() {
        // 15 is a don't-care far from the only one
        let primes = primes_of(4, &[0], &[15]);
        assert_eq!(primes, [Implicant::minterm(0)]);
    }

    #[test]
    fn classic_four_variable_example() {
        // F = sum m(4, 8, 10, 11, 12, 15) + d(9, 14)
        let primes = primes_of(4, &[4, 8, 10, 11, 12, 15], &[9, 14]);
        assert_eq!(
            primes,
            [
                Implicant::new(0b0100, 0b1000), // B.!C.!D
                Implicant::new(0b1000, 0b0011), // A.!B
                Implicant::new(0b1000, 0b0110), // A.!D
                Implicant::new(0b1010, 0b0101), // A.C
            ]
        );
    }

    #[test]
    fn primes_cannot_be_combined_further() {
        let primes = primes_of(5, &[0, 2, 5, 7, 8, 10, 13, 15, 16, 21, 29, 31], &[1, 23]);
        let table = TruthTable::from_terms(5, &[0, 2, 5, 7, 8, 10, 13, 15, 16, 21, 29, 31], &[1, 23])
            .unwrap();
        for p in &primes {
            for bit in (0..5).map(|b| 1u32 << b).filter(|b| p.mask & b == 0) {
                let widened = Implicant::new(p.value, p.mask | bit);
                let valid = widened
                    .covered(5)
                    .iter()
                    .all(|&i| table.kind(i).is_coverable());
                assert!(!valid, "{:?} widens to {:?}", p, widened);
            }
        }
    }
}
