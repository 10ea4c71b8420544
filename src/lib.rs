//! This library minimizes boolean functions of up to five variables into a
//! sum of products and lays them out as a Karnaugh map.
//!
//! # Example
//! Consider the following boolean function
//!
//! | A | B || F |
//! |---|---||---|
//! | 0 | 0 || 1 |
//! | 0 | 1 || 0 |
//! | 1 | 0 || 1 |
//! | 1 | 1 || 0 |
//!
//! ```
//! use kmap_sop::{minimize, MinimizeRequest, Options};
//!
//! // the same function, written two ways
//! let from_terms = MinimizeRequest::terms(&[0, 2], &[]).with_variable_count(2);
//! let from_text = MinimizeRequest::expression("A'B' + AB'");
//!
//! for request in [from_terms, from_text] {
//!     let result = minimize(&request, &Options::default()).unwrap();
//!     assert_eq!(result.expression, "!B");
//!     assert_eq!(result.grid.groups[0].cells, [(0, 0), (1, 0)]);
//! }
//! ```
//! Which corresponds to the function `F = B'`.
//!
//! The pipeline runs text → [`Expr`] → [`TruthTable`] → [`prime_implicants`] →
//! [`minimal_cover`] → [`Grid`]; [`minimize`] runs all of it, and every stage is
//! public on its own.

pub mod cover;
pub mod error;
pub mod expression;
pub mod grid;
pub mod implicant;
pub mod minimize;
pub mod primes;
pub mod sop;
pub mod truth_table;
pub mod variables;

pub use cover::{minimal_cover, Cover};
pub use error::{KmapError, ParseError, Result};
pub use expression::{parse, Expr, ParsedExpression};
pub use grid::{Block, Grid, GridCell, Group, Layout, Rect};
pub use implicant::Implicant;
pub use minimize::{minimize, Input, MinimizeRequest, Minimization, Options, PrimeImplicant};
pub use primes::prime_implicants;
pub use sop::{sop, term, Notation};
pub use truth_table::{parse_index_list, TermKind, TruthTable};
pub use variables::{VariableSet, MAX_VARIABLES};

/// This function simplifies a function given by its minterms and don't-cares
///
/// # Arguments
/// * `minterms` - The assignments that evaluate to true
/// * `dont_cares` - The assignments whose value does not matter
/// * `n_variables` - Number of variables; assignment bit `n_variables - 1` is the first variable
///
/// # Output
/// The implicants of a minimal sum of products. An empty list is the constant 0,
/// a single implicant whose mask covers every bit is the constant 1.
///
/// # Examples
/// ```
/// use kmap_sop::{simplify, Implicant};
///
/// // F(A, B) = A'B' + AB' = B'
/// assert_eq!(simplify(&[0, 2], &[], 2).unwrap(), [Implicant::new(0b00, 0b10)]);
/// assert!(simplify(&[], &[], 3).unwrap().is_empty());
/// ```
pub fn simplify(minterms: &[u32], dont_cares: &[u32], n_variables: usize) -> Result<Vec<Implicant>> {
    let table = TruthTable::from_terms(n_variables, minterms, dont_cares)?;
    let primes = prime_implicants(&table);
    let cover = minimal_cover(&primes, &table);
    Ok(cover.selected.iter().map(|&id| primes[id]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn simplifies_if_all_one() {
        let minterms = (0..8).collect::<Vec<u32>>();
        assert_eq!(simplify(&minterms, &[], 3).unwrap(), [Implicant::new(0, 0b111)]);
    }

    #[test]
    fn simplifies_if_all_zero() {
        assert!(simplify(&[], &[], 3).unwrap().is_empty());
    }

    #[test]
    fn simplify_1() {
        //  0 0 | 1
        //  0 1 | 1
        //  1 0 | 0
        //  1 1 | 0
        //  A' is the minimal solution
        assert_eq!(simplify(&[0, 1], &[], 2).unwrap(), [Implicant::new(0b00, 0b01)]);
    }

    #[test]
    fn simplify_2() {
        //  0 0 | 0
        //  0 1 | 1
        //  1 0 | 1
        //  1 1 | 0
        //  A'B + AB' is the minimal solution
        assert_eq!(
            simplify(&[1, 2], &[], 2).unwrap(),
            [Implicant::minterm(0b01), Implicant::minterm(0b10)]
        );
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        let minterms = [1, 2, 10, 30, 16, 24, 30];
        let forward = simplify(&minterms, &[], 5).unwrap();
        let reversed: Vec<u32> = minterms.iter().rev().copied().collect();
        assert_eq!(forward, simplify(&reversed, &[], 5).unwrap());
    }

    #[test]
    fn rejects_bad_terms() {
        assert_eq!(
            simplify(&[3], &[3], 2).unwrap_err(),
            KmapError::ConflictingTerm { index: 3 }
        );
        assert!(matches!(
            simplify(&[], &[], 6),
            Err(KmapError::TooManyVariables { count: 6 })
        ));
    }
}
