//! Truth tables indexed by assignment.

use std::collections::BTreeSet;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{KmapError, Result};
use crate::expression::Expr;
use crate::variables::MAX_VARIABLES;

/// Output of the function at one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKind {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "X")]
    DontCare,
}

impl TermKind {
    /// One or DontCare: usable inside an implicant.
    pub fn is_coverable(self) -> bool {
        matches!(self, TermKind::One | TermKind::DontCare)
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            TermKind::One => "1",
            TermKind::Zero => "0",
            TermKind::DontCare => "X",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TruthTable {
    kinds: Vec<TermKind>,
}

fn check_variable_count(n_variables: usize) -> Result<u32> {
    if n_variables == 0 {
        return Err(KmapError::EmptyInput("no variables declared"));
    }
    if n_variables > MAX_VARIABLES {
        return Err(KmapError::TooManyVariables { count: n_variables });
    }
    Ok(1 << n_variables)
}

fn check_range(indices: &[u32], limit: u32) -> Result<()> {
    match indices.iter().find(|&&i| i >= limit) {
        Some(&index) => Err(KmapError::TermOutOfRange { index, limit }),
        None => Ok(()),
    }
}

impl TruthTable {
    /// Evaluates `expr` at every assignment; `dont_cares` override the result.
    pub fn from_expression(expr: &Expr, n_variables: usize, dont_cares: &[u32]) -> Result<Self> {
        let limit = check_variable_count(n_variables)?;
        check_range(dont_cares, limit)?;

        let mut kinds: Vec<TermKind> = (0..limit)
            .map(|a| {
                if expr.eval(a, n_variables) {
                    TermKind::One
                } else {
                    TermKind::Zero
                }
            })
            .collect();
        for &i in dont_cares {
            kinds[i as usize] = TermKind::DontCare;
        }

        let table = TruthTable { kinds };
        debug!(
            "truth table from expression: {} ones, {} don't-cares over {} variables",
            table.ones().len(),
            dont_cares.len(),
            n_variables
        );
        Ok(table)
    }

    /// Builds a table from explicit index lists; every other index is Zero.
    ///
    /// Duplicates inside a list are harmless, but an index may not appear in
    /// both lists.
    pub fn from_terms(n_variables: usize, minterms: &[u32], dont_cares: &[u32]) -> Result<Self> {
        let limit = check_variable_count(n_variables)?;
        check_range(minterms, limit)?;
        check_range(dont_cares, limit)?;

        let ones: BTreeSet<u32> = minterms.iter().copied().collect();
        if let Some(&index) = dont_cares.iter().find(|i| ones.contains(i)) {
            return Err(KmapError::ConflictingTerm { index });
        }

        let mut kinds = vec![TermKind::Zero; limit as usize];
        for &i in &ones {
            kinds[i as usize] = TermKind::One;
        }
        for &i in dont_cares {
            kinds[i as usize] = TermKind::DontCare;
        }
        Ok(TruthTable { kinds })
    }

    pub fn n_variables(&self) -> usize {
        self.kinds.len().trailing_zeros() as usize
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn kinds(&self) -> &[TermKind] {
        &self.kinds
    }

    pub fn kind(&self, index: u32) -> TermKind {
        self.kinds[index as usize]
    }

    fn indices(&self, kind: TermKind) -> Vec<u32> {
        (0..self.kinds.len() as u32)
            .filter(|&i| self.kind(i) == kind)
            .collect()
    }

    pub fn ones(&self) -> Vec<u32> {
        self.indices(TermKind::One)
    }

    pub fn zeros(&self) -> Vec<u32> {
        self.indices(TermKind::Zero)
    }

    pub fn dont_cares(&self) -> Vec<u32> {
        self.indices(TermKind::DontCare)
    }

    /// Ones as a bitset over assignment indices (bit `i` is assignment `i`).
    pub fn ones_bits(&self) -> u32 {
        self.ones().iter().fold(0, |acc, &i| acc | (1 << i))
    }
}

/// Parses a list of decimal indices separated by commas and/or whitespace.
///
/// # Examples
/// ```
/// use kmap_sop::parse_index_list;
///
/// assert_eq!(parse_index_list("1, 3 7,11").unwrap(), [1, 3, 7, 11]);
/// assert!(parse_index_list("").unwrap().is_empty());
/// assert_eq!(parse_index_list("1, x").unwrap_err().position(), Some(3));
/// ```
pub fn parse_index_list(text: &str) -> Result<Vec<u32>> {
    let mut indices = Vec::new();
    let mut start = None;

    // a trailing separator flushes the last token
    for (pos, c) in text.chars().chain(std::iter::once(',')).enumerate() {
        if c == ',' || c.is_whitespace() {
            if let Some(s) = start.take() {
                let token: String = text.chars().skip(s).take(pos - s).collect();
                let index = token.parse::<u32>().map_err(|_| {
                    KmapError::parse(s, format!("expected a non-negative integer, found `{}`", token))
                })?;
                indices.push(index);
            }
        } else if start.is_none() {
            start = Some(pos);
        }
    }

    Ok(indices)
}
