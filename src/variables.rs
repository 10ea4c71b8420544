//! Ordered variable declarations.
//!
//! The position of a variable in a [`VariableSet`] fixes its bit in every
//! assignment index: the first variable is the most significant bit, so for
//! `F(A, B, C)` the index `0b100` means `A = 1, B = 0, C = 0`.

use serde::Serialize;
use std::fmt;

use crate::error::{KmapError, Result};

/// Largest number of variables a K-map is built for.
pub const MAX_VARIABLES: usize = 5;

const DEFAULT_NAMES: [&str; MAX_VARIABLES] = ["A", "B", "C", "D", "E"];

// Operator words that can never be used as variable names.
const RESERVED: [&str; 4] = ["AND", "OR", "NOT", "XOR"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VariableSet {
    names: Vec<String>,
}

impl VariableSet {
    /// Declares variables in bit order, most significant first.
    ///
    /// Names must start with an ASCII letter, contain only ASCII
    /// alphanumerics, and be unique ignoring case.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(KmapError::EmptyInput("no variables declared"));
        }
        if names.len() > MAX_VARIABLES {
            return Err(KmapError::TooManyVariables { count: names.len() });
        }

        for (i, name) in names.iter().enumerate() {
            let well_formed = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && name.chars().all(|c| c.is_ascii_alphanumeric());
            let reserved = RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name));
            let duplicate = names[..i].iter().any(|n| n.eq_ignore_ascii_case(name));
            if !well_formed || reserved || duplicate {
                return Err(KmapError::InvalidVariable { name: name.clone() });
            }
        }

        Ok(VariableSet { names })
    }

    /// The first `n` of `A..E`.
    pub fn alphabetic(n: usize) -> Result<Self> {
        if n > MAX_VARIABLES {
            return Err(KmapError::TooManyVariables { count: n });
        }
        VariableSet::new(DEFAULT_NAMES[..n].iter().copied())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, var: usize) -> &str {
        &self.names[var]
    }

    /// Case-insensitive lookup.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.eq_ignore_ascii_case(name))
    }

    /// Bit of the assignment index that holds variable `var`.
    pub fn bit(&self, var: usize) -> u32 {
        1 << (self.len() - 1 - var)
    }

    /// Longest declared name that `word` starts with, as `(variable, length)`.
    pub(crate) fn longest_prefix(&self, word: &str) -> Option<(usize, usize)> {
        self.names
            .iter()
            .enumerate()
            .filter(|(_, n)| {
                word.len() >= n.len() && word[..n.len()].eq_ignore_ascii_case(n)
            })
            .max_by_key(|(_, n)| n.len())
            .map(|(i, n)| (i, n.len()))
    }
}

impl fmt::Display for VariableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn first_variable_is_most_significant() {
        let vars = VariableSet::new(["A", "B", "C"]).unwrap();
        assert_eq!(vars.bit(0), 0b100);
        assert_eq!(vars.bit(2), 0b001);
    }

    #[test]
    fn lookup_ignores_case() {
        let vars = VariableSet::new(["clk", "En"]).unwrap();
        assert_eq!(vars.index_of("CLK"), Some(0));
        assert_eq!(vars.index_of("en"), Some(1));
        assert_eq!(vars.index_of("q"), None);
    }

    #[test]
    fn longest_prefix_prefers_longer_names() {
        let vars = VariableSet::new(["A", "AB", "C"]).unwrap();
        assert_eq!(vars.longest_prefix("ABC"), Some((1, 2)));
        assert_eq!(vars.longest_prefix("ac"), Some((0, 1)));
        assert_eq!(vars.longest_prefix("Q"), None);
    }

    #[test]
    fn alphabetic_defaults() {
        let vars = VariableSet::alphabetic(4).unwrap();
        assert_eq!(vars.to_string(), "A,B,C,D");
    }

    #[rstest]
    #[case(vec![], KmapError::EmptyInput("no variables declared"))]
    #[case(vec!["A", "B", "C", "D", "E", "F"], KmapError::TooManyVariables { count: 6 })]
    #[case(vec!["A", "a"], KmapError::InvalidVariable { name: "a".into() })]
    #[case(vec!["1A"], KmapError::InvalidVariable { name: "1A".into() })]
    #[case(vec!["A-B"], KmapError::InvalidVariable { name: "A-B".into() })]
    #[case(vec!["or"], KmapError::InvalidVariable { name: "or".into() })]
    fn rejects_bad_declarations(#[case] names: Vec<&str>, #[case] expected: KmapError) {
        assert_eq!(VariableSet::new(names).unwrap_err(), expected);
    }
}
