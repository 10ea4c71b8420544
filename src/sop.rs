//! Textual sum-of-products rendering.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::implicant::Implicant;
use crate::variables::VariableSet;

/// How a minimized expression is written out. Every notation parses back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Notation {
    /// `A.!B + C`
    #[default]
    Canonical,
    /// `A·B' + C`
    Prime,
    /// `A AND NOT B OR C`
    Word,
}

impl Notation {
    fn literal(self, name: &str, positive: bool) -> String {
        match (self, positive) {
            (_, true) => name.to_string(),
            (Notation::Canonical, false) => format!("!{}", name),
            (Notation::Prime, false) => format!("{}'", name),
            (Notation::Word, false) => format!("NOT {}", name),
        }
    }

    fn and(self) -> &'static str {
        match self {
            Notation::Canonical => ".",
            Notation::Prime => "·",
            Notation::Word => " AND ",
        }
    }

    fn or(self) -> &'static str {
        match self {
            Notation::Canonical | Notation::Prime => " + ",
            Notation::Word => " OR ",
        }
    }
}

/// A single product term; `1` when every variable is generalized away.
pub fn term(implicant: &Implicant, variables: &VariableSet, notation: Notation) -> String {
    let literals = implicant.literals(variables.len());
    if literals.is_empty() {
        return "1".to_string();
    }
    literals
        .into_iter()
        .map(|(var, positive)| notation.literal(variables.name(var), positive))
        .join(notation.and())
}

/// The sum of `implicants`; `0` for an empty sum.
///
/// Terms are listed in variable order: a term starting with `A` comes before
/// one starting with `!A`, which comes before one starting with `B`.
///
/// # Examples
/// ```
/// use kmap_sop::{sop, Implicant, Notation, VariableSet};
///
/// let vars = VariableSet::new(["A", "B", "C", "D"]).unwrap();
/// let terms = [Implicant::new(0b1100, 0b0000), Implicant::new(0b0001, 0b1100)];
/// assert_eq!(sop(&terms, &vars, Notation::Canonical), "A.B.!C.!D + !C.D");
/// assert_eq!(sop(&terms, &vars, Notation::Prime), "A·B·C'·D' + C'·D");
/// assert_eq!(sop(&[], &vars, Notation::Word), "0");
/// ```
pub fn sop(implicants: &[Implicant], variables: &VariableSet, notation: Notation) -> String {
    if implicants.is_empty() {
        return "0".to_string();
    }
    implicants
        .iter()
        .sorted_by_cached_key(|i| {
            i.literals(variables.len())
                .into_iter()
                .map(|(var, positive)| (var, !positive))
                .collect::<Vec<_>>()
        })
        .map(|i| term(i, variables, notation))
        .join(notation.or())
}
