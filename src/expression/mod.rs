//! Boolean expressions: syntax tree, parsing and evaluation.
//!
//! # Accepted notation
//!
//! All words are case-insensitive; whitespace and `_` are ignored and `#`
//! starts a comment running to the end of the line.
//!
//! | Operator | Spellings |
//! |----------|-----------|
//! | NOT (prefix) | `NOT`, `!`, `~`, `¬` |
//! | NOT (postfix) | `'` after a variable, constant or `)` |
//! | AND | `AND`, `.`, `*`, `&`, `·`, `∧`, `x`, juxtaposition (`AB`, `A(B+C)`) |
//! | XOR | `XOR`, `^`, `⊕` |
//! | OR | `OR`, `+`, `\|`, `U`, `V`, `∨` |
//!
//! Precedence is NOT > AND > XOR > OR, all binary operators associate to the
//! left, and `0`/`1` are constants.

mod lexer;
mod parser;

use itertools::Itertools;

use crate::error::{KmapError, Result};
use crate::variables::VariableSet;

use lexer::{tokenize, TokenKind};
use parser::Parser;

/// Syntax tree of a boolean expression.
///
/// Variables are referred to by their index in the [`VariableSet`] the
/// expression was parsed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Const(bool),
    Literal { var: usize, negated: bool },
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Xor(Vec<Expr>),
}

impl Expr {
    /// Negation, folded into literals and constants.
    pub fn negate(self) -> Expr {
        match self {
            Expr::Const(value) => Expr::Const(!value),
            Expr::Literal { var, negated } => Expr::Literal {
                var,
                negated: !negated,
            },
            other => Expr::Not(Box::new(other)),
        }
    }

    /// Evaluates the expression at an assignment index of `n_variables` bits.
    pub fn eval(&self, assignment: u32, n_variables: usize) -> bool {
        match self {
            Expr::Const(value) => *value,
            Expr::Literal { var, negated } => {
                let bit = (assignment >> (n_variables - 1 - var)) & 1 == 1;
                bit != *negated
            }
            Expr::Not(inner) => !inner.eval(assignment, n_variables),
            Expr::And(children) => children.iter().all(|c| c.eval(assignment, n_variables)),
            Expr::Or(children) => children.iter().any(|c| c.eval(assignment, n_variables)),
            Expr::Xor(children) => children
                .iter()
                .fold(false, |acc, c| acc ^ c.eval(assignment, n_variables)),
        }
    }
}

/// An expression together with the variables it was resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExpression {
    pub expr: Expr,
    pub variables: VariableSet,
}

/// Parses `input`.
///
/// With `variables` given, only those names may appear and their order fixes
/// the bit order. Without them every letter used is a variable, ordered
/// alphabetically.
///
/// # Examples
/// ```
/// use kmap_sop::expression::parse;
/// use kmap_sop::VariableSet;
///
/// let vars = VariableSet::new(["A", "B", "C"]).unwrap();
/// let parsed = parse("A.B + !C", Some(&vars)).unwrap();
/// assert!(parsed.expr.eval(0b110, 3));
/// assert!(!parsed.expr.eval(0b101, 3));
///
/// let detected = parse("b'a", None).unwrap();
/// assert_eq!(detected.variables.names(), ["A", "B"]);
/// ```
pub fn parse(input: &str, variables: Option<&VariableSet>) -> Result<ParsedExpression> {
    let tokens = tokenize(input, variables)?;
    if tokens.is_empty() {
        return Err(KmapError::EmptyInput("expression is blank"));
    }

    let variables = match variables {
        Some(vars) => vars.clone(),
        None => detect_variables(&tokens)?,
    };

    let end = input.chars().count();
    let expr = Parser::new(&tokens, &variables, end).parse()?;
    Ok(ParsedExpression { expr, variables })
}

fn detect_variables(tokens: &[lexer::Token]) -> Result<VariableSet> {
    let names: Vec<String> = tokens
        .iter()
        .filter_map(|t| match &t.kind {
            TokenKind::Variable(name) => Some(name.clone()),
            _ => None,
        })
        .sorted()
        .dedup()
        .collect();

    if names.is_empty() {
        return Err(KmapError::EmptyInput("no variables found in expression"));
    }
    VariableSet::new(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn abc() -> VariableSet {
        VariableSet::new(["A", "B", "C"]).unwrap()
    }

    fn lit(var: usize, negated: bool) -> Expr {
        Expr::Literal { var, negated }
    }

    fn ones(input: &str, vars: &VariableSet) -> Vec<u32> {
        let parsed = parse(input, Some(vars)).unwrap();
        (0..1u32 << vars.len())
            .filter(|&a| parsed.expr.eval(a, vars.len()))
            .collect()
    }

    #[test_log::test]
    fn and_binds_tighter_than_or() {
        let parsed = parse("A + B.C", Some(&abc())).unwrap();
        assert_eq!(
            parsed.expr,
            Expr::Or(vec![lit(0, false), Expr::And(vec![lit(1, false), lit(2, false)])])
        );
    }

    #[test_log::test]
    fn xor_sits_between_and_and_or() {
        let parsed = parse("A ^ B.C + A", Some(&abc())).unwrap();
        assert_eq!(
            parsed.expr,
            Expr::Or(vec![
                Expr::Xor(vec![lit(0, false), Expr::And(vec![lit(1, false), lit(2, false)])]),
                lit(0, false),
            ])
        );
    }

    #[test_log::test]
    fn chains_are_flattened() {
        let parsed = parse("A.B.C", Some(&abc())).unwrap();
        assert_eq!(
            parsed.expr,
            Expr::And(vec![lit(0, false), lit(1, false), lit(2, false)])
        );
    }

    #[test_log::test]
    fn negations_fold_into_literals() {
        let parsed = parse("!A''", Some(&abc())).unwrap();
        assert_eq!(parsed.expr, lit(0, true));
        let parsed = parse("(A+B)'", Some(&abc())).unwrap();
        assert_eq!(
            parsed.expr,
            Expr::Not(Box::new(Expr::Or(vec![lit(0, false), lit(1, false)])))
        );
    }

    #[test_log::test]
    fn juxtaposition_is_conjunction() {
        let vars = abc();
        assert_eq!(ones("AB'C", &vars), ones("A.!B.C", &vars));
        assert_eq!(ones("(A + B)(C' + A)", &vars), ones("(A + B) AND (NOT C OR A)", &vars));
        assert_eq!(ones("A(B+C)", &vars), vec![0b101, 0b110, 0b111]);
    }

    #[rstest]
    #[case("A.B + !C", "A*B+C'")]
    #[case("A AND B OR NOT C", "a b + ~c")]
    #[case("A XOR B", "A'B + AB'")]
    #[case("A ^ B ^ C", "(A ⊕ B) ⊕ C")]
    #[case("A U B", "A | B")]
    #[case("1", "A + !A")]
    fn notations_agree(#[case] left: &str, #[case] right: &str) {
        let vars = abc();
        assert_eq!(ones(left, &vars), ones(right, &vars));
    }

    #[test_log::test]
    fn detects_letters_in_alphabetical_order() {
        let parsed = parse("d + a'c", None).unwrap();
        assert_eq!(parsed.variables.names(), ["A", "C", "D"]);
    }

    #[test_log::test]
    fn detection_rejects_six_letters() {
        assert_eq!(
            parse("A + B + C + D + E + F", None).unwrap_err(),
            KmapError::TooManyVariables { count: 6 }
        );
    }

    #[rstest]
    #[case("", KmapError::EmptyInput("expression is blank"))]
    #[case("  # only a comment", KmapError::EmptyInput("expression is blank"))]
    #[case("1 + 0", KmapError::EmptyInput("no variables found in expression"))]
    fn empty_inputs(#[case] input: &str, #[case] expected: KmapError) {
        assert_eq!(parse(input, None).unwrap_err(), expected);
    }

    #[rstest]
    #[case("A + ", 4)]
    #[case("(A + B", 6)]
    #[case("A + B)", 5)]
    #[case("A + * B", 4)]
    #[case("A B C'(", 7)]
    fn syntax_errors_point_at_the_problem(#[case] input: &str, #[case] position: usize) {
        let err = parse(input, Some(&abc())).unwrap_err();
        assert!(matches!(err, KmapError::Parse(_)), "{:?}", err);
        assert_eq!(err.position(), Some(position));
    }

    #[test_log::test]
    fn undeclared_variable() {
        assert_eq!(
            parse("A + D", Some(&abc())).unwrap_err(),
            KmapError::UnknownVariable {
                name: "D".into(),
                position: 4
            }
        );
    }

    #[test_log::test]
    fn multi_letter_names() {
        let vars = VariableSet::new(["sel", "a", "b"]).unwrap();
        let mux = parse("!sel a + sel b", Some(&vars)).unwrap();
        assert!(mux.expr.eval(0b010, 3));
        assert!(!mux.expr.eval(0b110, 3));
        assert!(mux.expr.eval(0b101, 3));
    }
}
