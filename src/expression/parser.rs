//! Recursive-descent parser.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! or      := xor (OR xor)*
//! xor     := and (XOR and)*
//! and     := unary (AND? unary)*
//! unary   := NOT unary | postfix
//! postfix := primary '*
//! primary := variable | 0 | 1 | '(' or ')'
//! ```

use super::lexer::{Token, TokenKind};
use super::Expr;
use crate::error::{KmapError, Result};
use crate::variables::VariableSet;

pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    variables: &'a VariableSet,
    pos: usize,
    end: usize,
}

impl<'a> Parser<'a> {
    /// `end` is the character length of the input, reported for errors at end of input.
    pub fn new(tokens: &'a [Token], variables: &'a VariableSet, end: usize) -> Self {
        Parser {
            tokens,
            variables,
            pos: 0,
            end,
        }
    }

    pub fn parse(mut self) -> Result<Expr> {
        let expr = self.or_expr()?;
        match self.peek() {
            None => Ok(expr),
            Some(Token {
                kind: TokenKind::RParen,
                position,
            }) => Err(KmapError::parse(*position, "unbalanced `)`")),
            Some(token) => Err(KmapError::parse(
                token.position,
                format!("expected an operator, found {}", describe(&token.kind)),
            )),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or_expr(&mut self) -> Result<Expr> {
        let mut operands = vec![self.xor_expr()?];
        while self.eat(&TokenKind::Or) {
            operands.push(self.xor_expr()?);
        }
        Ok(fold(operands, Expr::Or))
    }

    fn xor_expr(&mut self) -> Result<Expr> {
        let mut operands = vec![self.and_expr()?];
        while self.eat(&TokenKind::Xor) {
            operands.push(self.and_expr()?);
        }
        Ok(fold(operands, Expr::Xor))
    }

    fn and_expr(&mut self) -> Result<Expr> {
        let mut operands = vec![self.unary()?];
        loop {
            if self.eat(&TokenKind::And) {
                operands.push(self.unary()?);
            } else if self.peek().is_some_and(|t| starts_operand(&t.kind)) {
                // juxtaposition
                operands.push(self.unary()?);
            } else {
                break;
            }
        }
        Ok(fold(operands, Expr::And))
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.eat(&TokenKind::Not) {
            return Ok(self.unary()?.negate());
        }
        let mut expr = self.primary()?;
        while self.eat(&TokenKind::Prime) {
            expr = expr.negate();
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr> {
        let Some(token) = self.peek() else {
            return Err(KmapError::parse(
                self.end,
                "expected a variable, a constant, `(` or NOT, found end of input",
            ));
        };

        match &token.kind {
            TokenKind::Variable(name) => {
                self.pos += 1;
                let var = self
                    .variables
                    .index_of(name)
                    .ok_or_else(|| KmapError::UnknownVariable {
                        name: name.clone(),
                        position: token.position,
                    })?;
                Ok(Expr::Literal {
                    var,
                    negated: false,
                })
            }
            TokenKind::Const(value) => {
                self.pos += 1;
                Ok(Expr::Const(*value))
            }
            TokenKind::LParen => {
                self.pos += 1;
                let inner = self.or_expr()?;
                if !self.eat(&TokenKind::RParen) {
                    let position = self.peek().map_or(self.end, |t| t.position);
                    return Err(KmapError::parse(
                        position,
                        format!("expected `)` to close `(` at position {}", token.position),
                    ));
                }
                Ok(inner)
            }
            other => Err(KmapError::parse(
                token.position,
                format!(
                    "expected a variable, a constant, `(` or NOT, found {}",
                    describe(other)
                ),
            )),
        }
    }
}

fn starts_operand(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Variable(_) | TokenKind::Const(_) | TokenKind::LParen | TokenKind::Not
    )
}

fn fold(mut operands: Vec<Expr>, build: fn(Vec<Expr>) -> Expr) -> Expr {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        build(operands)
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Variable(name) => format!("variable `{}`", name),
        TokenKind::Const(value) => format!("constant `{}`", u8::from(*value)),
        TokenKind::And => "AND".to_string(),
        TokenKind::Or => "OR".to_string(),
        TokenKind::Xor => "XOR".to_string(),
        TokenKind::Not => "NOT".to_string(),
        TokenKind::Prime => "`'`".to_string(),
        TokenKind::LParen => "`(`".to_string(),
        TokenKind::RParen => "`)`".to_string(),
    }
}
