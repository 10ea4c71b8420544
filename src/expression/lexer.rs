//! Tokenizer for the accepted expression notations

use crate::error::{KmapError, Result};
use crate::variables::VariableSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Canonical variable name: the declared spelling, or an upper-cased letter
    /// when variables are detected from the text.
    Variable(String),
    Const(bool),
    And,
    Or,
    Xor,
    Not,
    /// Postfix negation `'`
    Prime,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Character offset into the input
    pub position: usize,
}

fn symbol(c: char) -> Option<TokenKind> {
    let kind = match c {
        '+' | '|' | '∨' => TokenKind::Or,
        '.' | '*' | '&' | '·' | '∧' => TokenKind::And,
        '!' | '~' | '¬' => TokenKind::Not,
        '^' | '⊕' => TokenKind::Xor,
        '\'' | '’' => TokenKind::Prime,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        _ => return None,
    };
    Some(kind)
}

fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word.to_ascii_uppercase().as_str() {
        "AND" | "X" => TokenKind::And,
        "OR" | "U" | "V" => TokenKind::Or,
        "NOT" => TokenKind::Not,
        "XOR" => TokenKind::Xor,
        "TRUE" => TokenKind::Const(true),
        "FALSE" => TokenKind::Const(false),
        _ => return None,
    };
    Some(kind)
}

/// Splits `input` into tokens.
///
/// With `variables` declared, a word is a declared name, an operator word, or
/// a juxtaposition of declared names (`AB` is `A AND B`). Without them every
/// letter of a non-operator word is a variable of its own.
pub(crate) fn tokenize(input: &str, variables: Option<&VariableSet>) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() || c == '_' {
            i += 1;
        } else if c == '#' {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
        } else if let Some(kind) = symbol(c) {
            tokens.push(Token { kind, position: i });
            i += 1;
        } else if c.is_ascii_alphanumeric() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            lex_word(&word, start, variables, &mut tokens)?;
        } else {
            return Err(KmapError::parse(i, format!("unexpected character `{}`", c)));
        }
    }

    Ok(tokens)
}

fn lex_word(
    word: &str,
    position: usize,
    variables: Option<&VariableSet>,
    tokens: &mut Vec<Token>,
) -> Result<()> {
    if word.chars().all(|c| c.is_ascii_digit()) {
        let kind = match word {
            "0" => TokenKind::Const(false),
            "1" => TokenKind::Const(true),
            _ => {
                return Err(KmapError::parse(
                    position,
                    format!("expected a constant 0 or 1, found `{}`", word),
                ))
            }
        };
        tokens.push(Token { kind, position });
        return Ok(());
    }

    match variables {
        Some(vars) => {
            if let Some(var) = vars.index_of(word) {
                tokens.push(Token {
                    kind: TokenKind::Variable(vars.name(var).to_string()),
                    position,
                });
                return Ok(());
            }
            if let Some(kind) = keyword(word) {
                tokens.push(Token { kind, position });
                return Ok(());
            }

            // juxtaposed names, longest match first
            let mut offset = 0;
            while offset < word.len() {
                let rest = &word[offset..];
                match vars.longest_prefix(rest) {
                    Some((var, len)) => {
                        tokens.push(Token {
                            kind: TokenKind::Variable(vars.name(var).to_string()),
                            position: position + offset,
                        });
                        offset += len;
                    }
                    None if rest.starts_with(|c: char| c.is_ascii_digit()) => {
                        return Err(KmapError::parse(
                            position + offset,
                            format!("unexpected digits `{}`", rest),
                        ));
                    }
                    None => {
                        return Err(KmapError::UnknownVariable {
                            name: rest.to_string(),
                            position: position + offset,
                        });
                    }
                }
            }
        }
        None => {
            if let Some(kind) = keyword(word) {
                tokens.push(Token { kind, position });
                return Ok(());
            }
            for (offset, c) in word.chars().enumerate() {
                if !c.is_ascii_alphabetic() {
                    return Err(KmapError::parse(
                        position + offset,
                        format!("unexpected digit `{}` in variable name", c),
                    ));
                }
                tokens.push(Token {
                    kind: TokenKind::Variable(c.to_ascii_uppercase().to_string()),
                    position: position + offset,
                });
            }
        }
    }

    Ok(())
}
