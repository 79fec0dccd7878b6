//! Tokenizer for pay component formulas.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// A formula token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A decimal literal.
    Number(Decimal),
    /// A variable, function name or keyword.
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,
    /// End of input.
    End,
}

impl Token {
    /// How the token is shown in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Ident(name) => format!("'{}'", name),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Lt => "'<'".to_string(),
            Token::Le => "'<='".to_string(),
            Token::Gt => "'>'".to_string(),
            Token::Ge => "'>='".to_string(),
            Token::EqEq => "'=='".to_string(),
            Token::NotEq => "'!='".to_string(),
            Token::End => "end of input".to_string(),
        }
    }
}

/// A token with the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The token.
    pub token: Token,
    /// Byte offset into the formula.
    pub position: usize,
}

/// Splits a formula into tokens, always ending with [`Token::End`].
pub fn tokenize(input: &str) -> EngineResult<Vec<Spanned>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        let start = pos;

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        if c.is_ascii_digit() {
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos < bytes.len() && bytes[pos] == b'.' {
                pos += 1;
                let fraction_start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                if pos == fraction_start {
                    return Err(EngineError::ParseError {
                        position: start,
                        message: "malformed number".to_string(),
                    });
                }
            }
            let text = &input[start..pos];
            let value = Decimal::from_str(text).map_err(|_| EngineError::ParseError {
                position: start,
                message: format!("number '{}' is out of range", text),
            })?;
            tokens.push(Spanned {
                token: Token::Number(value),
                position: start,
            });
            continue;
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                pos += 1;
            }
            tokens.push(Spanned {
                token: Token::Ident(input[start..pos].to_string()),
                position: start,
            });
            continue;
        }

        let next = bytes.get(pos + 1).copied();
        let (token, width) = match (c, next) {
            (b'<', Some(b'=')) => (Token::Le, 2),
            (b'>', Some(b'=')) => (Token::Ge, 2),
            (b'=', Some(b'=')) => (Token::EqEq, 2),
            (b'!', Some(b'=')) => (Token::NotEq, 2),
            (b'<', _) => (Token::Lt, 1),
            (b'>', _) => (Token::Gt, 1),
            (b'+', _) => (Token::Plus, 1),
            (b'-', _) => (Token::Minus, 1),
            (b'*', _) => (Token::Star, 1),
            (b'/', _) => (Token::Slash, 1),
            (b'(', _) => (Token::LParen, 1),
            (b')', _) => (Token::RParen, 1),
            (b',', _) => (Token::Comma, 1),
            _ => {
                let ch = input[start..].chars().next().unwrap_or('?');
                return Err(EngineError::ParseError {
                    position: start,
                    message: format!("unexpected character '{}'", ch),
                });
            }
        };
        tokens.push(Spanned {
            token,
            position: start,
        });
        pos += width;
    }

    tokens.push(Spanned {
        token: Token::End,
        position: input.len(),
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_tokenize_percentage_formula() {
        assert_eq!(
            kinds("basic * 0.0550"),
            vec![
                Token::Ident("basic".to_string()),
                Token::Star,
                Token::Number(Decimal::new(550, 4)),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_tokenize_comparisons() {
        assert_eq!(
            kinds("< <= > >= == !="),
            vec![
                Token::Lt,
                Token::Le,
                Token::Gt,
                Token::Ge,
                Token::EqEq,
                Token::NotEq,
                Token::End,
            ]
        );
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let tokens = tokenize("max(basic, 10)").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 3, 4, 9, 11, 13, 14]);
    }

    #[test]
    fn test_single_equals_rejected() {
        let err = tokenize("basic = 1").unwrap_err();
        assert_eq!(
            err,
            EngineError::ParseError {
                position: 6,
                message: "unexpected character '='".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_numbers_rejected() {
        assert!(tokenize("5.").is_err());
        assert!(tokenize(".5").is_err());
        assert!(tokenize("1.2.3").is_err());
    }

    #[test]
    fn test_out_of_range_number_rejected() {
        let err = tokenize("99999999999999999999999999999999").unwrap_err();
        assert!(matches!(err, EngineError::ParseError { position: 0, .. }));
    }

    #[test]
    fn test_empty_input_is_just_end() {
        assert_eq!(kinds("   "), vec![Token::End]);
    }
}
