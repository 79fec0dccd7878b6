//! Recursive-descent parser for pay component formulas.
//!
//! Grammar:
//!
//! ```text
//! expr        := conditional
//! conditional := additive ('if' bool_expr 'else' conditional)?
//! bool_expr   := additive (cmp_op additive)?
//! additive    := term (('+' | '-') term)*
//! term        := factor (('*' | '/') factor)*
//! factor      := number | variable | call | '(' expr ')'
//! call        := ident '(' expr (',' expr)? ')'
//! variable    := 'basic' | 'gross'
//! ```
//!
//! Only whitelisted functions and variables are accepted; anything else is
//! rejected here so evaluation never meets an unknown name.

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::ast::{BinaryOp, CmpOp, Condition, Expr, Function, Variable};
use super::lexer::{Spanned, Token, tokenize};

/// Deepest nesting of parentheses, calls and conditionals accepted.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Most arithmetic operators accepted in one formula. Operator chains nest
/// the tree one level per operator, so this also bounds its depth.
pub const MAX_OPERATORS: usize = 256;

/// Parses a formula into an [`Expr`].
///
/// # Errors
///
/// Returns [`EngineError::ParseError`] for empty input, unexpected tokens,
/// unbalanced parentheses, unknown identifiers, wrong function arity and
/// formulas nested deeper than [`MAX_NESTING_DEPTH`] or longer than
/// [`MAX_OPERATORS`] operators.
///
/// # Examples
///
/// ```
/// use pay_component_engine::formula::parse;
///
/// assert!(parse("max(min(basic * 0.0550, 500), 100)").is_ok());
/// assert!(parse("pow(basic, 2)").is_err());
/// assert!(parse("").is_err());
/// ```
pub fn parse(formula: &str) -> EngineResult<Expr> {
    let result = Parser::new(formula).and_then(|mut parser| parser.parse_formula());
    if let Err(err) = &result {
        debug!(formula = %formula, error = %err, "Formula rejected");
    }
    result
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
    operators: usize,
}

impl Parser {
    fn new(formula: &str) -> EngineResult<Self> {
        Ok(Self {
            tokens: tokenize(formula)?,
            pos: 0,
            depth: 0,
            operators: 0,
        })
    }

    fn parse_formula(&mut self) -> EngineResult<Expr> {
        if self.peek() == &Token::End {
            return Err(self.error_here("empty formula"));
        }

        let expr = self.conditional()?;

        match self.peek() {
            Token::End => Ok(expr),
            Token::RParen => Err(self.error_here("unbalanced parentheses: unexpected ')'")),
            other => {
                let message = format!("unexpected {}", other.describe());
                Err(self.error_here(message))
            }
        }
    }

    fn conditional(&mut self) -> EngineResult<Expr> {
        let value = self.additive()?;

        if !self.at_keyword("if") {
            return Ok(value);
        }
        self.advance();
        self.enter()?;

        let test = self.bool_expr()?;
        if !self.at_keyword("else") {
            let message = format!("expected 'else', found {}", self.peek().describe());
            return Err(self.error_here(message));
        }
        self.advance();
        let otherwise = self.conditional()?;

        self.leave();
        Ok(Expr::Conditional {
            test: Box::new(test),
            then: Box::new(value),
            otherwise: Box::new(otherwise),
        })
    }

    fn bool_expr(&mut self) -> EngineResult<Condition> {
        let left = self.additive()?;

        let op = match self.peek() {
            Token::Lt => CmpOp::Lt,
            Token::Le => CmpOp::Le,
            Token::Gt => CmpOp::Gt,
            Token::Ge => CmpOp::Ge,
            Token::EqEq => CmpOp::Eq,
            Token::NotEq => CmpOp::Ne,
            _ => return Ok(Condition::Truthy(left)),
        };
        self.advance();
        let right = self.additive()?;

        Ok(Condition::Compare { op, left, right })
    }

    fn additive(&mut self) -> EngineResult<Expr> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.count_operator()?;
            self.advance();
            let right = self.term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn term(&mut self) -> EngineResult<Expr> {
        let mut left = self.factor()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                _ => return Ok(left),
            };
            self.count_operator()?;
            self.advance();
            let right = self.factor()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn factor(&mut self) -> EngineResult<Expr> {
        let Spanned { token, position } = self.tokens[self.pos].clone();

        match token {
            Token::Number(value) => {
                self.advance();
                Ok(Expr::Number(value))
            }
            Token::LParen => {
                self.advance();
                self.enter()?;
                let inner = self.conditional()?;
                self.expect_close(position)?;
                self.leave();
                Ok(inner)
            }
            Token::Ident(name) => {
                self.advance();
                if self.peek() == &Token::LParen {
                    self.call(&name, position)
                } else if let Some(variable) = Variable::from_name(&name) {
                    Ok(Expr::Variable(variable))
                } else if name == "if" || name == "else" {
                    Err(EngineError::ParseError {
                        position,
                        message: format!("unexpected keyword '{}'", name),
                    })
                } else {
                    Err(EngineError::ParseError {
                        position,
                        message: format!("unknown variable '{}'", name),
                    })
                }
            }
            Token::End => Err(self.error_here("unexpected end of input")),
            Token::RParen => Err(self.error_here("unbalanced parentheses: unexpected ')'")),
            other => {
                let message = format!("unexpected {}", other.describe());
                Err(self.error_here(message))
            }
        }
    }

    fn call(&mut self, name: &str, name_position: usize) -> EngineResult<Expr> {
        let function = Function::from_name(name).ok_or_else(|| EngineError::ParseError {
            position: name_position,
            message: format!("unknown function '{}'", name),
        })?;

        let open_position = self.tokens[self.pos].position;
        self.advance();
        self.enter()?;

        let mut args = Vec::new();
        if self.peek() != &Token::RParen {
            args.push(self.conditional()?);
            while self.peek() == &Token::Comma {
                self.advance();
                args.push(self.conditional()?);
            }
        }
        self.expect_close(open_position)?;
        self.leave();

        if args.len() != function.arity() {
            return Err(EngineError::ParseError {
                position: name_position,
                message: format!(
                    "{}() takes exactly {} argument{}, got {}",
                    function.name(),
                    function.arity(),
                    if function.arity() == 1 { "" } else { "s" },
                    args.len()
                ),
            });
        }

        Ok(Expr::Call { function, args })
    }

    fn expect_close(&mut self, open_position: usize) -> EngineResult<()> {
        if self.peek() == &Token::RParen {
            self.advance();
            return Ok(());
        }
        let message = format!(
            "unbalanced parentheses: '(' at position {} is not closed, found {}",
            open_position,
            self.peek().describe()
        );
        Err(self.error_here(message))
    }

    fn enter(&mut self) -> EngineResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.error_here(format!(
                "formula nests deeper than {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        Ok(())
    }

    fn count_operator(&mut self) -> EngineResult<()> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(self.error_here(format!(
                "formula has more than {} operators",
                MAX_OPERATORS
            )));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Token::Ident(name) if name == keyword)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn error_here(&self, message: impl Into<String>) -> EngineError {
        EngineError::ParseError {
            position: self.tokens[self.pos].position,
            message: message.into(),
        }
    }
}
