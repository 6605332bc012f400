//! Expression parser
//!
//! Parses the candidate text produced by property template substitution
//! (e.g. `"8>=4"`) into Expression AST nodes.
//!
//! Supported syntax:
//! - Literals: `42`, `3.14`, `"string"`, `true`, `false`
//! - Binary operators: `||`, `&&`, `==`, `!=`, `<`, `<=`, `>`, `>=`, `+`, `-`, `*`, `/`, `%`
//! - Unary operators: `!`, `-`
//! - Parentheses for grouping: `(a + b) * c`
//!
//! Identifiers are rejected: a template expression is a constant once the
//! property value has been substituted in.

use crate::error::{ParseError, Result};
use sprout_core::ast::{Expression, Operator, UnaryOperator};
use sprout_core::Value;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(Value),
    Ident(String),
    Binary(Operator),
    Bang,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Literal(Value::String(s)) => format!("{:?}", s),
            Token::Literal(v) => v.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Binary(op) => op.symbol().to_string(),
            Token::Bang => "!".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// Deepest nesting of parentheses, unary operators or operator chains accepted
pub const MAX_NESTING: usize = 256;

/// A parsed subtree and its height
type Node = (Expression, usize);

/// Expression parser
pub struct ExpressionParser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ParseError::InvalidExpression("Empty expression".to_string()));
        }

        let mut parser = ExpressionParser {
            tokens: tokenize(input)?,
            pos: 0,
            depth: 0,
        };
        let (expr, _) = parser.parse_binary(1)?;

        match parser.tokens.get(parser.pos) {
            None => Ok(expr),
            Some((token, position)) => Err(ParseError::UnexpectedToken {
                found: token.describe(),
                position: *position,
            }),
        }
    }

    /// Enter one recursion level; the tree height is checked separately
    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(too_deep());
        }
        Ok(())
    }

    /// Precedence climbing; all binary operators are left-associative
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Node> {
        self.descend()?;
        let (mut left, mut height) = self.parse_unary()?;

        while let Some((Token::Binary(op), _)) = self.tokens.get(self.pos) {
            let op = *op;
            if op.precedence() < min_precedence {
                break;
            }
            self.pos += 1;
            let (right, right_height) = self.parse_binary(op.precedence() + 1)?;
            height = checked_height(height.max(right_height))?;
            left = Expression::binary(left, op, right);
        }

        self.depth -= 1;
        Ok((left, height))
    }

    fn parse_unary(&mut self) -> Result<Node> {
        let op = match self.tokens.get(self.pos) {
            Some((Token::Bang, _)) => UnaryOperator::Not,
            Some((Token::Binary(Operator::Sub), _)) => UnaryOperator::Negate,
            _ => return self.parse_primary(),
        };
        self.pos += 1;

        self.descend()?;
        let (operand, height) = self.parse_unary()?;
        self.depth -= 1;
        Ok((Expression::unary(op, operand), checked_height(height)?))
    }

    fn parse_primary(&mut self) -> Result<Node> {
        let (token, position) = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd)?;
        self.pos += 1;

        match token {
            Token::Literal(value) => Ok((Expression::Literal(value), 0)),
            Token::LParen => {
                let inner = self.parse_binary(1)?;
                match self.tokens.get(self.pos) {
                    Some((Token::RParen, _)) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    Some((other, position)) => Err(ParseError::UnexpectedToken {
                        found: other.describe(),
                        position: *position,
                    }),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Token::Ident(name) => Err(ParseError::UnsupportedIdentifier(name)),
            other => Err(ParseError::UnexpectedToken {
                found: other.describe(),
                position,
            }),
        }
    }
}

/// Height of a node whose tallest child has `child_height`
fn checked_height(child_height: usize) -> Result<usize> {
    let height = child_height + 1;
    if height > MAX_NESTING {
        return Err(too_deep());
    }
    Ok(height)
}

fn too_deep() -> ParseError {
    ParseError::InvalidExpression(format!("exceeded max nesting depth of {}", MAX_NESTING))
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) {
            let (value, next) = read_number(&chars, i)?;
            tokens.push((Token::Literal(value), start));
            i = next;
            continue;
        }

        if c == '"' {
            let (text, next) = read_string(&chars, i)?;
            tokens.push((Token::Literal(Value::String(text)), start));
            i = next;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '.') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let token = match word.as_str() {
                "true" => Token::Literal(Value::Bool(true)),
                "false" => Token::Literal(Value::Bool(false)),
                _ => Token::Ident(word),
            };
            tokens.push((token, start));
            continue;
        }

        let next = chars.get(i + 1).copied();
        let (token, width) = match (c, next) {
            ('|', Some('|')) => (Token::Binary(Operator::Or), 2),
            ('&', Some('&')) => (Token::Binary(Operator::And), 2),
            ('=', Some('=')) => (Token::Binary(Operator::Eq), 2),
            ('!', Some('=')) => (Token::Binary(Operator::Ne), 2),
            ('<', Some('=')) => (Token::Binary(Operator::Le), 2),
            ('>', Some('=')) => (Token::Binary(Operator::Ge), 2),
            ('<', _) => (Token::Binary(Operator::Lt), 1),
            ('>', _) => (Token::Binary(Operator::Gt), 1),
            ('+', _) => (Token::Binary(Operator::Add), 1),
            ('-', _) => (Token::Binary(Operator::Sub), 1),
            ('*', _) => (Token::Binary(Operator::Mul), 1),
            ('/', _) => (Token::Binary(Operator::Div), 1),
            ('%', _) => (Token::Binary(Operator::Mod), 1),
            ('!', _) => (Token::Bang, 1),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            _ => {
                return Err(ParseError::UnexpectedToken {
                    found: c.to_string(),
                    position: start,
                })
            }
        };
        tokens.push((token, start));
        i += width;
    }

    Ok(tokens)
}

fn read_number(chars: &[char], start: usize) -> Result<(Value, usize)> {
    let mut i = start;
    let mut is_float = false;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        is_float = true;
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        is_float = true;
        i += 1;
        if i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
            i += 1;
        }
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }

    let text: String = chars[start..i].iter().collect();
    let value = if is_float {
        text.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ParseError::InvalidLiteral(text.clone()))?
    } else {
        // integers beyond i64 (large floats render without a fraction) read as f64
        match text.parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => text
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| ParseError::InvalidLiteral(text.clone()))?,
        }
    };

    Ok((value, i))
}

fn read_string(chars: &[char], start: usize) -> Result<(String, usize)> {
    let mut text = String::new();
    let mut i = start + 1;

    while i < chars.len() {
        match chars[i] {
            '"' => return Ok((text, i + 1)),
            '\\' => {
                let escaped = chars.get(i + 1).ok_or(ParseError::UnexpectedEnd)?;
                match escaped {
                    '"' => text.push('"'),
                    '\\' => text.push('\\'),
                    'n' => text.push('\n'),
                    't' => text.push('\t'),
                    other => {
                        return Err(ParseError::InvalidLiteral(format!("unknown escape \\{}", other)))
                    }
                }
                i += 2;
            }
            c => {
                text.push(c);
                i += 1;
            }
        }
    }

    Err(ParseError::InvalidLiteral("unterminated string".to_string()))
}
