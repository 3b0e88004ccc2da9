//! S-expression reader and printer.
//!
//! Regression trees use `(+ a b)`, `(- a b)`, `(* a b)`, `(/ a b)` and
//! `(term coefficient variable power)`; any atom that parses as a number is a
//! literal, every other atom is a variable. Boolean trees use `(and a b)`,
//! `(or a b)`, `(not a)` and `(if c t e)`. Operator names are
//! case-insensitive.

use std::fmt;

use thiserror::Error;

use crate::arena::ExprArena;
use crate::expr::{BoolNode, Node, RealNode};
use crate::handle::ExprHandle;

/// Errors produced while reading an s-expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input ended inside an expression.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A token appeared where it is not allowed.
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),

    /// An operator name that the language does not define.
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),

    /// An operator applied to the wrong number of arguments.
    #[error("`{op}` takes {expected} arguments, found {found}")]
    Arity {
        /// The operator.
        op: String,
        /// Number of arguments it takes.
        expected: usize,
        /// Number of arguments supplied.
        found: usize,
    },

    /// Input continues after a complete expression.
    #[error("trailing input after expression: `{0}`")]
    TrailingInput(String),
}

#[derive(Debug)]
enum SExpr<'a> {
    Atom(&'a str),
    List(Vec<SExpr<'a>>),
}

fn tokenize(src: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, ch) in src.char_indices() {
        match ch {
            '(' | ')' => {
                if let Some(s) = start.take() {
                    tokens.push(&src[s..i]);
                }
                tokens.push(&src[i..=i]);
            }
            c if c.is_whitespace() => {
                if let Some(s) = start.take() {
                    tokens.push(&src[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&src[s..]);
    }
    tokens
}

fn read<'a>(tokens: &[&'a str], pos: &mut usize) -> Result<SExpr<'a>, ParseError> {
    let token = *tokens.get(*pos).ok_or(ParseError::UnexpectedEnd)?;
    *pos += 1;
    match token {
        "(" => {
            let mut items = Vec::new();
            loop {
                match tokens.get(*pos) {
                    None => return Err(ParseError::UnexpectedEnd),
                    Some(&")") => {
                        *pos += 1;
                        return Ok(SExpr::List(items));
                    }
                    Some(_) => items.push(read(tokens, pos)?),
                }
            }
        }
        ")" => Err(ParseError::UnexpectedToken(token.to_string())),
        atom => Ok(SExpr::Atom(atom)),
    }
}

fn read_all(src: &str) -> Result<SExpr<'_>, ParseError> {
    let tokens = tokenize(src);
    let mut pos = 0;
    let expr = read(&tokens, &mut pos)?;
    if pos < tokens.len() {
        return Err(ParseError::TrailingInput(tokens[pos..].join(" ")));
    }
    Ok(expr)
}

fn split_call<'s, 'a>(items: &'s [SExpr<'a>]) -> Result<(String, &'s [SExpr<'a>]), ParseError> {
    match items.split_first() {
        Some((SExpr::Atom(op), args)) => Ok((op.to_ascii_lowercase(), args)),
        Some((SExpr::List(_), _)) => Err(ParseError::UnexpectedToken("(".to_string())),
        None => Err(ParseError::UnexpectedToken("()".to_string())),
    }
}

fn expect_arity(op: &str, args: &[SExpr<'_>], expected: usize) -> Result<(), ParseError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ParseError::Arity {
            op: op.to_string(),
            expected,
            found: args.len(),
        })
    }
}

fn number(atom: &str) -> Result<f64, ParseError> {
    atom.parse()
        .map_err(|_| ParseError::UnexpectedToken(atom.to_string()))
}

impl ExprArena<RealNode> {
    /// Reads a regression tree from an s-expression.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is not a well-formed tree.
    pub fn parse(&mut self, src: &str) -> Result<ExprHandle, ParseError> {
        let expr = read_all(src)?;
        self.build_real(&expr)
    }

    fn build_real(&mut self, expr: &SExpr<'_>) -> Result<ExprHandle, ParseError> {
        let items = match expr {
            SExpr::Atom(atom) => {
                return Ok(match atom.parse::<f64>() {
                    Ok(value) => self.literal(value),
                    Err(_) => self.variable(atom),
                })
            }
            SExpr::List(items) => items,
        };

        let (op, args) = split_call(items)?;
        if op == "term" {
            expect_arity(&op, args, 3)?;
            let (SExpr::Atom(c), SExpr::Atom(var), SExpr::Atom(p)) = (&args[0], &args[1], &args[2])
            else {
                return Err(ParseError::UnexpectedToken("(".to_string()));
            };
            let variable = self.intern_symbol(var);
            return Ok(self.term(number(c)?, variable, number(p)?));
        }

        expect_arity(&op, args, 2)?;
        let left = self.build_real(&args[0])?;
        let right = self.build_real(&args[1])?;
        match op.as_str() {
            "+" => Ok(self.add(left, right)),
            "-" => Ok(self.sub(left, right)),
            "*" => Ok(self.mul(left, right)),
            "/" | "%" => Ok(self.div(left, right)),
            _ => Err(ParseError::UnknownOperator(op)),
        }
    }
}

impl ExprArena<BoolNode> {
    /// Reads a boolean tree from an s-expression.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is not a well-formed tree.
    pub fn parse(&mut self, src: &str) -> Result<ExprHandle, ParseError> {
        let expr = read_all(src)?;
        self.build_bool(&expr)
    }

    fn build_bool(&mut self, expr: &SExpr<'_>) -> Result<ExprHandle, ParseError> {
        let items = match expr {
            SExpr::Atom(atom) => return Ok(self.variable(atom)),
            SExpr::List(items) => items,
        };

        let (op, args) = split_call(items)?;
        let expected = match op.as_str() {
            "and" | "or" => 2,
            "not" => 1,
            "if" => 3,
            _ => return Err(ParseError::UnknownOperator(op)),
        };
        expect_arity(&op, args, expected)?;

        let children = args
            .iter()
            .map(|arg| self.build_bool(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(match op.as_str() {
            "and" => self.and(children[0], children[1]),
            "or" => self.or(children[0], children[1]),
            "not" => self.not(children[0]),
            _ => self.ite(children[0], children[1], children[2]),
        })
    }
}

/// Printing adapter returned by [`ExprArena::display`].
pub struct Printed<'a, N> {
    arena: &'a ExprArena<N>,
    root: ExprHandle,
}

impl<N: Node> ExprArena<N> {
    /// Returns a value that prints the tree at `root` as an s-expression.
    #[must_use]
    pub fn display(&self, root: ExprHandle) -> Printed<'_, N> {
        Printed { arena: self, root }
    }
}

impl<N> Printed<'_, N> {
    fn symbol(&self, f: &mut fmt::Formatter<'_>, id: u32) -> fmt::Result
    where
        N: Node,
    {
        match self.arena.symbol_name(id) {
            Some(name) => f.write_str(name),
            None => write!(f, "${id}"),
        }
    }

    fn nested(&self, root: ExprHandle) -> Self {
        Printed {
            arena: self.arena,
            root,
        }
    }
}

impl fmt::Display for Printed<'_, RealNode> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.arena.get(self.root);
        match node {
            RealNode::Literal(v) => write!(f, "{}", v.0),
            RealNode::Variable(id) => self.symbol(f, *id),
            RealNode::Term {
                coefficient,
                variable,
                power,
            } => {
                write!(f, "(term {} ", coefficient.0)?;
                self.symbol(f, *variable)?;
                write!(f, " {})", power.0)
            }
            RealNode::Add(l, r) | RealNode::Sub(l, r) | RealNode::Mul(l, r) | RealNode::Div(l, r) => {
                let op = node.operator().unwrap_or("?");
                write!(f, "({op} {} {})", self.nested(*l), self.nested(*r))
            }
        }
    }
}

impl fmt::Display for Printed<'_, BoolNode> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.arena.get(self.root);
        if let BoolNode::Variable(id) = node {
            return self.symbol(f, *id);
        }
        write!(f, "({}", node.operator().unwrap_or("?"))?;
        for child in node.children() {
            write!(f, " {}", self.nested(child))?;
        }
        f.write_str(")")
    }
}
