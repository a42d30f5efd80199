//! Textual convenience parser for [`Node`]'s round-trip grammar, grounded
//! on `parse_grammar.rs`'s regex-based recursive descent (the
//! `regex_static!` macro, `(T, &str)` remainder-threading style) rather
//! than a parser-combinator crate.
//!
//! This is not the graphical DSL an interactive shell would expose (that's
//! out of scope here); it's a textual stand-in so tests and the CLI can
//! read an expression from a string instead of hand-building a [`Node`]
//! tree, the same role `impl FromStr for Grammar` plays for grammar files.

use std::str::FromStr;

use regex::Regex;

use crate::error::SimplifyError;
use crate::node::{Node, Op};

macro_rules! regex_static {
  ($name:ident, $pattern:expr) => {
    lazy_static! {
      static ref $name: Regex = Regex::new($pattern).unwrap();
    }
  };
}

regex_static!(NUMBER_RE, r"^-?[0-9]+(\.[0-9]+)?");
regex_static!(IDENT_RE, r"^\$?[A-Za-z_][A-Za-z0-9_]*");

type ParseResult<'a, T> = Result<(T, &'a str), SimplifyError>;

/// Single-character infix operators, in the order `expression_text` could
/// have produced them (irrelevant for parsing, but kept in the order the
/// node model declares them).
const INFIX_OPS: [(char, Op); 6] =
  [('+', Op::Add), ('-', Op::Sub), ('*', Op::Mul), ('.', Op::Inner), ('^', Op::Outer), ('/', Op::Div)];

fn parse_error(s: &str) -> SimplifyError {
  SimplifyError::ParseError(format!("could not parse expression at: {:?}", s))
}

/// Parses one expression from the front of `s`, returning the remainder.
fn parse_expr(s: &str) -> ParseResult<'_, Node> {
  let s = s.trim_start();

  if let Some(rest) = s.strip_prefix('(') {
    return parse_parenthesized_infix(rest);
  }

  if let Some(caps) = IDENT_RE.find(s) {
    let ident = caps.as_str();
    let rest = &s[ident.len()..];
    if let Some(after_paren) = rest.strip_prefix('(') {
      return parse_prefix_call(ident, after_paren);
    }
    return Ok((Node::symbol(ident), rest));
  }

  if let Some(caps) = NUMBER_RE.find(s) {
    let text = caps.as_str();
    let value: f64 = text.parse().map_err(|_| parse_error(s))?;
    return Ok((Node::scalar(value), &s[text.len()..]));
  }

  Err(parse_error(s))
}

/// `word(` has already been consumed up through the opening paren; `rest`
/// is everything after it. `inv`/`rev` become the matching fixed-arity op;
/// any other identifier becomes a function-application `Symbol` node.
fn parse_prefix_call<'a>(ident: &str, rest: &'a str) -> ParseResult<'a, Node> {
  let (args, rest) = parse_arg_list(rest)?;
  let node = match ident {
    "inv" => Node::op(Op::Inv, args),
    "rev" => Node::op(Op::Rev, args),
    _ => Node { data: crate::node::NodeData::Symbol(ident.to_string()), children: args },
  };
  Ok((node, rest))
}

/// Comma-separated argument list, terminated by the matching `)`.
fn parse_arg_list(mut s: &str) -> ParseResult<'_, Vec<Node>> {
  let mut args = Vec::new();
  s = s.trim_start();
  if let Some(rest) = s.strip_prefix(')') {
    return Ok((args, rest));
  }
  loop {
    let (node, rest) = parse_expr(s)?;
    args.push(node);
    let rest = rest.trim_start();
    if let Some(rest) = rest.strip_prefix(',') {
      s = rest;
      continue;
    }
    if let Some(rest) = rest.strip_prefix(')') {
      return Ok((args, rest));
    }
    return Err(parse_error(rest));
  }
}

/// `(` has already been consumed; `rest` starts right after it. Finds the
/// matching `)`, then figures out which single-char op joined the children
/// (scanning for the first occurrence of one at a "binary position" — not
/// immediately after `(`, `,`, or another operator char, which would mean
/// it's a leaf's leading sign instead) and splits on every such occurrence
/// of that same op.
fn parse_parenthesized_infix(rest: &str) -> ParseResult<'_, Node> {
  let (content, after) = split_matching_paren(rest)?;

  let Some(op) = find_infix_op(content) else {
    // No binary-position operator found: a redundant single-child group,
    // e.g. an n-ary op wrapping exactly one child (`^(e1)` printed as
    // `(e1)`). The specific op can't be recovered from the text alone, so
    // the content is just returned as its own expression — lossy, but this
    // parser is a test/CLI convenience, not the canonical form itself.
    let (node, leftover) = parse_expr(content)?;
    if !leftover.trim().is_empty() {
      return Err(parse_error(leftover));
    }
    return Ok((node, after));
  };

  let positions = split_positions(content, op.0);
  let mut children = Vec::with_capacity(positions.len() + 1);
  let mut start = 0;
  for &pos in &positions {
    children.push(parse_whole_expr(&content[start..pos])?);
    start = pos + op.0.len_utf8();
  }
  children.push(parse_whole_expr(&content[start..])?);

  Ok((Node::op(op.1, children), after))
}

fn parse_whole_expr(s: &str) -> Result<Node, SimplifyError> {
  let (node, rest) = parse_expr(s)?;
  if !rest.trim().is_empty() {
    return Err(parse_error(rest));
  }
  Ok(node)
}

/// Scans `content` for the first single-char op sitting at a binary
/// position (depth 0, not right after `(`, `,`, or another op character).
fn find_infix_op(content: &str) -> Option<(char, Op)> {
  let positions: Vec<usize> = binary_position_indices(content);
  for &idx in &positions {
    let ch = content[idx..].chars().next().unwrap();
    if let Some(&(c, op)) = INFIX_OPS.iter().find(|(c, _)| *c == ch) {
      return Some((c, op));
    }
  }
  None
}

fn split_positions(content: &str, op: char) -> Vec<usize> {
  binary_position_indices(content)
    .into_iter()
    .filter(|&idx| content[idx..].chars().next() == Some(op))
    .collect()
}

/// Byte indices of characters that are candidates for being a binary
/// operator: at paren depth 0, and not immediately preceded by `(`, `,`, or
/// another operator/leading-sign character.
fn binary_position_indices(content: &str) -> Vec<usize> {
  let bytes = content.as_bytes();
  let mut depth = 0i32;
  let mut indices = Vec::new();
  let mut prev: Option<char> = None;
  for (idx, ch) in content.char_indices() {
    match ch {
      '(' => depth += 1,
      ')' => depth -= 1,
      _ if depth == 0 && is_op_char(ch) => {
        let is_leading = match prev {
          None => true,
          Some(p) => p == '(' || p == ',' || is_op_char(p),
        };
        if !is_leading {
          indices.push(idx);
        }
      }
      _ => {}
    }
    let _ = bytes;
    prev = Some(ch);
  }
  indices
}

fn is_op_char(ch: char) -> bool {
  INFIX_OPS.iter().any(|(c, _)| *c == ch)
}

/// Consumes up to the `)` that matches the `(` already stripped off the
/// front of `s`; returns (everything inside, everything after the `)`).
fn split_matching_paren(s: &str) -> ParseResult<'_, &str> {
  let mut depth = 1i32;
  for (idx, ch) in s.char_indices() {
    match ch {
      '(' => depth += 1,
      ')' => {
        depth -= 1;
        if depth == 0 {
          return Ok((&s[..idx], &s[idx + 1..]));
        }
      }
      _ => {}
    }
  }
  Err(parse_error(s))
}

impl FromStr for Node {
  type Err = SimplifyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse_whole_expr(s.trim())
  }
}
