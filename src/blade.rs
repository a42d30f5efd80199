//! Blade decomposition, ported from `_parse_blade`.

use crate::error::SimplifyError;
use crate::grade::calculate_grade;
use crate::node::{Node, Op};

/// A scalar-times-outer-product-of-vectors decomposition of a subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Blade {
  pub scalars: Vec<Node>,
  pub vectors: Vec<Node>,
}

/// Classifies `node` as a blade, or returns `None` if it can't be seen as
/// one: a single scalar/vector atom, or a `.`/`^`/`*` node whose children
/// partition cleanly into scalars and vectors, with `|vectors| <= 1` unless
/// the root is `^`.
pub fn parse_blade(node: &Node) -> Result<Option<Blade>, SimplifyError> {
  match node.as_op() {
    Some(op @ (Op::Inner | Op::Outer | Op::Mul)) => {
      let mut scalars = Vec::new();
      let mut vectors = Vec::new();
      let mut has_other = false;
      for child in &node.children {
        match calculate_grade(child)? {
          Some(0) => scalars.push(child.clone()),
          Some(1) => vectors.push(child.clone()),
          _ => has_other = true,
        }
      }
      if has_other {
        return Ok(None);
      }
      if vectors.len() > 1 && op != Op::Outer {
        return Ok(None);
      }
      Ok(Some(Blade { scalars, vectors }))
    }
    _ => match calculate_grade(node)? {
      Some(0) => Ok(Some(Blade { scalars: vec![node.clone()], vectors: Vec::new() })),
      Some(1) => Ok(Some(Blade { scalars: Vec::new(), vectors: vec![node.clone()] })),
      _ => Ok(None),
    },
  }
}
