//! `Associator`: flattens nested same-op n-ary chains. Note: `.` and `-`
//! are deliberately excluded — the inner product and subtraction aren't
//! generally associative.

use crate::error::SimplifyError;
use crate::node::{Node, Op};
use crate::pass::Pass;

pub struct Associator;

impl Pass for Associator {
  fn name(&self) -> &'static str {
    "Associator"
  }

  fn manipulate_subtree(&self, node_a: &Node) -> Result<Option<Node>, SimplifyError> {
    let Some(op) = node_a.as_op() else { return Ok(None) };
    if !matches!(op, Op::Add | Op::Mul | Op::Outer) {
      return Ok(None);
    }
    for (i, node_b) in node_a.children.iter().enumerate() {
      if node_b.as_op() == Some(op) {
        let mut children = node_a.children[..i].to_vec();
        children.extend(node_b.children.iter().cloned());
        children.extend(node_a.children[i + 1..].iter().cloned());
        return Ok(Some(Node::op(op, children)));
      }
    }
    Ok(None)
  }
}
