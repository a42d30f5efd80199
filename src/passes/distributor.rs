//! `Distributor`: pushes `*`, `.`, and `^` over a `+`-valued operand.

use crate::error::SimplifyError;
use crate::node::{Node, Op};
use crate::pass::Pass;

pub struct Distributor;

impl Pass for Distributor {
  fn name(&self) -> &'static str {
    "Distributor"
  }

  fn manipulate_subtree(&self, node_a: &Node) -> Result<Option<Node>, SimplifyError> {
    let Some(op) = node_a.as_op() else { return Ok(None) };
    if !matches!(op, Op::Inner | Op::Outer | Op::Mul | Op::Rev) {
      return Ok(None);
    }
    for (i, node_b) in node_a.children.iter().enumerate() {
      if node_b.is_op(Op::Add) && node_b.children.len() > 1 {
        let sum_children: Vec<Node> = node_b
          .children
          .iter()
          .map(|node_c| {
            let mut product_children = node_a.children[..i].to_vec();
            product_children.push(node_c.clone());
            product_children.extend(node_a.children[i + 1..].iter().cloned());
            Node::op(op, product_children)
          })
          .collect();
        return Ok(Some(Node::op(Op::Add, sum_children)));
      }
    }
    Ok(None)
  }
}
