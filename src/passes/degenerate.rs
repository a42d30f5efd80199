//! `DegenerateCaseHandler`: collapses single-child and identity-element
//! n-ary nodes.

use crate::error::SimplifyError;
use crate::grade::calculate_grade;
use crate::node::{Node, NodeData, Op};
use crate::pass::Pass;

pub struct DegenerateCaseHandler;

impl Pass for DegenerateCaseHandler {
  fn name(&self) -> &'static str {
    "DegenerateCaseHandler"
  }

  fn manipulate_subtree(&self, node: &Node) -> Result<Option<Node>, SimplifyError> {
    let Some(op) = node.as_op() else { return Ok(None) };

    if matches!(op, Op::Mul | Op::Inner | Op::Outer | Op::Add) && node.children.len() == 1 {
      return Ok(Some(node.children[0].clone()));
    }

    if matches!(op, Op::Mul | Op::Inner | Op::Outer) {
      if node.children.is_empty() {
        return Ok(Some(Node::scalar(1.0)));
      }
      if node.children.iter().any(|c| c.is_scalar_literal(0.0)) {
        return Ok(Some(Node::scalar(0.0)));
      }
      if let Some(idx) = node.children.iter().position(|c| c.is_scalar_literal(1.0)) {
        let mut new_node = node.clone();
        new_node.children.remove(idx);
        return Ok(Some(new_node));
      }
    }

    if op == Op::Add {
      if node.children.is_empty() {
        return Ok(Some(Node::scalar(0.0)));
      }
      if let Some(idx) = node.children.iter().position(|c| c.is_scalar_literal(0.0)) {
        let mut new_node = node.clone();
        new_node.children.remove(idx);
        return Ok(Some(new_node));
      }
    }

    // Scalar-only '*' wrapping a '^' (or vice versa) is really the other op.
    for (from_op, other_op) in [(Op::Mul, Op::Outer), (Op::Outer, Op::Mul)] {
      if op != from_op {
        continue;
      }
      for (j, child) in node.children.iter().enumerate() {
        if child.as_op() != Some(other_op) {
          continue;
        }
        let mut all_others_grade_zero = true;
        for (k, other_child) in node.children.iter().enumerate() {
          if k != j && calculate_grade(other_child)? != Some(0) {
            all_others_grade_zero = false;
            break;
          }
        }
        if all_others_grade_zero {
          let mut new_node = node.clone();
          new_node.data = NodeData::Op(other_op);
          return Ok(Some(new_node));
        }
        break;
      }
    }

    Ok(None)
  }
}
