//! `Inverter`: collapses `inv`/`rev` nodes over scalars, blades, and
//! product chains.

use crate::blade::parse_blade;
use crate::error::SimplifyError;
use crate::grade::calculate_grade;
use crate::node::{Node, Op};
use crate::pass::Pass;

pub struct Inverter;

impl Pass for Inverter {
  fn name(&self) -> &'static str {
    "Inverter"
  }

  fn manipulate_subtree(&self, node: &Node) -> Result<Option<Node>, SimplifyError> {
    match node.as_op() {
      Some(Op::Sub) if node.children.len() == 2 => {
        let a = node.children[0].clone();
        let b = node.children[1].clone();
        Ok(Some(Node::op(Op::Add, vec![a, Node::op(Op::Mul, vec![Node::scalar(-1.0), b])])))
      }
      Some(Op::Div) if node.children.len() == 2 => {
        let a = node.children[0].clone();
        let b = node.children[1].clone();
        Ok(Some(Node::op(Op::Mul, vec![a, Node::op(Op::Inv, vec![b])])))
      }
      Some(op @ (Op::Inv | Op::Rev)) if node.children.len() == 1 => self.unwrap_inv_or_rev(op, &node.children[0]),
      _ => Ok(None),
    }
  }
}

impl Inverter {
  fn unwrap_inv_or_rev(&self, op: Op, inner: &Node) -> Result<Option<Node>, SimplifyError> {
    if inner.is_op(Op::Mul) && inner.children.len() > 1 {
      let wrapped: Vec<Node> = inner.children.iter().rev().map(|c| Node::op(op, vec![c.clone()])).collect();
      return Ok(Some(Node::op(Op::Mul, wrapped)));
    }

    if op == Op::Inv {
      if let Some(v) = inner.as_scalar() {
        return Ok(Some(Node::scalar(1.0 / v)));
      }
      if let Some(blade) = parse_blade(inner)? {
        let mut inner_dot_children = blade.scalars.clone();
        inner_dot_children.push(Node::op(Op::Mul, blade.vectors.clone()));
        inner_dot_children.push(Node::op(Op::Mul, blade.vectors.clone()));
        let magnitude_inv = Node::op(Op::Inv, vec![Node::op(Op::Inner, inner_dot_children)]);
        let conjugate = Node::op(Op::Outer, blade.vectors.iter().rev().cloned().collect());
        return Ok(Some(Node::op(Op::Mul, vec![magnitude_inv, conjugate])));
      }
    }

    if op == Op::Rev {
      let grade = calculate_grade(inner)?;
      if grade == Some(0) || grade == Some(1) {
        return Ok(Some(inner.clone()));
      }
    }

    Ok(None)
  }
}
