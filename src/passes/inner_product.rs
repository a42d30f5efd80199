//! `InnerProductHandler`: collapses `.` (inner product) nodes using a
//! caller-supplied bilinear form.

use crate::bilinear::BilinearForm;
use crate::blade::parse_blade;
use crate::error::SimplifyError;
use crate::node::{Node, Op};
use crate::pass::Pass;

pub struct InnerProductHandler<'a> {
  bilinear_form: &'a BilinearForm<'a>,
}

impl<'a> InnerProductHandler<'a> {
  pub fn new(bilinear_form: &'a BilinearForm<'a>) -> Self {
    InnerProductHandler { bilinear_form }
  }
}

impl<'a> Pass for InnerProductHandler<'a> {
  fn name(&self) -> &'static str {
    "InnerProductHandler"
  }

  fn manipulate_subtree(&self, node: &Node) -> Result<Option<Node>, SimplifyError> {
    if !node.is_op(Op::Inner) {
      return Ok(None);
    }

    let mut blade_a: Option<(Vec<Node>, Vec<Node>)> = None;
    let mut blade_b: Option<(Vec<Node>, Vec<Node>)> = None;
    let mut others = Vec::new();

    for child in &node.children {
      match parse_blade(child)? {
        Some(blade) if !blade.vectors.is_empty() => {
          if blade_a.is_none() {
            blade_a = Some((blade.scalars, blade.vectors));
          } else if blade_b.is_none() {
            blade_b = Some((blade.scalars, blade.vectors));
          } else {
            return Err(SimplifyError::AmbiguousInnerProduct);
          }
        }
        _ => others.push(child.clone()),
      }
    }

    let (Some((scalars_a, vectors_a)), Some((scalars_b, vectors_b))) = (blade_a, blade_b) else {
      return Ok(None);
    };

    if vectors_a.len() == 1 && vectors_b.len() == 1 {
      let vector_a = &vectors_a[0];
      let vector_b = &vectors_b[0];
      let (Some(a_sym), Some(b_sym)) = (as_symbol(vector_a), as_symbol(vector_b)) else {
        return Ok(None);
      };
      if let Some(scalar) = (self.bilinear_form)(a_sym, b_sym) {
        let mut children = vec![Node::scalar(scalar)];
        children.extend(others);
        children.extend(scalars_a);
        children.extend(scalars_b);
        return Ok(Some(Node::op(Op::Mul, children)));
      }
      if a_sym > b_sym {
        let mut children = others;
        children.extend(scalars_a);
        children.extend(scalars_b);
        children.push(vector_b.clone());
        children.push(vector_a.clone());
        return Ok(Some(Node::op(Op::Inner, children)));
      }
      return Ok(None);
    }

    if vectors_a.len() == 1 && vectors_b.len() > 1 {
      let sum = expand_vector_with_blade(&vectors_a[0], &vectors_b, 1);
      let mut children = others;
      children.extend(scalars_a);
      children.extend(scalars_b);
      children.push(sum);
      return Ok(Some(Node::op(Op::Mul, children)));
    }

    if vectors_a.len() > 1 && vectors_b.len() == 1 {
      let j = if vectors_a.len() % 2 == 1 { 1 } else { 0 };
      let sum = expand_vector_with_blade(&vectors_b[0], &vectors_a, j);
      let mut children = others;
      children.extend(scalars_a);
      children.extend(scalars_b);
      children.push(sum);
      return Ok(Some(Node::op(Op::Mul, children)));
    }

    // vectors_a.len() > 1 && vectors_b.len() > 1
    let mut product_children = others;
    product_children.extend(scalars_a);
    product_children.extend(scalars_b);

    if vectors_a.len() >= vectors_b.len() {
      let mut vectors_a = vectors_a;
      let vector = vectors_a.pop().unwrap();
      product_children.push(Node::op(
        Op::Inner,
        vec![
          Node::op(Op::Outer, vectors_a),
          Node::op(Op::Inner, vec![vector, Node::op(Op::Outer, vectors_b)]),
        ],
      ));
    } else {
      let mut vectors_b = vectors_b;
      let vector = vectors_b.remove(0);
      product_children.push(Node::op(
        Op::Inner,
        vec![
          Node::op(Op::Inner, vec![Node::op(Op::Outer, vectors_a), vector]),
          Node::op(Op::Outer, vectors_b),
        ],
      ));
    }
    Ok(Some(Node::op(Op::Mul, product_children)))
  }
}

fn as_symbol(node: &Node) -> Option<&str> {
  match &node.data {
    crate::node::NodeData::Symbol(s) => Some(s.as_str()),
    _ => None,
  }
}

/// Expands `vector . (v0 ^ v1 ^ ... ^ vn)` into a sum of blades with
/// `vector` contracted against each `v_i` in turn, alternating sign
/// starting at parity `j`.
fn expand_vector_with_blade(vector: &Node, vector_list: &[Node], j: usize) -> Node {
  let mut sum_children = Vec::with_capacity(vector_list.len());
  for i in 0..vector_list.len() {
    let mut product_children = Vec::new();
    if i % 2 == j {
      product_children.push(Node::scalar(-1.0));
    }
    product_children.push(vector.clone());
    product_children.push(vector_list[i].clone());
    let product = Node::op(Op::Inner, product_children);

    let mut blade_children = vec![product];
    blade_children.extend(vector_list[..i].iter().cloned());
    blade_children.extend(vector_list[i + 1..].iter().cloned());
    sum_children.push(Node::op(Op::Outer, blade_children));
  }
  Node::op(Op::Add, sum_children)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bilinear::conformal_bilinear_form;

  #[test]
  fn two_basis_vectors_collapse_to_metric_scalar() {
    let tree = Node::op(Op::Inner, vec![Node::symbol("e1"), Node::symbol("e1")]);
    let handler = InnerProductHandler::new(&conformal_bilinear_form);
    let result = handler.manipulate_subtree(&tree).unwrap().unwrap();
    assert_eq!(result, Node::op(Op::Mul, vec![Node::scalar(1.0)]));
  }

  #[test]
  fn unknown_pair_commutes_into_canonical_order() {
    let tree = Node::op(Op::Inner, vec![Node::symbol("y"), Node::symbol("x")]);
    fn unknown_form(_: &str, _: &str) -> Option<f64> {
      None
    }
    let handler = InnerProductHandler::new(&unknown_form);
    let result = handler.manipulate_subtree(&tree).unwrap().unwrap();
    assert_eq!(result, Node::op(Op::Inner, vec![Node::symbol("x"), Node::symbol("y")]));
  }

  #[test]
  fn already_canonical_unknown_pair_declines() {
    let tree = Node::op(Op::Inner, vec![Node::symbol("x"), Node::symbol("y")]);
    fn unknown_form(_: &str, _: &str) -> Option<f64> {
      None
    }
    let handler = InnerProductHandler::new(&unknown_form);
    assert!(handler.manipulate_subtree(&tree).unwrap().is_none());
  }

  #[test]
  fn third_vector_operand_is_ambiguous() {
    let tree = Node::op(Op::Inner, vec![Node::symbol("e1"), Node::symbol("e2"), Node::symbol("e3")]);
    let handler = InnerProductHandler::new(&conformal_bilinear_form);
    assert_eq!(handler.manipulate_subtree(&tree).unwrap_err(), SimplifyError::AmbiguousInnerProduct);
  }

  #[test]
  fn vector_dot_bivector_expands_to_sum() {
    let bivector = Node::op(Op::Outer, vec![Node::symbol("e2"), Node::symbol("e3")]);
    let tree = Node::op(Op::Inner, vec![Node::symbol("e1"), bivector]);
    let handler = InnerProductHandler::new(&conformal_bilinear_form);
    let result = handler.manipulate_subtree(&tree).unwrap().unwrap();
    assert!(result.is_op(Op::Mul));
    let sum = result.children.last().unwrap();
    assert!(sum.is_op(Op::Add));
    assert_eq!(sum.children.len(), 2);
  }
}
