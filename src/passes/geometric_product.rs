//! `GeometricProductHandler`, the `ab = a.b + a^b` splitting rule. Tries a
//! pass that only fires on differing grades first; only if that finds
//! nothing does it retry allowing equal grades, mirroring the two-sweep
//! behavior of the manipulator it's grounded on.

use crate::blade::parse_blade;
use crate::error::SimplifyError;
use crate::node::{Node, Op};
use crate::pass::Pass;

pub struct GeometricProductHandler;

impl Pass for GeometricProductHandler {
  fn name(&self) -> &'static str {
    "GeometricProductHandler"
  }

  fn manipulate_subtree(&self, node: &Node) -> Result<Option<Node>, SimplifyError> {
    if let Some(result) = self.manipulate_subtree_internal(node, false)? {
      return Ok(Some(result));
    }
    self.manipulate_subtree_internal(node, true)
  }
}

impl GeometricProductHandler {
  fn manipulate_subtree_internal(&self, node: &Node, allow_same_grade: bool) -> Result<Option<Node>, SimplifyError> {
    if !node.is_op(Op::Mul) {
      return Ok(None);
    }

    for i in 0..node.children.len().saturating_sub(1) {
      let node_a = &node.children[i];
      let node_b = &node.children[i + 1];
      let Some(blade_a) = parse_blade(node_a)? else { continue };
      let Some(blade_b) = parse_blade(node_b)? else { continue };
      if blade_a.vectors.is_empty() || blade_b.vectors.is_empty() {
        continue;
      }
      if blade_a.vectors.len() == blade_b.vectors.len() && !allow_same_grade {
        continue;
      }

      let sum = expand_product(&blade_a.vectors, &blade_b.vectors);

      let mut children = node.children.clone();
      children.extend(blade_a.scalars);
      children.extend(blade_b.scalars);
      children.remove(i);
      children.remove(i);
      children.insert(i, sum);
      return Ok(Some(Node::op(Op::Mul, children)));
    }
    Ok(None)
  }
}

/// `a^b + a.b` for two homogeneous vector blades, specialized to the three
/// shapes the identity can take once one side is degree 1.
fn expand_product(vectors_a: &[Node], vectors_b: &[Node]) -> Node {
  let outer_a = Node::op(Op::Outer, vectors_a.to_vec());
  let outer_b = Node::op(Op::Outer, vectors_b.to_vec());

  if vectors_a.len() == 1 || vectors_b.len() == 1 {
    return Node::op(
      Op::Add,
      vec![Node::op(Op::Inner, vec![outer_a.clone(), outer_b.clone()]), Node::op(Op::Outer, vec![outer_a, outer_b])],
    );
  }

  if vectors_a.len() <= vectors_b.len() {
    let head = vectors_a[0].clone();
    let rest_a = Node::op(Op::Outer, vectors_a[1..].to_vec());
    Node::op(
      Op::Add,
      vec![
        Node::op(Op::Mul, vec![head.clone(), rest_a.clone(), outer_b.clone()]),
        Node::op(Op::Mul, vec![Node::scalar(-1.0), Node::op(Op::Inner, vec![head, rest_a]), outer_b]),
      ],
    )
  } else {
    let tail = vectors_b[vectors_b.len() - 1].clone();
    let rest_b = Node::op(Op::Outer, vectors_b[..vectors_b.len() - 1].to_vec());
    Node::op(
      Op::Add,
      vec![
        Node::op(Op::Mul, vec![outer_a.clone(), rest_b.clone(), tail.clone()]),
        Node::op(Op::Mul, vec![Node::scalar(-1.0), outer_a, Node::op(Op::Inner, vec![rest_b, tail])]),
      ],
    )
  }
}
