//! A term-rewrite engine for conformal geometric algebra expressions.
//!
//! Given a free-form expression tree over scalars, symbolic vectors, and
//! the operators `+ - * . ^ / inv rev`, [`simplify_tree`] applies a fixed
//! pipeline of local rewrite passes until the tree reaches a fixed point
//! or a fatal termination condition fires. See `SPEC_FULL.md` for the full
//! design; this module wires the pieces described there together.

#[macro_use]
extern crate lazy_static;

pub mod bilinear;
pub mod blade;
mod driver;
mod dsl;
pub mod error;
pub mod grade;
pub mod node;
pub mod pass;
pub mod passes;

pub use bilinear::{conformal_bilinear_form, BilinearForm};
pub use blade::{parse_blade, Blade};
pub use driver::manipulate_tree;
pub use error::{Err, SimplifyError};
pub use grade::{calculate_grade, Grade};
pub use node::{Node, NodeData, Op};
pub use pass::Pass;

use passes::{
  Adder, Associator, DegenerateCaseHandler, Distributor, GeometricProductHandler, InnerProductHandler, Inverter,
  Multiplier, OuterProductHandler,
};

/// The public entry point. Builds the fixed priority-ordered pass
/// list — `InnerProductHandler, Associator, DegenerateCaseHandler, Inverter,
/// GeometricProductHandler, Adder, Multiplier, OuterProductHandler,
/// Distributor` — and hands it to [`manipulate_tree`] with no tree-size cap,
/// exactly as `math_tree.py`'s `simplify_tree` does (it relies on the cycle
/// guard alone unless the caller goes through the lower-level
/// `manipulate_tree` entry point for a `max_tree_size`).
///
/// `bilinear_form` defaults to [`conformal_bilinear_form`] when `None`.
pub fn simplify_tree<'a>(
  root: Node,
  max_iters: Option<u32>,
  bilinear_form: Option<&'a BilinearForm<'a>>,
  log: impl FnMut(&str),
) -> Result<Node, SimplifyError> {
  let default_form: &BilinearForm = &conformal_bilinear_form;
  let form = bilinear_form.unwrap_or(default_form);

  let passes: Vec<Box<dyn Pass + 'a>> = vec![
    Box::new(InnerProductHandler::new(form)),
    Box::new(Associator),
    Box::new(DegenerateCaseHandler),
    Box::new(Inverter),
    Box::new(GeometricProductHandler),
    Box::new(Adder),
    Box::new(Multiplier),
    Box::new(OuterProductHandler),
    Box::new(Distributor),
  ];

  manipulate_tree(root, &passes, max_iters, None, log)
}

/// `e1` vector atom constructor, part of the tree constructor API exposed
/// to the out-of-scope UI collaborator.
pub fn e1() -> Node {
  Node::symbol("e1")
}

pub fn e2() -> Node {
  Node::symbol("e2")
}

pub fn e3() -> Node {
  Node::symbol("e3")
}

/// The conformal origin null vector.
pub fn no() -> Node {
  Node::symbol("no")
}

/// The conformal point-at-infinity null vector.
pub fn ni() -> Node {
  Node::symbol("ni")
}

pub fn scalar(value: f64) -> Node {
  Node::scalar(value)
}

pub fn sym(name: impl Into<String>) -> Node {
  Node::symbol(name)
}

/// `_v(x, y, z) = x*e1 + y*e2 + z*e3`, the Euclidean-vector DSL binding
/// the interactive shell exposes among its symbol bindings.
pub fn vector3(x: f64, y: f64, z: f64) -> Node {
  Node::op(
    Op::Add,
    vec![
      Node::op(Op::Mul, vec![Node::scalar(x), e1()]),
      Node::op(Op::Mul, vec![Node::scalar(y), e2()]),
      Node::op(Op::Mul, vec![Node::scalar(z), e3()]),
    ],
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn simplify(root: Node) -> Node {
    simplify_tree(root, None, None, |_| {}).unwrap()
  }

  // S1: e1 ^ e2 -> ^(e1, e2)
  #[test]
  fn s1_outer_product_of_distinct_basis_vectors_is_stable() {
    let tree = Node::op(Op::Outer, vec![e1(), e2()]);
    assert_eq!(simplify(tree), Node::op(Op::Outer, vec![e1(), e2()]));
  }

  // S2: e2 ^ e1 -> ^(-1.00, e1, e2) (the outer-product handler rebuilds the
  // sign-corrected blade as a single `^` node, not a `*` wrapping a `^`;
  // see DESIGN.md's note on this).
  #[test]
  fn s2_outer_product_antisymmetry() {
    let tree = Node::op(Op::Outer, vec![e2(), e1()]);
    assert_eq!(simplify(tree), Node::op(Op::Outer, vec![Node::scalar(-1.0), e1(), e2()]));
  }

  // S3: e1 ^ e1 -> 0.00
  #[test]
  fn s3_outer_product_of_vector_with_itself_vanishes() {
    let tree = Node::op(Op::Outer, vec![e1(), e1()]);
    assert_eq!(simplify(tree), Node::scalar(0.0));
  }

  // S4: e1 . e1 -> 1.00
  #[test]
  fn s4_inner_product_of_unit_vector_with_itself() {
    let tree = Node::op(Op::Inner, vec![e1(), e1()]);
    assert_eq!(simplify(tree), Node::scalar(1.0));
  }

  // S5: no . ni -> -1.00
  #[test]
  fn s5_conformal_null_vectors_pair_to_minus_one() {
    let tree = Node::op(Op::Inner, vec![no(), ni()]);
    assert_eq!(simplify(tree), Node::scalar(-1.0));
  }

  // S6: (e1 + e2) * e3 -> +(^(e1, e3), ^(e2, e3)) up to term order
  #[test]
  fn s6_distributes_sum_times_vector_into_outer_products() {
    let sum = Node::op(Op::Add, vec![e1(), e2()]);
    let tree = Node::op(Op::Mul, vec![sum, e3()]);
    let result = simplify(tree);
    assert!(result.is_op(Op::Add));
    assert_eq!(result.children.len(), 2);
    for child in &result.children {
      assert!(child.is_op(Op::Outer));
    }
  }

  // S7: inv(2.0) -> 0.50
  #[test]
  fn s7_inverse_of_scalar_literal() {
    let tree = Node::op(Op::Inv, vec![Node::scalar(2.0)]);
    assert_eq!(simplify(tree), Node::scalar(0.5));
  }

  // S8: rev(e1 ^ e2 ^ e3). The (-1)^{k(k-1)/2} sign rule is only wired up
  // for grade 0/1 operands and for `rev` distributed over an explicit `*`
  // chain; `rev` applied directly to a >=2-vector `^` blade has no rewrite
  // rule in the ported pass set (matching `inverter.py`'s
  // `if node_a.data == 'rev'` branch, which only returns for grade 0/1)
  // and so reaches its fixed point unreduced. Recorded as a known gap in
  // DESIGN.md rather than inventing a rule that was never specified.
  #[test]
  fn s8_reverse_of_trivector_has_no_rewrite_rule() {
    let tree = Node::op(Op::Rev, vec![Node::op(Op::Outer, vec![e1(), e2(), e3()])]);
    let result = simplify(tree);
    assert_eq!(result, Node::op(Op::Rev, vec![Node::op(Op::Outer, vec![e1(), e2(), e3()])]));
  }

  #[test]
  fn rev_of_product_chain_reverses_factor_order_and_preserves_grade() {
    let tree = Node::op(Op::Rev, vec![Node::op(Op::Mul, vec![e1(), e2(), e3()])]);
    let result = simplify(tree);
    assert_eq!(calculate_grade(&result).unwrap(), Some(3));
  }

  #[test]
  fn scalar_arithmetic_collapses_to_one_literal() {
    let tree = Node::op(Op::Add, vec![Node::scalar(1.0), Node::scalar(2.0), Node::scalar(3.0)]);
    assert_eq!(simplify(tree), Node::scalar(6.0));
  }

  #[test]
  fn euclidean_metric_is_identity() {
    for (a, b) in [(e1(), e1()), (e2(), e2()), (e3(), e3())] {
      assert_eq!(simplify(Node::op(Op::Inner, vec![a, b])), Node::scalar(1.0));
    }
    for (a, b) in [(e1(), e2()), (e2(), e3()), (e1(), e3())] {
      assert_eq!(simplify(Node::op(Op::Inner, vec![a, b])), Node::scalar(0.0));
    }
  }

  #[test]
  fn ambiguous_inner_product_is_an_error() {
    let tree = Node::op(Op::Inner, vec![e1(), e2(), e3()]);
    assert!(matches!(simplify_tree(tree, None, None, |_| {}), Err(SimplifyError::AmbiguousInnerProduct)));
  }

  #[test]
  fn vector3_constructor_builds_weighted_sum() {
    let v = vector3(1.0, 2.0, 3.0);
    assert!(v.is_op(Op::Add));
    assert_eq!(v.children.len(), 3);
  }
}
