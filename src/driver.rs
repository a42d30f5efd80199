//! The fixed-point driver, ported from module-level `manipulate_tree()`
//! in `math_tree.py`.

use std::collections::HashSet;

use crate::error::SimplifyError;
use crate::node::Node;
use crate::pass::Pass;

/// Runs `passes` against `root` in priority order until a fixed point, a
/// fatal condition, or `max_iters` is reached.
///
/// Each iteration tries every pass in order; the first one that rewrites
/// wins and the loop restarts from the top of the pass list on the new
/// tree. If every pass declines, `root` is the fixed point and is
/// returned. If `max_iters` is reached first, the current (not
/// necessarily fixed-point) tree is returned without error.
pub fn manipulate_tree(
  root: Node,
  passes: &[Box<dyn Pass + '_>],
  max_iters: Option<u32>,
  max_tree_size: Option<usize>,
  mut log: impl FnMut(&str),
) -> Result<Node, SimplifyError> {
  let mut node = root;
  let mut seen_expressions: HashSet<String> = HashSet::new();
  seen_expressions.insert(node.expression_text());

  let mut iter_count: u32 = 0;
  loop {
    if let Some(max) = max_iters {
      if iter_count >= max {
        tracing::debug!(iter_count, "iteration limit reached");
        break;
      }
    }
    iter_count += 1;

    let mut rewrote = false;
    for pass in passes {
      let attempt = pass.manipulate_tree(&node)?;
      let Some(new_node) = attempt else {
        tracing::trace!(pass = pass.name(), "declined");
        continue;
      };

      log(pass.name());
      tracing::debug!(pass = pass.name(), iter_count, "rewrite applied");

      if !new_node.is_valid() {
        return Err(SimplifyError::StructuralInvalid);
      }

      let tree_size = new_node.size();
      log(&format!("tree size: {}", tree_size));
      if let Some(limit) = max_tree_size {
        if tree_size > limit {
          tracing::debug!(tree_size, limit, "size guard tripped");
          return Err(SimplifyError::SizeExceeded { size: tree_size, limit });
        }
      }

      let expression_text = new_node.expression_text();
      if seen_expressions.contains(&expression_text) {
        tracing::debug!(expression = %expression_text, "cycle guard tripped");
        return Err(SimplifyError::CycleDetected { expression: expression_text });
      }
      seen_expressions.insert(expression_text);

      node = new_node;
      rewrote = true;
      break;
    }

    if !rewrote {
      break;
    }
  }

  Ok(node)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::Op;
  use crate::passes::DegenerateCaseHandler;

  fn boxed(p: impl Pass + 'static) -> Box<dyn Pass> {
    Box::new(p)
  }

  #[test]
  fn fixed_point_returns_when_no_pass_rewrites() {
    let tree = Node::symbol("e1");
    let passes: Vec<Box<dyn Pass>> = vec![boxed(DegenerateCaseHandler)];
    let result = manipulate_tree(tree.clone(), &passes, None, None, |_| {}).unwrap();
    assert_eq!(result, tree);
  }

  #[test]
  fn degenerate_chain_collapses_to_fixed_point() {
    // *(*(*(e1))) should unwrap down to the bare atom.
    let tree = Node::op(Op::Mul, vec![Node::op(Op::Mul, vec![Node::op(Op::Mul, vec![Node::symbol("e1")])])]);
    let passes: Vec<Box<dyn Pass>> = vec![boxed(DegenerateCaseHandler)];
    let result = manipulate_tree(tree, &passes, None, None, |_| {}).unwrap();
    assert_eq!(result, Node::symbol("e1"));
  }

  #[test]
  fn size_guard_trips_fatal() {
    let tree = Node::op(Op::Mul, vec![Node::scalar(0.0), Node::symbol("e1"), Node::symbol("e2")]);
    let passes: Vec<Box<dyn Pass>> = vec![boxed(DegenerateCaseHandler)];
    // the tree itself (3 nodes: *, scalar, e1) plus its children already
    // exceeds a limit of 1, so the very first accepted rewrite trips it.
    let err = manipulate_tree(tree, &passes, None, Some(0), |_| {}).unwrap_err();
    assert!(matches!(err, SimplifyError::SizeExceeded { .. }));
  }

  #[test]
  fn iter_limit_returns_current_tree_without_error() {
    let tree = Node::op(Op::Mul, vec![Node::op(Op::Mul, vec![Node::symbol("e1")])]);
    let passes: Vec<Box<dyn Pass>> = vec![boxed(DegenerateCaseHandler)];
    let result = manipulate_tree(tree, &passes, Some(0), None, |_| {}).unwrap();
    // zero iterations allowed: driver returns the tree untouched.
    assert_eq!(result, Node::op(Op::Mul, vec![Node::op(Op::Mul, vec![Node::symbol("e1")])]));
  }
}
