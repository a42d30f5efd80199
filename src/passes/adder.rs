//! `Adder`: collapses scalar-literal sums and orders `+` children by grade.

use crate::error::SimplifyError;
use crate::node::{Node, Op};
use crate::pass::{stable_bubble_sort_by_key, Pass};

pub struct Adder;

impl Pass for Adder {
  fn name(&self) -> &'static str {
    "Adder"
  }

  fn manipulate_subtree(&self, node: &Node) -> Result<Option<Node>, SimplifyError> {
    if !node.is_op(Op::Add) {
      return Ok(None);
    }

    for i in 0..node.children.len() {
      let Some(a) = node.children[i].as_scalar() else { continue };
      for j in (i + 1)..node.children.len() {
        let Some(b) = node.children[j].as_scalar() else { continue };
        let mut new_node = node.clone();
        new_node.children.remove(j);
        new_node.children.remove(i);
        new_node.children.insert(0, Node::scalar(a + b));
        return Ok(Some(new_node));
      }
    }

    let mut new_node = node.clone();
    let keys: Vec<usize> = new_node.children.iter().map(|c| c.display_text().chars().count()).collect();
    let swaps = stable_bubble_sort_by_key(&mut new_node.children, keys);
    if swaps > 0 {
      Ok(Some(new_node))
    } else {
      Ok(None)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn combines_first_literal_pair() {
    let tree = Node::op(Op::Add, vec![Node::symbol("e1"), Node::scalar(2.0), Node::scalar(3.0)]);
    let result = Adder.manipulate_subtree(&tree).unwrap().unwrap();
    assert_eq!(result, Node::op(Op::Add, vec![Node::scalar(5.0), Node::symbol("e1")]));
  }

  #[test]
  fn sorts_terms_by_display_text_length_when_no_literals() {
    let tree = Node::op(Op::Add, vec![Node::symbol("bbbb"), Node::symbol("a")]);
    let result = Adder.manipulate_subtree(&tree).unwrap().unwrap();
    assert_eq!(result, Node::op(Op::Add, vec![Node::symbol("a"), Node::symbol("bbbb")]));
  }

  #[test]
  fn declines_when_already_sorted_and_no_literals() {
    let tree = Node::op(Op::Add, vec![Node::symbol("a"), Node::symbol("bb")]);
    assert!(Adder.manipulate_subtree(&tree).unwrap().is_none());
  }
}
