//! `Multiplier`: collapses scalar-literal products and grade-0 identities.

use crate::error::SimplifyError;
use crate::grade::calculate_grade;
use crate::node::{Node, Op};
use crate::pass::{stable_bubble_sort_by_key, Pass};

pub struct Multiplier;

impl Pass for Multiplier {
  fn name(&self) -> &'static str {
    "Multiplier"
  }

  fn manipulate_subtree(&self, node: &Node) -> Result<Option<Node>, SimplifyError> {
    if !matches!(node.as_op(), Some(Op::Mul | Op::Inner | Op::Outer)) {
      return Ok(None);
    }

    for i in 0..node.children.len() {
      let Some(a) = node.children[i].as_scalar() else { continue };
      for j in (i + 1)..node.children.len() {
        let Some(b) = node.children[j].as_scalar() else { continue };
        let mut new_node = node.clone();
        new_node.children.remove(j);
        new_node.children.remove(i);
        new_node.children.insert(0, Node::scalar(a * b));
        return Ok(Some(new_node));
      }
    }

    // Pull a grade-0 descendant of a nested product up to this node
    // (scalar commutativity).
    for (bi, child) in node.children.iter().enumerate() {
      if !matches!(child.as_op(), Some(Op::Mul | Op::Inner | Op::Outer)) {
        continue;
      }
      for (ci, grandchild) in child.children.iter().enumerate() {
        if calculate_grade(grandchild)? == Some(0) {
          let mut new_node = node.clone();
          let hoisted = new_node.children[bi].children.remove(ci);
          new_node.children.insert(0, hoisted);
          return Ok(Some(new_node));
        }
      }
    }

    let mut new_node = node.clone();
    let grades: Vec<_> = new_node.children.iter().map(calculate_grade).collect::<Result<_, _>>()?;
    let keys: Vec<u8> = grades.iter().map(|g| if *g == Some(0) { 0 } else { 1 }).collect();
    let swaps = stable_bubble_sort_by_key(&mut new_node.children, keys);
    if swaps > 0 {
      Ok(Some(new_node))
    } else {
      Ok(None)
    }
  }
}
