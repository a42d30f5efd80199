//! `OuterProductHandler`: sorts a `^` node's vector factors into a
//! canonical order, folding the bubble-sort swap parity into a sign.

use crate::blade::parse_blade;
use crate::error::SimplifyError;
use crate::node::{Node, Op};
use crate::pass::{stable_bubble_sort_by_key, Pass};

pub struct OuterProductHandler;

impl Pass for OuterProductHandler {
  fn name(&self) -> &'static str {
    "OuterProductHandler"
  }

  fn manipulate_subtree(&self, node: &Node) -> Result<Option<Node>, SimplifyError> {
    let Some(blade) = parse_blade(node)? else { return Ok(None) };

    for i in 0..blade.vectors.len() {
      for j in (i + 1)..blade.vectors.len() {
        if blade.vectors[i].data == blade.vectors[j].data {
          return Ok(Some(Node::scalar(0.0)));
        }
      }
    }

    let mut vectors = blade.vectors;
    let keys: Vec<String> = vectors.iter().map(Node::display_text).collect();
    let swaps = stable_bubble_sort_by_key(&mut vectors, keys);
    if swaps == 0 {
      return Ok(None);
    }

    let mut children = blade.scalars;
    children.extend(vectors);
    let mut new_node = Node::op(Op::Outer, children);
    if swaps % 2 == 1 {
      new_node.children.insert(0, Node::scalar(-1.0));
    }
    Ok(Some(new_node))
  }
}
