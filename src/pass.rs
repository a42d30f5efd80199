//! The single-pass walker shared by every rewrite pass.

use crate::error::SimplifyError;
use crate::node::Node;

/// One local rewrite rule. `manipulate_subtree` is the only method a pass
/// needs to implement; the default `manipulate_tree` gives every pass the
/// same deepest-first, first-match-returns walk.
pub trait Pass {
  fn name(&self) -> &'static str;

  /// Tries to rewrite `node` itself (not its descendants). `Ok(None)` means
  /// "no progress", not an error.
  fn manipulate_subtree(&self, node: &Node) -> Result<Option<Node>, SimplifyError>;

  /// Depth-first, deepest-first: recurse into children before touching the
  /// node itself, so that subtrees are as simplified as possible before a
  /// pass like the distributor might deep-copy them. The first child that
  /// rewrites wins and the walk stops there.
  fn manipulate_tree(&self, node: &Node) -> Result<Option<Node>, SimplifyError> {
    for (i, child) in node.children.iter().enumerate() {
      if let Some(new_child) = self.manipulate_tree(child)? {
        let mut new_node = node.clone();
        new_node.children[i] = new_child;
        return Ok(Some(new_node));
      }
    }
    self.manipulate_subtree(node)
  }
}

/// Stable bubble sort that reports the number of adjacent swaps it
/// performed. The swap count is load-bearing for the outer-product sign —
/// a sort that reports anything other than the exact bubble-sort swap
/// count produces wrong signs, hence the explicit bubble sort rather than
/// a library sort.
///
/// Keys are precomputed (rather than taking a closure) so callers whose key
/// function can fail (e.g. grade computation, which can raise
/// `AmbiguousInnerProduct`) compute them fallibly up front.
pub fn stable_bubble_sort_by_key<T, K: PartialOrd>(items: &mut [T], mut keys: Vec<K>) -> usize {
  let mut swap_count = 0;
  if items.len() > 1 {
    let mut keep_going = true;
    while keep_going {
      keep_going = false;
      for i in 0..items.len() - 1 {
        if keys[i] > keys[i + 1] {
          items.swap(i, i + 1);
          keys.swap(i, i + 1);
          swap_count += 1;
          keep_going = true;
        }
      }
    }
  }
  swap_count
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bubble_sort_counts_adjacent_swaps() {
    let mut items = vec!['c', 'a', 'b'];
    let keys = vec!['c', 'a', 'b'];
    let swaps = stable_bubble_sort_by_key(&mut items, keys);
    assert_eq!(items, vec!['a', 'b', 'c']);
    // c,a,b -> a,c,b (swap) -> a,b,c (swap): 2 adjacent swaps
    assert_eq!(swaps, 2);
  }

  #[test]
  fn bubble_sort_is_stable() {
    let mut items = vec![(1, "a"), (0, "b"), (1, "c")];
    let keys: Vec<i32> = items.iter().map(|(k, _)| *k).collect();
    stable_bubble_sort_by_key(&mut items, keys);
    assert_eq!(items, vec![(0, "b"), (1, "a"), (1, "c")]);
  }
}
