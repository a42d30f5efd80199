use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gatree::node::{Node, Op};
use gatree::simplify_tree;

/// A deeply nested chain of single-child products wrapping a vector sum
/// times a blade, exercising `DegenerateCaseHandler`'s arity-1 collapse
/// chained with the distributor/geometric-product interaction.
fn degenerate_chain(depth: usize) -> Node {
  let sum = Node::op(Op::Add, vec![Node::symbol("e1"), Node::symbol("e2")]);
  let mut node = Node::op(Op::Mul, vec![sum, Node::symbol("e3")]);
  for _ in 0..depth {
    node = Node::op(Op::Mul, vec![node]);
  }
  node
}

fn run(tree: &Node) -> usize {
  simplify_tree(tree.clone(), Some(500), None, |_| {}).map(|n| n.size()).unwrap_or(0)
}

fn criterion_benchmark(c: &mut Criterion) {
  let shallow = degenerate_chain(3);
  let deep = degenerate_chain(12);

  c.bench_function("simplify shallow degenerate chain", |b| b.iter(|| run(black_box(&shallow))));

  c.bench_function("simplify deep degenerate chain", |b| b.iter(|| run(black_box(&deep))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
