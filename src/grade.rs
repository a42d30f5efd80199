//! Geometric algebra grade calculus.

use crate::error::SimplifyError;
use crate::node::{Node, NodeData, Op};

/// `None` means undefined (a mixed multivector, or an op this calculus
/// doesn't assign a grade to at all).
pub type Grade = Option<u32>;

pub fn calculate_grade(node: &Node) -> Result<Grade, SimplifyError> {
  match &node.data {
    NodeData::Scalar(_) => Ok(Some(0)),
    NodeData::Symbol(s) => {
      if s.starts_with('$') {
        Ok(Some(0))
      } else if node.children.is_empty() && s.chars().next().is_some_and(|c| c.is_alphabetic()) {
        Ok(Some(1))
      } else {
        Ok(None)
      }
    }
    NodeData::Op(op) => calculate_op_grade(*op, node),
  }
}

fn calculate_op_grade(op: Op, node: &Node) -> Result<Grade, SimplifyError> {
  if !matches!(op, Op::Add | Op::Outer | Op::Inner | Op::Mul | Op::Inv) {
    // '-', '/', 'rev' are undefined here; they're gone before grade matters.
    return Ok(None);
  }
  if node.children.is_empty() {
    return Ok(Some(0));
  }
  let grades: Vec<Grade> = node.children.iter().map(calculate_grade).collect::<Result<_, _>>()?;
  if grades.iter().any(Option::is_none) {
    return Ok(None);
  }
  let grades: Vec<u32> = grades.into_iter().map(|g| g.unwrap()).collect();
  if grades.len() == 1 {
    return Ok(Some(grades[0]));
  }
  match op {
    Op::Add => {
      if grades.iter().all(|&g| g == grades[0]) {
        Ok(Some(grades[0]))
      } else {
        Ok(None)
      }
    }
    Op::Outer => Ok(Some(grades.iter().sum())),
    Op::Inner => {
      let nonzero: Vec<u32> = grades.into_iter().filter(|&g| g != 0).collect();
      match nonzero.len() {
        0 => Ok(Some(0)),
        1 => Ok(Some(nonzero[0])),
        2 => Ok(Some(nonzero[0].abs_diff(nonzero[1]))),
        _ => Err(SimplifyError::AmbiguousInnerProduct),
      }
    }
    // '*' and 'inv' with more than one grade-bearing child: undefined.
    Op::Mul | Op::Inv => Ok(None),
    _ => unreachable!(),
  }
}
