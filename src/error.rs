use std::error::Error;
use std::fmt;

/// Boxed static error type, used at DSL/parsing boundaries the way
/// `treebender::Err` is used for grammar parsing.
pub type Err = Box<dyn Error + 'static>;

/// Fatal and non-fatal outcomes of a rewrite attempt.
///
/// `NotImplemented` is deliberately absent here: a pass that reaches a case
/// outside its competence just returns `None` (no progress), it never
/// constructs an error value.
#[derive(Debug, Clone, PartialEq)]
pub enum SimplifyError {
  /// A rewrite produced a tree where some node's canonical string repeats
  /// elsewhere in the same tree.
  StructuralInvalid,
  /// The canonical expression string of a post-rewrite tree has been seen
  /// earlier in this run.
  CycleDetected { expression: String },
  /// Node count exceeded the caller-supplied `max_tree_size`.
  SizeExceeded { size: usize, limit: usize },
  /// Three or more children of a `.` node have nonzero grade.
  AmbiguousInnerProduct,
  /// A node tagged with a fixed-arity operator (`-`, `/`, `inv`, `rev`) was
  /// built with the wrong number of children.
  InvalidArity { op: &'static str, expected: usize, found: usize },
  /// The textual DSL grammar failed to parse.
  ParseError(String),
}

impl fmt::Display for SimplifyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::StructuralInvalid => write!(f, "manipulated tree is not valid"),
      Self::CycleDetected { expression } => {
        write!(f, "expression repeated: {}", expression)
      }
      Self::SizeExceeded { size, limit } => {
        write!(f, "tree size ({}) exceeded limit ({})", size, limit)
      }
      Self::AmbiguousInnerProduct => write!(f, "ambiguous inner product"),
      Self::InvalidArity { op, expected, found } => write!(
        f,
        "'{}' expects {} child(ren), found {}",
        op, expected, found
      ),
      Self::ParseError(msg) => write!(f, "parse error: {}", msg),
    }
  }
}

impl Error for SimplifyError {}
