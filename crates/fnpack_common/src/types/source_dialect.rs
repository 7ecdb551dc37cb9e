use std::fmt::Display;

/// Which source chain a project gets. Decided once at assembly start by
/// probing for the type-configuration artifact, then threaded as data; the
/// two chains are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDialect {
  Typed,
  Untyped,
}

impl SourceDialect {
  #[inline]
  pub fn is_typed(self) -> bool {
    matches!(self, Self::Typed)
  }
}

impl Display for SourceDialect {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Typed => write!(f, "typed"),
      Self::Untyped => write!(f, "untyped"),
    }
  }
}
