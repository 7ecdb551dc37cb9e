use thiserror::Error;

/// User-facing configuration failures. These abort assembly immediately and
/// always name the offending key, index or pattern so the caller can fix the
/// options document. Never retried: the same input reproduces the same error.
#[derive(Debug, Error)]
pub enum ConfigurationError {
  #[error("invalid pattern {pattern:?}: {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  #[error("copy spec #{index} is missing required field `{field}`")]
  InvalidCopySpec { index: usize, field: &'static str },

  #[error("concat spec #{index} is missing required field `{field}`")]
  InvalidConcatSpec { index: usize, field: &'static str },

  #[error("malformed options document: {reason}")]
  Malformed { reason: String },
}

/// Violated internal invariants. These indicate a logic defect rather than a
/// user input problem and should never occur in correct operation.
#[derive(Debug, Error)]
pub enum AssemblyError {
  #[error("both typed and untyped source chains were selected")]
  ConflictingSourceChains,

  #[error("no source chain was selected")]
  MissingSourceChain,
}

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error(transparent)]
  Configuration(#[from] ConfigurationError),

  #[error(transparent)]
  Assembly(#[from] AssemblyError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

#[test]
fn test_error_messages_carry_context() {
  let err = ConfigurationError::InvalidCopySpec { index: 2, field: "from" };
  assert_eq!(err.to_string(), "copy spec #2 is missing required field `from`");

  let err = PipelineError::from(AssemblyError::ConflictingSourceChains);
  assert!(err.to_string().contains("typed and untyped"));
}
