use serde::{Deserialize, Serialize};

/// Concatenation spec as written in the options document.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConcatSpec {
  pub files: Option<Vec<String>>,
  pub name: Option<String>,
  pub output_path: Option<String>,
}

/// Validated concatenation spec: the glob of files to join, the name of the
/// joined output, and an optional output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcatSpec {
  pub files: Vec<String>,
  pub name: String,
  pub output_path: Option<String>,
}
