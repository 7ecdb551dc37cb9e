use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Copy spec as written in the options document. Field presence is checked
/// during normalization, not here.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawCopySpec {
  pub from: Option<String>,
  pub to: Option<String>,
}

/// Validated copy spec. `from` stays relative to the project root until the
/// plugin chain resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopySpec {
  pub from: PathBuf,
  pub to: String,
}
