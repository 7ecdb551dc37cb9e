use std::path::PathBuf;

use arcstr::ArcStr;
use rustc_hash::FxHashSet;

use crate::{BuildMode, ConcatSpec, CopySpec};

/// Every recognized option with its default applied, plus the computed
/// environment gates. An empty options document normalizes into a valid
/// minimal configuration.
#[allow(clippy::struct_excessive_bools)] // Using raw booleans is more clear in this case
#[derive(Debug, Clone)]
pub struct NormalizedPipelineOptions {
  pub root: PathBuf,
  pub mode: BuildMode,
  pub node_version: String,
  pub stats: bool,
  pub linting: bool,
  pub sourcemaps: bool,
  /// Already environment-gated: true only when the user asked for caching
  /// AND the build runs in local mode.
  pub caching: bool,
  pub typecheck_diagnostics: bool,
  pub externals: Vec<ArcStr>,
  pub no_parse: Vec<String>,
  pub copy_files: Vec<CopySpec>,
  pub concat_text: Vec<ConcatSpec>,
  pub ignore_packages: Vec<ArcStr>,
  pub fix_packages: FxHashSet<String>,
}

impl NormalizedPipelineOptions {
  #[inline]
  pub fn needs_fixup(&self, package: &str) -> bool {
    self.fix_packages.contains(package)
  }
}
