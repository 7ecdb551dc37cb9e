pub mod build_mode;
pub mod concat_spec;
pub mod copy_spec;
pub mod normalized_pipeline_options;

use serde::Deserialize;

use crate::{BuildMode, RawConcatSpec, RawCopySpec};

/// Raw, declarative project options as the user wrote them. Every field is
/// optional; normalization fills in the defaults. Keys that are not
/// recognized here are ignored during deserialization, not rejected.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOptions {
  /// Major version of the target runtime, e.g. `"18"`.
  pub node_version: Option<String>,
  pub stats: Option<bool>,
  pub linting: Option<bool>,
  pub sourcemaps: Option<bool>,
  pub caching: Option<bool>,
  /// Module names excluded from bundling on top of the fixed baseline.
  pub externals: Option<Vec<String>>,
  /// Pattern strings marking matched modules as opaque to deep inspection.
  pub no_parse: Option<Vec<String>>,
  pub copy_files: Option<Vec<RawCopySpec>>,
  pub concat_text: Option<Vec<RawConcatSpec>>,
  pub ignore_packages: Option<Vec<String>>,
  /// Packages whose quirks need a compatibility shim, e.g. `formidable@1.x`.
  pub fix_packages: Option<Vec<String>>,
  /// Asynchronous type-check diagnostics during packaging. Off by default:
  /// the checker's memory footprint is unbounded on large projects.
  pub typecheck_diagnostics: Option<bool>,
  pub mode: Option<BuildMode>,
}
