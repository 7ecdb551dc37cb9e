use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use serde::Serialize;

use crate::{BuildMode, EntryMap, ModuleRule, PluginSpec, RulePattern};

/// Functions are packaged for the node runtime; the tag never varies.
pub const TARGET_PLATFORM: &str = "node";

/// Directory the packager stages its own output and vendored toolchain in.
pub const OUTPUT_DIR: &str = ".fnpack";

pub const DEPENDENCY_DIR: &str = "node_modules";

/// Extension lookup order when a request has none. The typed/untyped source
/// extensions and the query-document extensions are both listed; which
/// chains exist is decided separately.
pub const DEFAULT_EXTENSIONS: [&str; 7] =
  [".wasm", ".mjs", ".js", ".json", ".ts", ".graphql", ".gql"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveSettings {
  /// Resolving through symlinks costs a stat per hop; packaging never needs it.
  pub symlinks: bool,
  pub extensions: Vec<&'static str>,
  /// Module lookup order: the packager's vendored toolchain first, then the
  /// project's own dependencies.
  pub modules: Vec<PathBuf>,
}

impl ResolveSettings {
  pub fn for_root(root: &Path) -> Self {
    Self {
      symlinks: false,
      extensions: DEFAULT_EXTENSIONS.to_vec(),
      modules: vec![root.join(OUTPUT_DIR).join(DEPENDENCY_DIR), PathBuf::from(DEPENDENCY_DIR)],
    }
  }
}

/// Optimization hints handed to the bundling engine. Minification stays off
/// in every mode: large builds exhaust memory when minimized.
#[allow(clippy::struct_excessive_bools)] // Using raw booleans is more clear in this case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Optimization {
  pub minimize: bool,
  pub split_chunks: bool,
  pub remove_empty_chunks: bool,
  pub remove_available_modules: bool,
}

impl Optimization {
  /// Chunking heuristics off for faster incremental builds.
  pub fn local() -> Self {
    Self {
      minimize: false,
      split_chunks: false,
      remove_empty_chunks: false,
      remove_available_modules: false,
    }
  }

  /// Default chunking, still no minification.
  pub fn deployed() -> Self {
    Self {
      minimize: false,
      split_chunks: true,
      remove_empty_chunks: true,
      remove_available_modules: true,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatsMode {
  Normal,
  ErrorsOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Devtool {
  SourceMap,
  None,
}

/// The complete pipeline descriptor. Created once per invocation and never
/// mutated afterwards; the bundling engine is its only consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineDescriptor {
  pub entries: EntryMap,
  pub target: &'static str,
  pub mode: BuildMode,
  pub stats: StatsMode,
  pub devtool: Devtool,
  pub externals: Vec<ArcStr>,
  /// Size warnings for entry points, always off.
  pub performance_hints: bool,
  pub resolve: ResolveSettings,
  pub rules: Vec<ModuleRule>,
  pub no_parse: Vec<RulePattern>,
  pub optimization: Optimization,
  pub plugins: Vec<PluginSpec>,
}

#[test]
fn test_resolve_settings_lookup_order() {
  let resolve = ResolveSettings::for_root(Path::new("/proj"));
  assert!(!resolve.symlinks);
  assert_eq!(resolve.extensions.first(), Some(&".wasm"));
  assert_eq!(
    resolve.modules,
    [PathBuf::from("/proj/.fnpack/node_modules"), PathBuf::from("node_modules")]
  );
}

#[test]
fn test_optimization_modes_never_minimize() {
  assert!(!Optimization::local().minimize);
  assert!(!Optimization::deployed().minimize);
  assert!(!Optimization::local().split_chunks);
  assert!(Optimization::deployed().split_chunks);
}
