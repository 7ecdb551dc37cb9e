use std::path::PathBuf;

use serde::Serialize;

use crate::{ConcatSpec, CopySpec, RulePattern};

/// Verbosity of the cache plugin's own reporting, driven by the stats flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheInfoMode {
  None,
  Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheInfoLevel {
  Error,
  Debug,
}

/// One side-effect plugin activation. Order in the list is part of the
/// contract: later entries may depend on earlier ones having run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginSpec {
  /// Asynchronous type-check diagnostics reported during packaging instead
  /// of failing the chain inline. Ships disabled; see the
  /// `typecheckDiagnostics` option.
  TypeCheckDiagnostics { tsconfig: PathBuf, lint: bool },
  Cache { info_mode: CacheInfoMode, info_level: CacheInfoLevel },
  CopyAssets { context: PathBuf, specs: Vec<CopySpec> },
  ConcatText { spec: ConcatSpec },
  StripLocales { resource: RulePattern, context: RulePattern },
  IgnoreModule { resource: RulePattern },
  /// Defines a global flag some legacy package's own logic expects.
  DefineCompat { key: &'static str, value: &'static str },
}

impl PluginSpec {
  pub fn name(&self) -> &'static str {
    match self {
      Self::TypeCheckDiagnostics { .. } => "type-check-diagnostics",
      Self::Cache { .. } => "cache",
      Self::CopyAssets { .. } => "copy-assets",
      Self::ConcatText { .. } => "concat-text",
      Self::StripLocales { .. } => "strip-locales",
      Self::IgnoreModule { .. } => "ignore-module",
      Self::DefineCompat { .. } => "define-compat",
    }
  }
}
