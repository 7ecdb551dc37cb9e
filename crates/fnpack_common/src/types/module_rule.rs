use std::path::PathBuf;

use serde::{Serialize, Serializer};

/// Compiled file pattern with string-based equality and serialization, so
/// rules stay comparable and the descriptor stays printable.
#[derive(Debug, Clone)]
pub struct RulePattern(regex::Regex);

impl RulePattern {
  pub fn new(pattern: &str) -> Result<Self, regex::Error> {
    regex::Regex::new(pattern).map(Self)
  }

  pub fn as_str(&self) -> &str {
    self.0.as_str()
  }

  pub fn is_match(&self, haystack: &str) -> bool {
    self.0.is_match(haystack)
  }
}

impl PartialEq for RulePattern {
  fn eq(&self, other: &Self) -> bool {
    self.as_str() == other.as_str()
  }
}

impl Eq for RulePattern {}

impl Serialize for RulePattern {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

/// Names of the compile-step transforms, as the bundling engine resolves them.
pub const RUNTIME_HELPERS_TRANSFORM: &str = "transform-runtime";
pub const CLASS_PROPERTIES_TRANSFORM: &str = "class-properties";
pub const SOURCE_MAP_SUPPORT_TRANSFORM: &str = "source-map-support";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileOptions {
  pub node_version: String,
  pub cache: bool,
  /// Compressing cache files costs more than it saves; always off.
  pub cache_compression: bool,
  pub transforms: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCheckOptions {
  pub transpile_only: bool,
  pub watch_api: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LintOptions {
  /// `None` means the packager's built-in lint config.
  pub base_config: Option<PathBuf>,
}

/// One processing step applied to a matched file. Within a chain, compile
/// always precedes type-check, and lint is always last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum LoaderStep {
  Compile(CompileOptions),
  TypeCheck(TypeCheckOptions),
  Lint(LintOptions),
  GraphqlTag,
}

impl LoaderStep {
  pub fn name(&self) -> &'static str {
    match self {
      Self::Compile(_) => "compile",
      Self::TypeCheck(_) => "type-check",
      Self::Lint(_) => "lint",
      Self::GraphqlTag => "graphql-tag",
    }
  }
}

/// Ordered steps for one file-pattern category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRule {
  pub test: RulePattern,
  pub exclude_patterns: Vec<RulePattern>,
  pub exclude_paths: Vec<PathBuf>,
  pub steps: Vec<LoaderStep>,
}

/// Output of the loader chain builder: the rule list plus the compiled
/// no-parse patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRules {
  pub rules: Vec<ModuleRule>,
  pub no_parse: Vec<RulePattern>,
}

#[test]
fn test_rule_pattern_compares_and_serializes_by_source() {
  let a = RulePattern::new(r"\.js$").unwrap();
  let b = RulePattern::new(r"\.js$").unwrap();
  let c = RulePattern::new(r"\.ts$").unwrap();
  assert_eq!(a, b);
  assert_ne!(a, c);
  assert!(a.is_match("src/handler.js"));
  assert!(!a.is_match("src/handler.ts"));

  let json = serde_json::to_value(&a).unwrap();
  assert_eq!(json, serde_json::json!(r"\.js$"));
}

#[test]
fn test_loader_step_serializes_tagged() {
  let step = LoaderStep::Lint(LintOptions::default());
  let json = serde_json::to_value(&step).unwrap();
  assert_eq!(json["step"], "lint");
}
