use std::path::Path;
use std::sync::LazyLock;

use tracing::debug;

use fnpack_common::{
  CLASS_PROPERTIES_TRANSFORM, CompileOptions, DEPENDENCY_DIR, LintOptions, LoaderStep, ModuleRule,
  ModuleRules, NormalizedPipelineOptions, OUTPUT_DIR, RUNTIME_HELPERS_TRANSFORM, RulePattern,
  SOURCE_MAP_SUPPORT_TRANSFORM, SourceDialect, TypeCheckOptions,
};
use fnpack_error::{ConfigurationError, PipelineResult};
use fnpack_fs::FileSystem;

/// Conventional path probed under the project root to pick the source chain.
pub const TYPE_CONFIG_FILE: &str = "tsconfig.json";

/// Deploy staging directory of the platform tooling this packager plugs into.
pub const STAGING_DIR: &str = ".serverless";

pub const TYPED_SOURCE_PATTERN: &str = r"\.(ts|js)$";
pub const UNTYPED_SOURCE_PATTERN: &str = r"\.js$";
pub const QUERY_DOCUMENT_PATTERN: &str = r"\.(graphql|gql)$";

static TYPED_SOURCE: LazyLock<RulePattern> =
  LazyLock::new(|| RulePattern::new(TYPED_SOURCE_PATTERN).unwrap());
static UNTYPED_SOURCE: LazyLock<RulePattern> =
  LazyLock::new(|| RulePattern::new(UNTYPED_SOURCE_PATTERN).unwrap());
static QUERY_DOCUMENT: LazyLock<RulePattern> =
  LazyLock::new(|| RulePattern::new(QUERY_DOCUMENT_PATTERN).unwrap());
static DEPENDENCY_DIR_RE: LazyLock<RulePattern> =
  LazyLock::new(|| RulePattern::new(DEPENDENCY_DIR).unwrap());

/// Probes for the type-configuration artifact. The decision is made once and
/// threaded as data from here on; nothing re-checks the filesystem.
pub fn detect_source_dialect(fs: &impl FileSystem, root: &Path) -> SourceDialect {
  let dialect = if fs.is_file(&root.join(TYPE_CONFIG_FILE)) {
    SourceDialect::Typed
  } else {
    SourceDialect::Untyped
  };
  debug!(%dialect, "selected source chain");
  dialect
}

/// Builds the module rules for the selected dialect. Exactly one source
/// chain is registered, first in the list; the other is entirely absent.
pub fn build_module_rules(
  options: &NormalizedPipelineOptions,
  dialect: SourceDialect,
) -> PipelineResult<ModuleRules> {
  let mut rules = Vec::with_capacity(2);
  rules.push(match dialect {
    SourceDialect::Typed => typed_source_rule(options),
    SourceDialect::Untyped => untyped_source_rule(options),
  });

  // Lint diagnostics must reflect post-normalization state, so the step
  // goes last on the source chain.
  if options.linting {
    if let Some(rule) = rules.first_mut() {
      rule.steps.push(LoaderStep::Lint(LintOptions::default()));
    }
  }

  rules.push(query_document_rule());

  let no_parse = compile_no_parse(&options.no_parse)?;
  Ok(ModuleRules { rules, no_parse })
}

fn compile_step(options: &NormalizedPipelineOptions) -> LoaderStep {
  let mut transforms = vec![RUNTIME_HELPERS_TRANSFORM, CLASS_PROPERTIES_TRANSFORM];
  if options.sourcemaps {
    transforms.push(SOURCE_MAP_SUPPORT_TRANSFORM);
  }
  LoaderStep::Compile(CompileOptions {
    node_version: options.node_version.clone(),
    cache: options.caching,
    cache_compression: false,
    transforms,
  })
}

fn typed_source_rule(options: &NormalizedPipelineOptions) -> ModuleRule {
  ModuleRule {
    test: TYPED_SOURCE.clone(),
    exclude_patterns: Vec::new(),
    exclude_paths: vec![
      options.root.join(DEPENDENCY_DIR),
      options.root.join(STAGING_DIR),
      options.root.join(OUTPUT_DIR),
    ],
    steps: vec![
      compile_step(options),
      LoaderStep::TypeCheck(TypeCheckOptions { transpile_only: true, watch_api: true }),
    ],
  }
}

fn untyped_source_rule(options: &NormalizedPipelineOptions) -> ModuleRule {
  ModuleRule {
    test: UNTYPED_SOURCE.clone(),
    exclude_patterns: vec![DEPENDENCY_DIR_RE.clone()],
    exclude_paths: Vec::new(),
    steps: vec![compile_step(options)],
  }
}

fn query_document_rule() -> ModuleRule {
  ModuleRule {
    test: QUERY_DOCUMENT.clone(),
    exclude_patterns: vec![DEPENDENCY_DIR_RE.clone()],
    exclude_paths: Vec::new(),
    steps: vec![LoaderStep::GraphqlTag],
  }
}

fn compile_no_parse(patterns: &[String]) -> Result<Vec<RulePattern>, ConfigurationError> {
  patterns
    .iter()
    .map(|pattern| {
      RulePattern::new(pattern)
        .map_err(|source| ConfigurationError::InvalidPattern { pattern: pattern.clone(), source })
    })
    .collect()
}

#[cfg(test)]
fn normalized(raw: fnpack_common::PipelineOptions) -> NormalizedPipelineOptions {
  crate::utils::normalize_options::normalize_options(raw, Path::new("/proj")).unwrap()
}

#[test]
fn test_dialect_follows_the_type_config_probe() {
  use fnpack_fs::MemoryFileSystem;

  let fs = MemoryFileSystem::with_files(["/proj/tsconfig.json"]);
  assert_eq!(detect_source_dialect(&fs, Path::new("/proj")), SourceDialect::Typed);
  assert_eq!(detect_source_dialect(&fs, Path::new("/other")), SourceDialect::Untyped);
}

#[test]
fn test_untyped_chain_has_no_type_check_and_lints_last() {
  let options = normalized(fnpack_common::PipelineOptions::default());
  let built = build_module_rules(&options, SourceDialect::Untyped).unwrap();

  let source = &built.rules[0];
  assert_eq!(source.test.as_str(), UNTYPED_SOURCE_PATTERN);
  let names: Vec<_> = source.steps.iter().map(LoaderStep::name).collect();
  assert_eq!(names, ["compile", "lint"]);

  // The typed chain's pattern appears nowhere.
  assert!(built.rules.iter().all(|rule| rule.test.as_str() != TYPED_SOURCE_PATTERN));
}

#[test]
fn test_typed_chain_compiles_then_type_checks_then_lints() {
  let options = normalized(fnpack_common::PipelineOptions::default());
  let built = build_module_rules(&options, SourceDialect::Typed).unwrap();

  let source = &built.rules[0];
  assert_eq!(source.test.as_str(), TYPED_SOURCE_PATTERN);
  let names: Vec<_> = source.steps.iter().map(LoaderStep::name).collect();
  assert_eq!(names, ["compile", "type-check", "lint"]);
  assert_eq!(
    source.exclude_paths,
    [
      Path::new("/proj/node_modules"),
      Path::new("/proj/.serverless"),
      Path::new("/proj/.fnpack")
    ]
  );
}

#[test]
fn test_lint_step_is_absent_when_linting_is_off() {
  let options = normalized(fnpack_common::PipelineOptions {
    linting: Some(false),
    ..Default::default()
  });
  let built = build_module_rules(&options, SourceDialect::Untyped).unwrap();
  let names: Vec<_> = built.rules[0].steps.iter().map(LoaderStep::name).collect();
  assert_eq!(names, ["compile"]);
}

#[test]
fn test_source_map_transform_follows_the_option() {
  let options = normalized(fnpack_common::PipelineOptions {
    sourcemaps: Some(false),
    ..Default::default()
  });
  let built = build_module_rules(&options, SourceDialect::Untyped).unwrap();
  let LoaderStep::Compile(compile) = &built.rules[0].steps[0] else {
    panic!("first step must be compile");
  };
  assert_eq!(compile.transforms, [RUNTIME_HELPERS_TRANSFORM, CLASS_PROPERTIES_TRANSFORM]);
  assert!(!compile.cache_compression);
}

#[test]
fn test_query_document_rule_is_registered_after_the_source_chain() {
  let options = normalized(fnpack_common::PipelineOptions::default());
  let built = build_module_rules(&options, SourceDialect::Untyped).unwrap();
  assert_eq!(built.rules.len(), 2);
  assert_eq!(built.rules[1].test.as_str(), QUERY_DOCUMENT_PATTERN);
  assert_eq!(built.rules[1].steps, [LoaderStep::GraphqlTag]);
}

#[test]
fn test_invalid_no_parse_pattern_fails_loudly() {
  use fnpack_error::PipelineError;

  let options = normalized(fnpack_common::PipelineOptions {
    no_parse: Some(vec!["jquery".into(), "(unclosed".into()]),
    ..Default::default()
  });
  let err = build_module_rules(&options, SourceDialect::Untyped).unwrap_err();
  match err {
    PipelineError::Configuration(ConfigurationError::InvalidPattern { pattern, .. }) => {
      assert_eq!(pattern, "(unclosed");
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_no_parse_patterns_compile_in_order() {
  let options = normalized(fnpack_common::PipelineOptions {
    no_parse: Some(vec!["jquery".into(), r"\.min\.js$".into()]),
    ..Default::default()
  });
  let built = build_module_rules(&options, SourceDialect::Untyped).unwrap();
  assert_eq!(built.no_parse.len(), 2);
  assert!(built.no_parse[1].is_match("vendor/lib.min.js"));
}
