use std::sync::LazyLock;

use fnpack_common::{
  CacheInfoLevel, CacheInfoMode, CopySpec, NormalizedPipelineOptions, PluginSpec, RulePattern,
  SourceDialect,
};
use fnpack_error::{ConfigurationError, PipelineResult};

use crate::loaders::TYPE_CONFIG_FILE;

/// Locale directories of the moment-style date libraries. Stripping them is
/// the single biggest artifact-size win and never changes behavior.
static LOCALE_RESOURCE: LazyLock<RulePattern> =
  LazyLock::new(|| RulePattern::new(r"^\./locale$").unwrap());
static LOCALE_CONTEXT: LazyLock<RulePattern> =
  LazyLock::new(|| RulePattern::new(r"moment$").unwrap());

/// The one fixup currently understood: formidable 1.x probes a `GENTLY`
/// global to decide whether it is being instrumented.
pub const FORMIDABLE_FIXUP: &str = "formidable@1.x";

/// Side-effect plugin activations, in execution order. The order is part of
/// the contract, not incidental.
pub fn build_plugins(
  options: &NormalizedPipelineOptions,
  dialect: SourceDialect,
) -> PipelineResult<Vec<PluginSpec>> {
  let mut plugins = Vec::new();

  if dialect.is_typed() && options.typecheck_diagnostics {
    plugins.push(PluginSpec::TypeCheckDiagnostics {
      tsconfig: options.root.join(TYPE_CONFIG_FILE),
      lint: options.linting,
    });
  }

  // Normalization already gated this on local mode.
  if options.caching {
    plugins.push(PluginSpec::Cache {
      info_mode: if options.stats { CacheInfoMode::Test } else { CacheInfoMode::None },
      info_level: if options.stats { CacheInfoLevel::Debug } else { CacheInfoLevel::Error },
    });
  }

  if !options.copy_files.is_empty() {
    plugins.push(PluginSpec::CopyAssets {
      context: options.root.clone(),
      specs: options
        .copy_files
        .iter()
        .map(|spec| CopySpec { from: options.root.join(&spec.from), to: spec.to.clone() })
        .collect(),
    });
  }

  // Only the last concat spec takes effect. Unintuitive, but callers depend
  // on it; merging all specs would change observable behavior.
  if let Some(spec) = options.concat_text.last() {
    plugins.push(PluginSpec::ConcatText { spec: spec.clone() });
  }

  plugins.push(PluginSpec::StripLocales {
    resource: LOCALE_RESOURCE.clone(),
    context: LOCALE_CONTEXT.clone(),
  });

  for package in &options.ignore_packages {
    let pattern = format!("^{package}$");
    let resource = RulePattern::new(&pattern)
      .map_err(|source| ConfigurationError::InvalidPattern { pattern, source })?;
    plugins.push(PluginSpec::IgnoreModule { resource });
  }

  if options.needs_fixup(FORMIDABLE_FIXUP) {
    plugins.push(PluginSpec::DefineCompat { key: "global.GENTLY", value: "false" });
  }

  Ok(plugins)
}

#[cfg(test)]
fn normalized(raw: fnpack_common::PipelineOptions) -> NormalizedPipelineOptions {
  crate::utils::normalize_options::normalize_options(raw, std::path::Path::new("/proj")).unwrap()
}

#[test]
fn test_minimal_options_activate_only_the_locale_stripper() {
  let options = normalized(fnpack_common::PipelineOptions::default());
  let plugins = build_plugins(&options, SourceDialect::Untyped).unwrap();
  let names: Vec<_> = plugins.iter().map(PluginSpec::name).collect();
  assert_eq!(names, ["strip-locales"]);
}

#[test]
fn test_cache_plugin_reflects_the_stats_flag() {
  use fnpack_common::BuildMode;

  let options = normalized(fnpack_common::PipelineOptions {
    mode: Some(BuildMode::Local),
    stats: Some(true),
    ..Default::default()
  });
  let plugins = build_plugins(&options, SourceDialect::Untyped).unwrap();
  assert_eq!(
    plugins[0],
    PluginSpec::Cache { info_mode: CacheInfoMode::Test, info_level: CacheInfoLevel::Debug }
  );

  let options = normalized(fnpack_common::PipelineOptions {
    mode: Some(BuildMode::Local),
    ..Default::default()
  });
  let plugins = build_plugins(&options, SourceDialect::Untyped).unwrap();
  assert_eq!(
    plugins[0],
    PluginSpec::Cache { info_mode: CacheInfoMode::None, info_level: CacheInfoLevel::Error }
  );
}

#[test]
fn test_copy_specs_resolve_against_the_project_root() {
  use fnpack_common::RawCopySpec;
  use std::path::{Path, PathBuf};

  let options = normalized(fnpack_common::PipelineOptions {
    copy_files: Some(vec![RawCopySpec {
      from: Some("public".into()),
      to: Some("static".into()),
    }]),
    ..Default::default()
  });
  let plugins = build_plugins(&options, SourceDialect::Untyped).unwrap();
  let Some(PluginSpec::CopyAssets { context, specs }) = plugins.first() else {
    panic!("copy-assets must come first for minimal untyped options");
  };
  assert_eq!(context, Path::new("/proj"));
  assert_eq!(specs[0], CopySpec { from: PathBuf::from("/proj/public"), to: "static".into() });
}

#[test]
fn test_last_concat_spec_wins() {
  use fnpack_common::{ConcatSpec, RawConcatSpec};

  let options = normalized(fnpack_common::PipelineOptions {
    concat_text: Some(vec![
      RawConcatSpec {
        files: Some(vec!["a/*.env".into()]),
        name: Some("first.env".into()),
        output_path: None,
      },
      RawConcatSpec {
        files: Some(vec!["b/*.env".into()]),
        name: Some("second.env".into()),
        output_path: Some("config".into()),
      },
    ]),
    ..Default::default()
  });
  let plugins = build_plugins(&options, SourceDialect::Untyped).unwrap();
  let concat: Vec<_> =
    plugins.iter().filter(|plugin| plugin.name() == "concat-text").collect();
  assert_eq!(
    concat,
    [&PluginSpec::ConcatText {
      spec: ConcatSpec {
        files: vec!["b/*.env".into()],
        name: "second.env".into(),
        output_path: Some("config".into()),
      }
    }]
  );
}

#[test]
fn test_one_ignore_plugin_per_ignored_package() {
  let options = normalized(fnpack_common::PipelineOptions {
    ignore_packages: Some(vec!["hiredis".into(), "pg-native".into()]),
    ..Default::default()
  });
  let plugins = build_plugins(&options, SourceDialect::Untyped).unwrap();
  let resources: Vec<_> = plugins
    .iter()
    .filter_map(|plugin| match plugin {
      PluginSpec::IgnoreModule { resource } => Some(resource.as_str()),
      _ => None,
    })
    .collect();
  assert_eq!(resources, ["^hiredis$", "^pg-native$"]);
  // They follow the unconditional locale stripper.
  assert_eq!(plugins[0].name(), "strip-locales");
}

#[test]
fn test_formidable_fixup_defines_the_compat_global() {
  let options = normalized(fnpack_common::PipelineOptions {
    fix_packages: Some(vec![FORMIDABLE_FIXUP.into()]),
    ..Default::default()
  });
  let plugins = build_plugins(&options, SourceDialect::Untyped).unwrap();
  assert_eq!(
    plugins.last(),
    Some(&PluginSpec::DefineCompat { key: "global.GENTLY", value: "false" })
  );
}

#[test]
fn test_typecheck_diagnostics_stay_off_by_default() {
  use std::path::PathBuf;

  let options = normalized(fnpack_common::PipelineOptions::default());
  let plugins = build_plugins(&options, SourceDialect::Typed).unwrap();
  assert!(plugins.iter().all(|plugin| plugin.name() != "type-check-diagnostics"));

  // The capability is preserved behind its flag, and only for typed projects.
  let options = normalized(fnpack_common::PipelineOptions {
    typecheck_diagnostics: Some(true),
    ..Default::default()
  });
  let plugins = build_plugins(&options, SourceDialect::Typed).unwrap();
  assert_eq!(
    plugins[0],
    PluginSpec::TypeCheckDiagnostics { tsconfig: PathBuf::from("/proj/tsconfig.json"), lint: true }
  );
  let plugins = build_plugins(&options, SourceDialect::Untyped).unwrap();
  assert!(plugins.iter().all(|plugin| plugin.name() != "type-check-diagnostics"));
}
