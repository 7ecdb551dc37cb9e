use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use tracing::debug;

use fnpack_common::{
  ConcatSpec, CopySpec, NormalizedPipelineOptions, PipelineOptions, RawConcatSpec, RawCopySpec,
};
use fnpack_error::{ConfigurationError, PipelineResult};

pub const DEFAULT_NODE_VERSION: &str = "18";

/// Fills every recognized option with its default and validates the shape of
/// the compound specs. Cross-field decisions stay in the assembler; the one
/// exception is the caching gate, which folds the build mode in here so no
/// later stage ever sees `caching == true` outside local builds.
pub fn normalize_options(
  raw: PipelineOptions,
  root: &Path,
) -> PipelineResult<NormalizedPipelineOptions> {
  let mode = raw.mode.unwrap_or_default();

  let caching = mode.is_local() && raw.caching.unwrap_or(true);
  if !mode.is_local() && raw.caching == Some(true) {
    debug!("caching requested but build mode is {mode}; disabled");
  }

  let copy_files = validate_copy_specs(raw.copy_files.unwrap_or_default())?;
  let concat_text = validate_concat_specs(raw.concat_text.unwrap_or_default())?;

  Ok(NormalizedPipelineOptions {
    root: root.to_path_buf(),
    mode,
    node_version: raw.node_version.unwrap_or_else(|| DEFAULT_NODE_VERSION.to_string()),
    stats: raw.stats.unwrap_or(false),
    linting: raw.linting.unwrap_or(true),
    sourcemaps: raw.sourcemaps.unwrap_or(true),
    caching,
    typecheck_diagnostics: raw.typecheck_diagnostics.unwrap_or(false),
    externals: raw.externals.unwrap_or_default().into_iter().map(ArcStr::from).collect(),
    no_parse: raw.no_parse.unwrap_or_default(),
    copy_files,
    concat_text,
    ignore_packages: raw
      .ignore_packages
      .unwrap_or_default()
      .into_iter()
      .map(ArcStr::from)
      .collect(),
    fix_packages: raw.fix_packages.unwrap_or_default().into_iter().collect(),
  })
}

fn validate_copy_specs(raw: Vec<RawCopySpec>) -> Result<Vec<CopySpec>, ConfigurationError> {
  raw
    .into_iter()
    .enumerate()
    .map(|(index, spec)| {
      let from = spec.from.ok_or(ConfigurationError::InvalidCopySpec { index, field: "from" })?;
      let to = spec.to.ok_or(ConfigurationError::InvalidCopySpec { index, field: "to" })?;
      Ok(CopySpec { from: PathBuf::from(from), to })
    })
    .collect()
}

fn validate_concat_specs(raw: Vec<RawConcatSpec>) -> Result<Vec<ConcatSpec>, ConfigurationError> {
  raw
    .into_iter()
    .enumerate()
    .map(|(index, spec)| {
      let files =
        spec.files.ok_or(ConfigurationError::InvalidConcatSpec { index, field: "files" })?;
      let name = spec.name.ok_or(ConfigurationError::InvalidConcatSpec { index, field: "name" })?;
      Ok(ConcatSpec { files, name, output_path: spec.output_path })
    })
    .collect()
}

#[test]
fn test_empty_options_yield_valid_minimal_pipeline() {
  use fnpack_common::BuildMode;

  let options = normalize_options(PipelineOptions::default(), Path::new("/proj")).unwrap();
  assert_eq!(options.root, Path::new("/proj"));
  assert_eq!(options.mode, BuildMode::Deployed);
  assert_eq!(options.node_version, "18");
  assert!(!options.stats);
  assert!(options.linting);
  assert!(options.sourcemaps);
  // Deployed is the default mode, so the caching default is gated off.
  assert!(!options.caching);
  assert!(!options.typecheck_diagnostics);
  assert!(options.externals.is_empty());
  assert!(options.no_parse.is_empty());
  assert!(options.copy_files.is_empty());
  assert!(options.concat_text.is_empty());
  assert!(options.ignore_packages.is_empty());
  assert!(options.fix_packages.is_empty());
}

#[test]
fn test_caching_is_gated_on_local_mode() {
  use fnpack_common::BuildMode;

  let raw = PipelineOptions {
    caching: Some(true),
    mode: Some(BuildMode::Deployed),
    ..Default::default()
  };
  assert!(!normalize_options(raw, Path::new("/proj")).unwrap().caching);

  let raw = PipelineOptions { mode: Some(BuildMode::Local), ..Default::default() };
  assert!(normalize_options(raw, Path::new("/proj")).unwrap().caching);

  let raw = PipelineOptions {
    caching: Some(false),
    mode: Some(BuildMode::Local),
    ..Default::default()
  };
  assert!(!normalize_options(raw, Path::new("/proj")).unwrap().caching);
}

#[test]
fn test_copy_spec_missing_field_is_a_configuration_error() {
  use fnpack_error::PipelineError;

  let raw = PipelineOptions {
    copy_files: Some(vec![
      RawCopySpec { from: Some("public".into()), to: Some("public".into()) },
      RawCopySpec { from: None, to: Some("assets".into()) },
    ]),
    ..Default::default()
  };
  let err = normalize_options(raw, Path::new("/proj")).unwrap_err();
  match err {
    PipelineError::Configuration(ConfigurationError::InvalidCopySpec { index, field }) => {
      assert_eq!(index, 1);
      assert_eq!(field, "from");
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_concat_spec_missing_name_is_a_configuration_error() {
  use fnpack_error::PipelineError;

  let raw = PipelineOptions {
    concat_text: Some(vec![RawConcatSpec {
      files: Some(vec!["config/*.env".into()]),
      name: None,
      output_path: None,
    }]),
    ..Default::default()
  };
  let err = normalize_options(raw, Path::new("/proj")).unwrap_err();
  assert!(matches!(
    err,
    PipelineError::Configuration(ConfigurationError::InvalidConcatSpec { index: 0, field: "name" })
  ));
}

#[test]
fn test_fix_packages_become_a_membership_set() {
  let raw = PipelineOptions {
    fix_packages: Some(vec!["formidable@1.x".into(), "formidable@1.x".into()]),
    ..Default::default()
  };
  let options = normalize_options(raw, Path::new("/proj")).unwrap();
  assert_eq!(options.fix_packages.len(), 1);
  assert!(options.needs_fixup("formidable@1.x"));
  assert!(!options.needs_fixup("formidable@2.x"));
}
