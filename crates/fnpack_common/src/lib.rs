mod pipeline_options;
mod types;

pub use pipeline_options::{
  PipelineOptions, build_mode::BuildMode, concat_spec::{ConcatSpec, RawConcatSpec},
  copy_spec::{CopySpec, RawCopySpec},
  normalized_pipeline_options::NormalizedPipelineOptions,
};

pub use crate::types::{
  descriptor::{
    DEFAULT_EXTENSIONS, DEPENDENCY_DIR, Devtool, OUTPUT_DIR, Optimization, PipelineDescriptor,
    ResolveSettings, StatsMode, TARGET_PLATFORM,
  },
  entry_map::EntryMap,
  module_rule::{
    CLASS_PROPERTIES_TRANSFORM, CompileOptions, LintOptions, LoaderStep, ModuleRule, ModuleRules,
    RUNTIME_HELPERS_TRANSFORM, RulePattern, SOURCE_MAP_SUPPORT_TRANSFORM, TypeCheckOptions,
  },
  plugin::{CacheInfoLevel, CacheInfoMode, PluginSpec},
  source_dialect::SourceDialect,
};
