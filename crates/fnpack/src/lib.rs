mod assembler;
mod entries;
mod externals;
mod loaders;
mod plugins;
mod utils;

pub use crate::{
  assembler::PipelineAssembler,
  entries::{WARMUP_PREFIX, resolve_entries},
  externals::{BASELINE_EXTERNALS, resolve_externals},
  loaders::{
    QUERY_DOCUMENT_PATTERN, STAGING_DIR, TYPE_CONFIG_FILE, TYPED_SOURCE_PATTERN,
    UNTYPED_SOURCE_PATTERN, build_module_rules, detect_source_dialect,
  },
  plugins::{FORMIDABLE_FIXUP, build_plugins},
  utils::normalize_options::{DEFAULT_NODE_VERSION, normalize_options},
};
pub use fnpack_common::*;
pub use fnpack_error::{AssemblyError, ConfigurationError, PipelineError, PipelineResult};
