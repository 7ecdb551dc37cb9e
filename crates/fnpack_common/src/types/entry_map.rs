use std::path::PathBuf;

use arcstr::ArcStr;
use indexmap::IndexMap;

/// Logical entry name to absolute path under the project root, in insertion
/// order. Warmup entries are stripped before the map is built.
pub type EntryMap = IndexMap<ArcStr, PathBuf>;
