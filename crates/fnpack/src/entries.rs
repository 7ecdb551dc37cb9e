use std::path::Path;

use arcstr::ArcStr;
use sugar_path::SugarPath;
use tracing::debug;

use fnpack_common::EntryMap;

/// Naming convention for synthetic entries that only pre-trigger platform
/// execution. They never reach the packaged artifact.
pub const WARMUP_PREFIX: &str = "_warmup";

/// Joins every logical entry onto the project root and drops warmup entries.
/// File existence is the bundling engine's problem, not ours.
pub fn resolve_entries<I>(entries: I, root: &Path) -> EntryMap
where
  I: IntoIterator<Item = (ArcStr, String)>,
{
  let mut resolved = EntryMap::default();
  for (name, import) in entries {
    if name.starts_with(WARMUP_PREFIX) {
      debug!(entry = name.as_str(), "dropped warmup entry");
      continue;
    }
    resolved.insert(name, Path::new(&import).absolutize_with(root));
  }
  resolved
}

#[test]
fn test_resolve_entries_joins_onto_root() {
  let entries = [(ArcStr::from("handler"), "src/handler.js".to_string())];
  let resolved = resolve_entries(entries, Path::new("/proj"));
  assert_eq!(resolved.len(), 1);
  assert_eq!(resolved["handler"], Path::new("/proj/src/handler.js"));
}

#[test]
fn test_resolve_entries_drops_warmup_entries() {
  let entries = [
    (ArcStr::from("handler"), "src/handler.js".to_string()),
    (ArcStr::from("_warmup/index"), "_warmup/index.js".to_string()),
  ];
  let resolved = resolve_entries(entries, Path::new("/proj"));
  assert_eq!(resolved.len(), 1);
  assert!(resolved.contains_key("handler"));
  assert!(!resolved.contains_key("_warmup/index"));
}

#[test]
fn test_resolve_entries_is_deterministic() {
  let entries = || {
    [
      (ArcStr::from("a"), "src/a.js".to_string()),
      (ArcStr::from("b"), "nested/../src/b.js".to_string()),
    ]
  };
  let first = resolve_entries(entries(), Path::new("/proj"));
  let second = resolve_entries(entries(), Path::new("/proj"));
  assert_eq!(first, second);
  assert_eq!(first["b"], Path::new("/proj/src/b.js"));
}
