use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

/// The single filesystem capability assembly depends on: a read-only
/// existence probe. Injecting it keeps assembly deterministic and testable
/// without real filesystem state.
pub trait FileSystem {
  fn is_file(&self, path: &Path) -> bool;
}

/// Fixed set of paths that "exist". Used by tests and by embedders that
/// assemble descriptors for projects they never materialize on disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
  files: FxHashSet<PathBuf>,
}

impl MemoryFileSystem {
  pub fn with_files<I, P>(files: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    Self { files: files.into_iter().map(Into::into).collect() }
  }

  pub fn add_file(&mut self, path: impl Into<PathBuf>) {
    self.files.insert(path.into());
  }
}

impl FileSystem for MemoryFileSystem {
  fn is_file(&self, path: &Path) -> bool {
    self.files.contains(path)
  }
}

#[test]
fn test_memory_file_system() {
  let mut fs = MemoryFileSystem::with_files(["/proj/tsconfig.json"]);
  assert!(fs.is_file(Path::new("/proj/tsconfig.json")));
  assert!(!fs.is_file(Path::new("/proj/jsconfig.json")));

  fs.add_file("/proj/jsconfig.json");
  assert!(fs.is_file(Path::new("/proj/jsconfig.json")));
}
