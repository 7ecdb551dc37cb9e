use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Local builds favor fast iteration (caching on, chunking heuristics off);
/// deployed builds favor reproducibility and never cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
  Local,
  #[default]
  Deployed,
}

impl BuildMode {
  #[inline]
  pub fn is_local(self) -> bool {
    matches!(self, Self::Local)
  }
}

impl Display for BuildMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Local => write!(f, "local"),
      Self::Deployed => write!(f, "deployed"),
    }
  }
}

impl FromStr for BuildMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "local" => Ok(Self::Local),
      "deployed" => Ok(Self::Deployed),
      _ => Err(format!("Invalid build mode \"{s}\".")),
    }
  }
}

#[test]
fn test_build_mode_round_trip() {
  assert_eq!("local".parse::<BuildMode>(), Ok(BuildMode::Local));
  assert_eq!("deployed".parse::<BuildMode>(), Ok(BuildMode::Deployed));
  assert!("production".parse::<BuildMode>().is_err());
  assert_eq!(BuildMode::Local.to_string(), "local");
  assert!(!BuildMode::default().is_local());
}
