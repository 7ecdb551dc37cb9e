use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum BuildMode {
  Local,
  Deployed,
}

impl From<BuildMode> for fnpack::BuildMode {
  fn from(value: BuildMode) -> Self {
    match value {
      BuildMode::Local => fnpack::BuildMode::Local,
      BuildMode::Deployed => fnpack::BuildMode::Deployed,
    }
  }
}
