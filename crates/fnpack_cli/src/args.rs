use std::path::PathBuf;

use clap::Args;

use crate::types::build_mode::BuildMode;

#[derive(Args)]
pub struct InputArgs {
  /// Project root. Defaults to the current directory.
  #[clap(long)]
  pub root: Option<PathBuf>,

  /// Options document (JSON). Omitted means every option takes its default.
  #[clap(long, short = 'c')]
  pub options: Option<PathBuf>,

  /// Logical entry as a `name=path` pair; repeatable.
  #[clap(long, short = 'e', action = clap::ArgAction::Append)]
  pub entry: Option<Vec<String>>,

  /// Overrides the options document and the FNPACK_LOCAL environment variable.
  #[clap(long)]
  pub mode: Option<BuildMode>,
}

#[derive(Args)]
pub struct OutputArgs {
  /// Emit the full descriptor as JSON instead of the summary.
  #[clap(long)]
  pub json: bool,

  #[clap(long)]
  pub silent: bool,
}
