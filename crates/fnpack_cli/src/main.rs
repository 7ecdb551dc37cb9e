mod args;
mod types;

use std::path::Path;
use std::process::ExitCode;

use ansi_term::Colour;
use args::{InputArgs, OutputArgs};
use arcstr::ArcStr;
use clap::Parser;

use fnpack::{
  ConfigurationError, PipelineAssembler, PipelineDescriptor, PipelineOptions, PipelineResult,
};
use fnpack_fs::OsFileSystem;

const LOCAL_ENV_VAR: &str = "FNPACK_LOCAL";

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,
}

fn env_mode() -> Option<fnpack::BuildMode> {
  std::env::var_os(LOCAL_ENV_VAR).map(|value| {
    if value == "0" { fnpack::BuildMode::Deployed } else { fnpack::BuildMode::Local }
  })
}

fn load_options(path: Option<&Path>) -> PipelineResult<PipelineOptions> {
  let Some(path) = path else { return Ok(PipelineOptions::default()) };
  let raw = std::fs::read_to_string(path).map_err(|err| ConfigurationError::Malformed {
    reason: format!("{}: {err}", path.display()),
  })?;
  serde_json::from_str(&raw).map_err(|err| {
    ConfigurationError::Malformed { reason: format!("{}: {err}", path.display()) }.into()
  })
}

fn parse_entries(pairs: &[String]) -> PipelineResult<Vec<(ArcStr, String)>> {
  pairs
    .iter()
    .map(|pair| {
      pair.split_once('=').map(|(name, path)| (ArcStr::from(name), path.to_string())).ok_or_else(
        || {
          ConfigurationError::Malformed {
            reason: format!("entry {pair:?} is not a `name=path` pair"),
          }
          .into()
        },
      )
    })
    .collect()
}

fn print_summary(descriptor: &PipelineDescriptor) {
  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  let left = descriptor.entries.keys().map(|name| name.len()).max().unwrap_or(0);
  for (name, path) in &descriptor.entries {
    println!(
      "{}{:pad$} {}{}",
      color.paint(name.as_str()),
      "",
      dim.paint("entry │ "),
      path.display(),
      pad = left - name.len()
    );
  }

  println!(
    "\n{} {} mode, {} rules, {} plugins, {} externals",
    Colour::Green.paint("✔"),
    Colour::White.bold().paint(descriptor.mode.to_string()),
    descriptor.rules.len(),
    descriptor.plugins.len(),
    descriptor.externals.len()
  );
}

fn run(args: Commands) -> PipelineResult<()> {
  let root = args
    .input
    .root
    .unwrap_or_else(|| std::env::current_dir().expect("Failed to get current dir"));

  let mut raw = load_options(args.input.options.as_deref())?;
  if let Some(mode) = args.input.mode.map(Into::into).or_else(env_mode) {
    raw.mode = Some(mode);
  }

  let entries = parse_entries(&args.input.entry.unwrap_or_default())?;
  let descriptor =
    PipelineAssembler::new(raw, &root, OsFileSystem)?.assemble(entries)?;

  if args.output.json {
    let json =
      serde_json::to_string_pretty(&descriptor).expect("descriptor serializes to JSON");
    println!("{json}");
  } else if !args.output.silent {
    print_summary(&descriptor);
  }

  Ok(())
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Commands::parse();
  match run(args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(error) => {
      eprintln!("{} {error}", Colour::Red.paint("Error:"));
      ExitCode::FAILURE
    }
  }
}
