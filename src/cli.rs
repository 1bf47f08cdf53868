use crate::config::Config;
use crate::converter::Converter;
use crate::types::{ChordDir, Codec};
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

/// Converts chord samples that have no encoded counterpart yet
#[derive(Parser, Debug, Clone)]
#[command(name = "omnichord-convertor")]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Chord directories to scan, in order [default: a]
  #[arg(value_name = "DIR", conflicts_with = "all")]
  pub dirs: Vec<ChordDir>,

  /// Scan all 27 standard chord directories
  #[arg(long)]
  pub all: bool,

  /// Library root the chord directories live in [default: .]
  #[arg(short, long, value_name = "DIR")]
  pub root: Option<PathBuf>,

  /// JSON settings file
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Extension of the files to convert [default: wav]
  #[arg(long, value_name = "EXT")]
  pub source_ext: Option<String>,

  /// Extension of the converted files [default: the codec's, e.g. ogg]
  #[arg(long, value_name = "EXT")]
  pub target_ext: Option<String>,

  /// Audio codec: 'vorbis' or 'mp3' [default: vorbis]
  #[arg(long, value_name = "CODEC")]
  pub codec: Option<Codec>,

  /// Encoder quality scale [default: the codec's highest]
  #[arg(short, long, value_name = "N")]
  pub quality: Option<u8>,

  /// Encoder executable [default: ffmpeg]
  #[arg(long, value_name = "PROGRAM")]
  pub encoder: Option<String>,

  /// Show encoder output
  #[arg(short, long)]
  pub verbose: bool,

  /// Dry run - list what would be converted without converting
  #[arg(long)]
  pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
  /// Generate shell completion scripts
  Completion {
    #[arg(value_enum)]
    shell: Shell,
  },
}

/// Parses arguments and runs the appropriate application logic.
pub async fn handle_cli() -> Result<()> {
  let args = Args::parse();

  if let Some(Commands::Completion { shell }) = args.command {
    let mut cmd = Args::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    return Ok(());
  }

  let config = Config::from_args(args).await?;
  let stats = Converter::new(config).run().await?;

  if stats.failed() > 0 {
    anyhow::bail!(
      "{} of {} conversion(s) failed",
      stats.failed(),
      stats.planned()
    );
  }

  Ok(())
}
