use crate::chords;
use crate::cli::Args;
use crate::encoder::Encoder;
use crate::types::{AudioFormats, ChordDir, Codec};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub const DEFAULT_ENCODER: &str = "ffmpeg";
pub const DEFAULT_SOURCE_EXT: &str = "wav";

#[derive(Debug, Clone)]
pub struct Config {
  pub root: PathBuf,
  pub dirs: Vec<ChordDir>,
  pub formats: AudioFormats,
  pub codec: Codec,
  pub quality: u8,
  pub encoder: String,
  pub verbose: bool,
  pub dry_run: bool,
}

/// Optional JSON settings file. Explicit command line values win.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
  pub root: Option<PathBuf>,
  pub dirs: Option<Vec<String>>,
  pub source_ext: Option<String>,
  pub target_ext: Option<String>,
  pub codec: Option<String>,
  pub quality: Option<u8>,
  pub encoder: Option<String>,
}

impl Settings {
  pub async fn load(path: &Path) -> Result<Self> {
    let text = fs::read_to_string(path)
      .await
      .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let settings: Self = serde_json::from_str(&text)
      .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
    debug!("Loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
  }
}

impl Config {
  pub async fn from_args(args: Args) -> Result<Self> {
    let settings = match &args.config {
      Some(path) => Settings::load(path).await?,
      None => Settings::default(),
    };
    Self::resolve(args, settings)
  }

  fn resolve(args: Args, settings: Settings) -> Result<Self> {
    let dirs = if args.all {
      chords::standard()
    } else if !args.dirs.is_empty() {
      args.dirs
    } else if let Some(names) = settings.dirs {
      names
        .iter()
        .map(|name| name.parse())
        .collect::<Result<Vec<ChordDir>>>()
        .context("Invalid chord directory in settings file")?
    } else {
      chords::default_dirs()
    };

    let codec = match args.codec {
      Some(codec) => codec,
      None => settings
        .codec
        .as_deref()
        .map(str::parse::<Codec>)
        .transpose()?
        .unwrap_or(Codec::Vorbis),
    };

    let source_ext = args
      .source_ext
      .or(settings.source_ext)
      .unwrap_or_else(|| DEFAULT_SOURCE_EXT.to_string());
    let target_ext = args
      .target_ext
      .or(settings.target_ext)
      .unwrap_or_else(|| codec.extension().to_string());

    let config = Self {
      root: args
        .root
        .or(settings.root)
        .unwrap_or_else(|| PathBuf::from(".")),
      dirs,
      formats: AudioFormats::new(source_ext, target_ext),
      codec,
      quality: args
        .quality
        .or(settings.quality)
        .unwrap_or(codec.max_quality()),
      encoder: args
        .encoder
        .or(settings.encoder)
        .unwrap_or_else(|| DEFAULT_ENCODER.to_string()),
      verbose: args.verbose,
      dry_run: args.dry_run,
    };

    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<()> {
    if self.dirs.is_empty() {
      anyhow::bail!("No chord directories configured");
    }

    Self::validate_extension("source", &self.formats.source_ext)?;
    Self::validate_extension("target", &self.formats.target_ext)?;
    if self.formats.source_ext == self.formats.target_ext {
      anyhow::bail!(
        "Source and target extension are both '{}'",
        self.formats.source_ext
      );
    }

    if self.quality > self.codec.max_quality() {
      anyhow::bail!(
        "Invalid quality {} for {}. Valid range: 0-{}",
        self.quality,
        self.codec,
        self.codec.max_quality()
      );
    }

    if self.encoder.trim().is_empty() {
      anyhow::bail!("Encoder program must not be empty");
    }

    Ok(())
  }

  fn validate_extension(kind: &str, ext: &str) -> Result<()> {
    if ext.is_empty() || ext.contains(['.', '/', '\\']) {
      anyhow::bail!("Invalid {kind} extension '{ext}'. Use a bare extension like 'wav'");
    }
    Ok(())
  }

  pub fn check_dependencies(&self) -> Result<()> {
    let path = Encoder::new(self).locate().with_context(|| {
      format!(
        "{} {} is not installed. Please install ffmpeg.",
        "✗".red(),
        self.encoder
      )
    })?;
    debug!("Using encoder at {}", path.display());
    Ok(())
  }

  pub fn print_header(&self) {
    eprintln!("{}", "========================================".cyan());
    eprintln!("{}", "  Omnichord Converter".cyan().bold());
    eprintln!("{}", "========================================".cyan());

    eprintln!(
      "{} {} | {} {} {} {} | {} {}",
      "Codec:".yellow(),
      self.codec,
      "Files:".yellow(),
      self.formats.source_ext,
      "→".dimmed(),
      self.formats.target_ext,
      "Quality:".yellow(),
      self.quality
    );

    let dirs: Vec<&str> = self.dirs.iter().map(ChordDir::as_str).collect();
    eprintln!("{} {}", "Directories:".yellow(), dirs.join(", "));
    eprintln!("{} {}", "Root:".yellow(), self.root.display());

    if self.dry_run {
      eprintln!(
        "{}",
        "🔍 DRY RUN MODE - No files will be converted"
          .yellow()
          .bold()
      );
    }

    eprintln!("{}", "----------------------------------------".cyan());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::Parser;

  fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["omnichord-convertor"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
  }

  #[test]
  fn defaults_match_single_chord_vorbis_run() {
    let config = Config::resolve(args(&[]), Settings::default()).unwrap();

    assert_eq!(config.root, PathBuf::from("."));
    assert_eq!(config.dirs, chords::default_dirs());
    assert_eq!(config.formats, AudioFormats::new("wav", "ogg"));
    assert_eq!(config.codec, Codec::Vorbis);
    assert_eq!(config.quality, 10);
    assert_eq!(config.encoder, "ffmpeg");
  }

  #[test]
  fn all_selects_standard_chords() {
    let config = Config::resolve(args(&["--all"]), Settings::default()).unwrap();
    assert_eq!(config.dirs.len(), 27);
  }

  #[test]
  fn mp3_defaults_follow_codec() {
    let config = Config::resolve(args(&["--codec", "mp3"]), Settings::default()).unwrap();
    assert_eq!(config.formats.target_ext, "mp3");
    assert_eq!(config.quality, 9);
  }

  #[test]
  fn quality_out_of_range_is_rejected() {
    let err = Config::resolve(args(&["--codec", "mp3", "-q", "10"]), Settings::default())
      .unwrap_err();
    assert!(err.to_string().contains("Invalid quality"), "{err}");
  }

  #[test]
  fn bad_extensions_are_rejected() {
    assert!(Config::resolve(args(&["--source-ext", ".wav"]), Settings::default()).is_err());
    assert!(Config::resolve(args(&["--target-ext", "wav"]), Settings::default()).is_err());

    let settings = Settings {
      target_ext: Some(String::new()),
      ..Settings::default()
    };
    assert!(Config::resolve(args(&[]), settings).is_err());
  }

  #[test]
  fn settings_file_fills_gaps_and_cli_wins() {
    let settings: Settings = serde_json::from_str(
      r#"{
        "root": "samples",
        "dirs": ["am", "em"],
        "quality": 6,
        "encoder": "/opt/ffmpeg/bin/ffmpeg"
      }"#,
    )
    .unwrap();

    let config = Config::resolve(args(&["-q", "8", "bm"]), settings).unwrap();

    assert_eq!(config.root, PathBuf::from("samples"));
    assert_eq!(config.dirs, vec!["bm".parse::<ChordDir>().unwrap()]);
    assert_eq!(config.quality, 8);
    assert_eq!(config.encoder, "/opt/ffmpeg/bin/ffmpeg");
  }

  #[test]
  fn settings_dirs_are_used_without_cli_dirs() {
    let settings: Settings = serde_json::from_str(r#"{ "dirs": ["am", "em"] }"#).unwrap();

    let config = Config::resolve(args(&[]), settings).unwrap();

    let names: Vec<&str> = config.dirs.iter().map(ChordDir::as_str).collect();
    assert_eq!(names, ["am", "em"]);
  }

  #[test]
  fn empty_settings_dirs_are_rejected() {
    let settings: Settings = serde_json::from_str(r#"{ "dirs": [] }"#).unwrap();
    assert!(Config::resolve(args(&[]), settings).is_err());
  }

  #[test]
  fn unknown_settings_fields_are_rejected() {
    assert!(serde_json::from_str::<Settings>(r#"{ "bitrate": 320 }"#).is_err());
  }

  #[tokio::test]
  async fn settings_load_reports_path() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Settings::load(&path).await.unwrap_err();
    assert!(err.to_string().contains("settings.json"), "{err}");
  }

  #[tokio::test]
  async fn settings_file_is_read_from_disk() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("settings.json");
    std::fs::write(&path, r#"{ "dirs": ["em"], "codec": "mp3" }"#).unwrap();

    let config = Config::from_args(args(&["-c", path.to_str().unwrap()]))
      .await
      .unwrap();

    assert_eq!(config.dirs, vec!["em".parse::<ChordDir>().unwrap()]);
    assert_eq!(config.codec, Codec::Mp3);
    assert_eq!(config.formats.target_ext, "mp3");
  }
}
