use std::fmt;
use std::path::PathBuf;

/// Audio codec handed to the encoder as `-c:a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
  Vorbis,
  Mp3,
}

impl Codec {
  pub const fn encoder_name(self) -> &'static str {
    match self {
      Self::Vorbis => "libvorbis",
      Self::Mp3 => "libmp3lame",
    }
  }

  /// Highest `-qscale:a` level the codec accepts.
  pub const fn max_quality(self) -> u8 {
    match self {
      Self::Vorbis => 10,
      Self::Mp3 => 9,
    }
  }

  pub const fn extension(self) -> &'static str {
    match self {
      Self::Vorbis => "ogg",
      Self::Mp3 => "mp3",
    }
  }
}

impl std::str::FromStr for Codec {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "vorbis" | "libvorbis" | "ogg" => Ok(Self::Vorbis),
      "mp3" | "libmp3lame" | "lame" => Ok(Self::Mp3),
      _ => Err(anyhow::anyhow!("Invalid codec '{s}'. Use 'vorbis' or 'mp3'")),
    }
  }
}

impl fmt::Display for Codec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::Vorbis => write!(f, "Vorbis"),
      Self::Mp3 => write!(f, "MP3"),
    }
  }
}

/// A chord directory name, relative to the library root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordDir(String);

impl ChordDir {
  /// For built-in names that are known to be valid.
  pub(crate) fn from_static(name: &'static str) -> Self {
    Self(name.to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::str::FromStr for ChordDir {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      anyhow::bail!("Chord directory name must not be empty");
    }
    if s == "." || s == ".." || s.contains(['/', '\\']) {
      anyhow::bail!("Invalid chord directory '{s}'. Use a plain directory name like 'am'");
    }
    Ok(Self(s.to_string()))
  }
}

impl fmt::Display for ChordDir {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Source and target file extensions, without the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFormats {
  pub source_ext: String,
  pub target_ext: String,
}

impl AudioFormats {
  pub fn new(source_ext: impl Into<String>, target_ext: impl Into<String>) -> Self {
    Self {
      source_ext: source_ext.into(),
      target_ext: target_ext.into(),
    }
  }

  pub fn target_name(&self, base: &str) -> String {
    format!("{base}.{}", self.target_ext)
  }
}

impl Default for AudioFormats {
  fn default() -> Self {
    Self::new("wav", Codec::Vorbis.extension())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPair {
  pub source: PathBuf,
  pub target: PathBuf,
}

/// Everything a run will do, computed before the encoder is started.
#[derive(Debug, Default)]
pub struct Plan {
  pub pairs: Vec<ConversionPair>,
  /// Source files whose target already exists.
  pub already_converted: usize,
}
