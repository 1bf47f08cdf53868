use crate::config::Config;
use crate::types::{Codec, ConversionPair};
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EncodeError {
  #[error("encoder `{program}` was not found")]
  NotFound { program: String },

  #[error("failed to launch encoder `{program}`: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("encoder `{program}` failed with status: {status}")]
  Failed { program: String, status: ExitStatus },
}

/// Runs the external encoder directly, without a shell, one file at a time.
#[derive(Debug, Clone)]
pub struct Encoder {
  program: String,
  codec: Codec,
  quality: u8,
  verbose: bool,
}

impl Encoder {
  pub fn new(config: &Config) -> Self {
    Self {
      program: config.encoder.clone(),
      codec: config.codec,
      quality: config.quality,
      verbose: config.verbose,
    }
  }

  /// Resolves the encoder on `PATH`, or checks it directly when given a path.
  pub fn locate(&self) -> Result<PathBuf, EncodeError> {
    which::which(&self.program).map_err(|_| EncodeError::NotFound {
      program: self.program.clone(),
    })
  }

  pub fn args(&self, pair: &ConversionPair) -> Vec<OsString> {
    vec![
      "-i".into(),
      pair.source.clone().into_os_string(),
      "-c:a".into(),
      self.codec.encoder_name().into(),
      "-qscale:a".into(),
      self.quality.to_string().into(),
      pair.target.clone().into_os_string(),
    ]
  }

  pub async fn encode(&self, pair: &ConversionPair) -> Result<(), EncodeError> {
    let mut cmd = Command::new(&self.program);
    cmd.args(self.args(pair)).stdin(Stdio::null());

    if !self.verbose {
      cmd.stdout(Stdio::null());
      cmd.stderr(Stdio::null());
    }

    debug!("Running {} for: {}", self.program, pair.source.display());
    let status = cmd.status().await.map_err(|source| {
      if source.kind() == io::ErrorKind::NotFound {
        EncodeError::NotFound {
          program: self.program.clone(),
        }
      } else {
        EncodeError::Spawn {
          program: self.program.clone(),
          source,
        }
      }
    })?;

    if !status.success() {
      return Err(EncodeError::Failed {
        program: self.program.clone(),
        status,
      });
    }

    Ok(())
  }
}
