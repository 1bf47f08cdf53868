use crate::types::{AudioFormats, ChordDir, ConversionPair, Plan};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, trace};

pub struct FileScanner;

impl FileScanner {
  /// Scans every directory before anything is converted, so a missing
  /// directory aborts the run with nothing half done.
  pub async fn plan(root: &Path, dirs: &[ChordDir], formats: &AudioFormats) -> Result<Plan> {
    info!(
      "Scanning {} chord director{} under: {}",
      dirs.len(),
      if dirs.len() == 1 { "y" } else { "ies" },
      root.display()
    );

    let mut plan = Plan::default();

    for dir in dirs {
      let dir_plan = Self::scan_directory(&root.join(dir.as_str()), formats).await?;
      plan.already_converted += dir_plan.already_converted;
      plan.pairs.extend(dir_plan.pairs);
    }

    info!(
      "Found {} file(s) to convert, {} already converted",
      plan.pairs.len(),
      plan.already_converted
    );
    Ok(plan)
  }

  pub async fn scan_directory(dir: &Path, formats: &AudioFormats) -> Result<Plan> {
    let mut entries = fs::read_dir(dir)
      .await
      .with_context(|| format!("Failed to read chord directory: {}", dir.display()))?;

    // Sorted so that runs are reproducible.
    let mut names = BTreeSet::new();

    while let Some(entry) = entries
      .next_entry()
      .await
      .with_context(|| format!("Failed to list chord directory: {}", dir.display()))?
    {
      let path = entry.path();
      let is_file = fs::metadata(&path).await.is_ok_and(|m| m.is_file());
      if !is_file {
        continue;
      }

      match entry.file_name().into_string() {
        Ok(name) => {
          names.insert(name);
        }
        Err(name) => trace!("Ignoring non UTF-8 file name: {}", name.to_string_lossy()),
      }
    }

    let mut plan = Plan::default();

    for name in &names {
      let Some((base, ext)) = Self::split_entry(name) else {
        continue;
      };
      if ext != formats.source_ext {
        continue;
      }

      let target_name = formats.target_name(base);
      if names.contains(&target_name) {
        debug!("Already converted: {}", dir.join(name).display());
        plan.already_converted += 1;
        continue;
      }

      debug!("Found unconverted file: {}", dir.join(name).display());
      plan.pairs.push(ConversionPair {
        source: dir.join(name),
        target: dir.join(target_name),
      });
    }

    Ok(plan)
  }

  /// Splits `base.ext`. Names with no dot or with more than one are not
  /// audio samples and yield `None`.
  pub fn split_entry(name: &str) -> Option<(&str, &str)> {
    let mut parts = name.split('.');
    match (parts.next(), parts.next(), parts.next()) {
      (Some(base), Some(ext), None) => Some((base, ext)),
      _ => None,
    }
  }
}
