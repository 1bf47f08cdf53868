use crate::config::Config;
use crate::encoder::Encoder;
use crate::file_scanner::FileScanner;
use crate::stats::Stats;
use crate::types::ConversionPair;
use anyhow::Result;
use colored::Colorize;
use tracing::{error, info, warn};

pub struct Converter {
  config: Config,
  encoder: Encoder,
}

impl Converter {
  pub fn new(config: Config) -> Self {
    let encoder = Encoder::new(&config);
    Self { config, encoder }
  }

  /// Converts every planned file in turn. Encoder failures are reported and
  /// counted; only an unreadable chord directory aborts the run.
  pub async fn run(&self) -> Result<Stats> {
    self.config.print_header();

    let plan =
      FileScanner::plan(&self.config.root, &self.config.dirs, &self.config.formats).await?;
    let mut stats = Stats::new(plan.pairs.len(), plan.already_converted);

    if plan.pairs.is_empty() {
      eprintln!("{}", "✓ Nothing to convert".green());
    } else if !self.config.dry_run {
      // Each file still reports its own failure.
      if let Err(e) = self.config.check_dependencies() {
        warn!("{e:#}");
      }
    }

    for pair in &plan.pairs {
      if self.config.dry_run {
        println!(
          "{} {} to {}",
          "🔍 Would convert".cyan(),
          pair.source.display(),
          pair.target.display()
        );
        continue;
      }

      self.convert(pair, &mut stats).await;
    }

    stats.print_summary();
    Ok(stats)
  }

  async fn convert(&self, pair: &ConversionPair, stats: &mut Stats) {
    println!("{}", progress_line(pair));

    match self.encoder.encode(pair).await {
      Ok(()) => {
        stats.inc_converted();
        info!("Converted {}", pair.target.display());
      }
      Err(e) => {
        stats.inc_failed();
        error!("Failed to convert {}: {}", pair.source.display(), e);
        eprintln!("{} {}: {}", "✗ Error:".red(), pair.source.display(), e);
      }
    }
  }
}

fn progress_line(pair: &ConversionPair) -> String {
  format!(
    "Converting {} to {}",
    pair.source.display(),
    pair.target.display()
  )
}
