use colored::Colorize;
use std::time::Instant;

#[derive(Debug)]
pub struct Stats {
  planned: usize,
  converted: usize,
  skipped: usize,
  failed: usize,
  start_time: Instant,
}

impl Stats {
  /// `skipped` counts sources whose target already existed at scan time.
  pub fn new(planned: usize, skipped: usize) -> Self {
    Self {
      planned,
      converted: 0,
      skipped,
      failed: 0,
      start_time: Instant::now(),
    }
  }

  pub fn inc_converted(&mut self) {
    self.converted += 1;
  }

  pub fn inc_failed(&mut self) {
    self.failed += 1;
  }

  pub const fn planned(&self) -> usize {
    self.planned
  }

  pub const fn converted(&self) -> usize {
    self.converted
  }

  pub const fn skipped(&self) -> usize {
    self.skipped
  }

  pub const fn failed(&self) -> usize {
    self.failed
  }

  pub fn print_summary(&self) {
    let elapsed = self.start_time.elapsed();

    eprintln!("\n{}", "========================================".cyan());
    eprintln!("{} {:.1?}", "✓ Completed in".green().bold(), elapsed);
    eprintln!(
      "{} {} | {} {} | {} {} | {} {}",
      "Planned:".cyan(),
      self.planned(),
      "Converted:".green(),
      self.converted(),
      "Already converted:".yellow(),
      self.skipped(),
      "Failed:".red(),
      self.failed()
    );
    eprintln!("{}", "========================================".cyan());
  }
}
