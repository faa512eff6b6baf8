//! Pysep invocation.
//!
//! Pysep is driven through its command-line entry point (`pysep -c <yaml>`);
//! its stdout and stderr are passed straight through to the terminal.

use crate::config::event_config::{config_path_for, EventConfig};
use crate::core::EventProcessor;
use crate::domain::model::{EventSummary, RunOutcome};
use crate::utils::error::{Result, SeisError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub const DEFAULT_PYSEP_BIN: &str = "pysep";

/// Production processor that spawns the real Pysep executable.
#[derive(Debug, Clone)]
pub struct PysepCommand {
    program: String,
}

impl PysepCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PysepCommand {
    fn default() -> Self {
        Self::new(DEFAULT_PYSEP_BIN)
    }
}

#[async_trait]
impl EventProcessor for PysepCommand {
    fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, config_path: &Path) -> Result<RunOutcome> {
        tracing::debug!("Spawning {} -c {}", self.program, config_path.display());

        let status = Command::new(&self.program)
            .arg("-c")
            .arg(config_path)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| SeisError::ProcessSpawnError {
                program: self.program.clone(),
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(RunOutcome {
            program: self.program.clone(),
            config_path: config_path.to_path_buf(),
            success: status.success(),
            exit_code: status.code(),
            status: status.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct EventRunReport {
    pub config_path: PathBuf,
    pub summary: EventSummary,
    /// `None` on a dry run
    pub outcome: Option<RunOutcome>,
}

pub struct EventRunner<E: EventProcessor> {
    processor: E,
    dry_run: bool,
}

impl<E: EventProcessor> EventRunner<E> {
    pub fn new(processor: E) -> Self {
        Self {
            processor,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs the processor on `<name>.yaml`.
    pub async fn run(&self, name: &str) -> Result<EventRunReport> {
        let config_path = config_path_for(name);
        tracing::info!("📁 Loading event configuration from: {}", config_path.display());

        let config = EventConfig::from_file(&config_path)?;
        let summary = config.summary();
        log_summary(&config, &summary);

        if self.dry_run {
            tracing::info!("🔍 DRY RUN MODE - {} not started", self.processor.program());
            return Ok(EventRunReport {
                config_path,
                summary,
                outcome: None,
            });
        }

        tracing::info!("🚀 Running {}", self.processor.program());
        let outcome = self.processor.run(&config_path).await?;

        if !outcome.success {
            return Err(SeisError::ProcessFailed {
                program: outcome.program,
                config_path,
                status: outcome.status,
            });
        }

        tracing::info!("✅ {} finished ({})", outcome.program, outcome.status);
        Ok(EventRunReport {
            config_path,
            summary,
            outcome: Some(outcome),
        })
    }
}

fn log_summary(config: &EventConfig, summary: &EventSummary) {
    tracing::info!(
        "Event {} ({} parameters)",
        summary.event_tag.as_deref().unwrap_or("<untagged>"),
        config.len()
    );

    match (config.origin_time(), summary.origin_time.as_deref()) {
        (Some(origin), _) => tracing::info!("  Origin time: {}", origin),
        (None, Some(raw)) => tracing::warn!("⚠️ origin_time '{}' is not an ISO timestamp", raw),
        (None, None) => tracing::debug!("  No origin_time in configuration"),
    }

    if let (Some(lat), Some(lon)) = (summary.event_latitude, summary.event_longitude) {
        tracing::info!("  Location: {:.4}, {:.4}", lat, lon);
    }
    if let Some(depth) = summary.event_depth_km {
        tracing::info!("  Depth: {} km", depth);
    }
    if let Some(mag) = summary.event_magnitude {
        tracing::info!("  Magnitude: {}", mag);
    }
}
