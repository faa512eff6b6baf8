pub mod cli;
pub mod event_config;
pub mod toml_config;

use crate::core::travel_time::DEFAULT_VELOCITY_KM_S;
use crate::core::ConfigProvider;
use crate::domain::model::Truncation;
use crate::utils::error::{Result, SeisError};
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use toml_config::{TravelConfig, MAX_STRIP_COUNT};

pub const DEFAULT_OUTPUT_PATH: &str = "newweights.dat";

/// Fully resolved settings for one weights conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSettings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub velocity_km_s: f64,
    pub truncation: Truncation,
}

impl ConversionSettings {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            velocity_km_s: DEFAULT_VELOCITY_KM_S,
            truncation: Truncation::default(),
        }
    }
}

impl ConfigProvider for ConversionSettings {
    fn input_path(&self) -> &Path {
        &self.input_path
    }

    fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn velocity_km_s(&self) -> f64 {
        self.velocity_km_s
    }

    fn truncation(&self) -> Truncation {
        self.truncation
    }
}

impl Validate for ConversionSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input_path)?;
        validation::validate_path("output", &self.output_path)?;
        validation::validate_positive_float("velocity_km_s", self.velocity_km_s)?;

        if let Truncation::Chars(n) | Truncation::Fields(n) = self.truncation {
            validation::validate_range("truncation.count", n, 0, MAX_STRIP_COUNT)?;
        }

        if self.input_path == self.output_path {
            return Err(SeisError::ConfigValidationError {
                field: "output".to_string(),
                message: "output would overwrite the input weights file".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli_args::{CliConfig, PysepCliConfig};

#[cfg(feature = "cli")]
mod cli_args {
    use super::*;
    use clap::{ArgGroup, Parser};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "generate-travel")]
    #[command(about = "Derive travel times from a weights file at a constant velocity")]
    #[command(group(ArgGroup::new("truncation").args(["strip_chars", "strip_fields", "keep_all"])))]
    pub struct CliConfig {
        /// Weights file to convert (falls back to [input] path in the config file)
        pub input: Option<PathBuf>,

        /// Output file (default: newweights.dat)
        #[arg(short, long)]
        pub output: Option<PathBuf>,

        /// Propagation velocity in km/s (default: 2.8)
        #[arg(long)]
        pub velocity: Option<f64>,

        /// Drop the last N characters of each joined row (default: 8)
        #[arg(long, value_name = "N")]
        pub strip_chars: Option<usize>,

        /// Drop the last N fields of each row instead of characters
        #[arg(long, value_name = "N")]
        pub strip_fields: Option<usize>,

        /// Keep every input field
        #[arg(long)]
        pub keep_all: bool,

        /// Path to TOML configuration file
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Do not print each travel time to stdout
        #[arg(short, long)]
        pub quiet: bool,

        /// Convert and report without writing the output file
        #[arg(long)]
        pub dry_run: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        fn truncation_override(&self) -> Option<Truncation> {
            if self.keep_all {
                Some(Truncation::None)
            } else if let Some(n) = self.strip_fields {
                Some(Truncation::Fields(n))
            } else {
                self.strip_chars.map(Truncation::Chars)
            }
        }

        /// 合併順序: 命令列 > TOML > 預設值
        pub fn resolve(&self) -> Result<ConversionSettings> {
            let file = match &self.config {
                Some(path) => {
                    tracing::info!("📁 Loading configuration from: {}", path.display());
                    let config = TravelConfig::from_file(path)?;
                    config.validate()?;
                    config
                }
                None => TravelConfig::default(),
            };
            self.merge(&file)
        }

        pub fn merge(&self, file: &TravelConfig) -> Result<ConversionSettings> {
            let input_path = self
                .input
                .clone()
                .or_else(|| file.input_path().map(Path::to_path_buf))
                .ok_or_else(|| {
                    SeisError::config("no weights file given (pass INPUT or set [input] path)")
                })?;

            let mut settings = ConversionSettings::new(input_path);

            if let Some(output) = self
                .output
                .clone()
                .or_else(|| file.output_path().map(Path::to_path_buf))
            {
                settings.output_path = output;
            }
            if let Some(velocity) = self.velocity.or(file.velocity_km_s()) {
                settings.velocity_km_s = velocity;
            }
            if let Some(truncation) = self.truncation_override() {
                settings.truncation = truncation;
            } else if let Some(truncation) = file.truncation()? {
                settings.truncation = truncation;
            }

            Ok(settings)
        }
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "call-pysep")]
    #[command(about = "Run Pysep on an event configuration file")]
    pub struct PysepCliConfig {
        /// name of file containing event info (reads <FILE>.yaml)
        #[arg(default_value = super::event_config::DEFAULT_EVENT_NAME)]
        pub file: String,

        /// Pysep executable
        #[arg(long, env = "PYSEP_BIN", default_value = "pysep")]
        pub pysep_bin: String,

        /// Load and summarize the configuration without running Pysep
        #[arg(long)]
        pub dry_run: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl Validate for PysepCliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_non_empty_string("file", &self.file)?;
            validation::validate_non_empty_string("pysep_bin", &self.pysep_bin)?;
            Ok(())
        }
    }

}
