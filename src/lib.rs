pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, ConversionSettings};

#[cfg(feature = "cli")]
pub use config::{CliConfig, PysepCliConfig};

pub use crate::core::{
    engine::{ConversionEngine, ConversionReport},
    pipeline::TravelTimePipeline,
    pysep::{EventRunReport, EventRunner, PysepCommand},
};
pub use domain::model::Truncation;
pub use utils::error::{Result, SeisError};
