//! Event configuration consumed by Pysep.
//!
//! The YAML schema belongs to Pysep. It is loaded here only to fail fast on a
//! missing or broken file and to pull a best-effort [`EventSummary`] out of
//! the well-known keys for logging.

use crate::domain::model::EventSummary;
use crate::utils::error::{Result, SeisError};
use chrono::NaiveDateTime;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

pub const DEFAULT_EVENT_NAME: &str = "event_input";

const ORIGIN_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// `myevent` -> `myevent.yaml`. The suffix is always appended.
pub fn config_path_for(name: &str) -> PathBuf {
    PathBuf::from(format!("{}.yaml", name))
}

#[derive(Debug, Clone)]
pub struct EventConfig {
    document: Mapping,
}

impl EventConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SeisError::EventConfigError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(path, &content)
    }

    pub fn from_yaml_str<P: AsRef<Path>>(path: P, content: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let value: Value =
            serde_yaml::from_str(content).map_err(|e| SeisError::EventConfigError {
                path: path.clone(),
                message: format!("YAML parsing error: {}", e),
            })?;

        match value {
            Value::Mapping(document) => Ok(Self { document }),
            Value::Null => Err(SeisError::EventConfigError {
                path,
                message: "file is empty".to_string(),
            }),
            _ => Err(SeisError::EventConfigError {
                path,
                message: "top level must be a mapping of parameters".to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    fn string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn origin_time(&self) -> Option<NaiveDateTime> {
        let raw = self.string("origin_time")?;
        let raw = raw.trim_end_matches('Z');
        ORIGIN_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            event_tag: self.string("event_tag"),
            origin_time: self.string("origin_time"),
            event_latitude: self.number("event_latitude"),
            event_longitude: self.number("event_longitude"),
            event_depth_km: self.number("event_depth_km"),
            event_magnitude: self.number("event_magnitude"),
            output_dir: self.string("output_dir"),
        }
    }
}
