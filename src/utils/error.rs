use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeisError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to read '{}': {source}", .path.display())]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Event configuration '{}' could not be loaded: {message}", .path.display())]
    EventConfigError { path: PathBuf, message: String },

    #[error("Line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Line {line}: distance '{value}' is not a number")]
    NonNumericDistance { line: usize, value: String },

    #[error("Line {line}: joined row has {length} characters, cannot strip {strip}")]
    TruncationUnderflow {
        line: usize,
        length: usize,
        strip: usize,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Failed to start '{program}' for '{}': {source}", .config_path.display())]
    ProcessSpawnError {
        program: String,
        config_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' failed for '{}' ({status})", .config_path.display())]
    ProcessFailed {
        program: String,
        config_path: PathBuf,
        status: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SeisError {
    pub fn config(message: impl Into<String>) -> Self {
        SeisError::ConfigError {
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        SeisError::ProcessingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SeisError::FileReadError { .. } | SeisError::FileWriteError { .. } => {
                ErrorCategory::Io
            }
            SeisError::ConfigError { .. }
            | SeisError::ConfigValidationError { .. }
            | SeisError::InvalidConfigValueError { .. }
            | SeisError::EventConfigError { .. } => ErrorCategory::Configuration,
            SeisError::SerializationError(_)
            | SeisError::ParseError { .. }
            | SeisError::NonNumericDistance { .. }
            | SeisError::TruncationUnderflow { .. }
            | SeisError::ProcessingError { .. } => ErrorCategory::Data,
            SeisError::ProcessSpawnError { .. } | SeisError::ProcessFailed { .. } => {
                ErrorCategory::External
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 外部程式失敗, 修正環境後可重跑
            SeisError::ProcessFailed { .. } => ErrorSeverity::Medium,
            // Pysep 不存在, 環境問題
            SeisError::ProcessSpawnError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SeisError::FileReadError { path, .. } => format!(
                "Check that '{}' exists and is readable",
                path.display()
            ),
            SeisError::FileWriteError { path, .. } => format!(
                "Check that the directory of '{}' exists and is writable",
                path.display()
            ),
            SeisError::EventConfigError { path, .. } => format!(
                "Create '{}' or pass the base name of an existing YAML file",
                path.display()
            ),
            SeisError::NonNumericDistance { .. } | SeisError::ParseError { .. } => {
                "Column 2 of every row must be a distance in km".to_string()
            }
            SeisError::TruncationUnderflow { .. } => {
                "Use --strip-fields or --keep-all instead of a character cut".to_string()
            }
            SeisError::ConfigError { .. }
            | SeisError::ConfigValidationError { .. }
            | SeisError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            SeisError::ProcessSpawnError { program, .. } => format!(
                "Install Pysep so that '{}' is on PATH, or set --pysep-bin / PYSEP_BIN",
                program
            ),
            SeisError::ProcessFailed { .. } => {
                "Inspect the Pysep output above for the failing step".to_string()
            }
            _ => "Re-run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Input data problem: {}", self),
            ErrorCategory::External => format!("Pysep run failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SeisError>;
