use crate::domain::model::Truncation;
use crate::utils::error::{Result, SeisError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MAX_STRIP_COUNT: usize = 4096;

/// `generate-travel` 的 TOML 設定檔, 所有區塊皆可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelConfig {
    pub input: Option<InputConfig>,
    pub conversion: Option<ConversionConfig>,
    pub truncation: Option<TruncationConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub velocity_km_s: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruncationConfig {
    pub mode: String,
    pub count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl TruncationConfig {
    pub fn to_truncation(&self) -> Result<Truncation> {
        match self.mode.to_ascii_lowercase().as_str() {
            "chars" => Ok(Truncation::Chars(self.count.unwrap_or(8))),
            "fields" => Ok(Truncation::Fields(self.count.unwrap_or(2))),
            "none" => Ok(Truncation::None),
            other => Err(SeisError::InvalidConfigValueError {
                field: "truncation.mode".to_string(),
                value: other.to_string(),
                reason: "Valid modes: chars, fields, none".to_string(),
            }),
        }
    }
}

impl TravelConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SeisError::FileReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SeisError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WEIGHTS_DIR}), 未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| SeisError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_ref().map(|i| i.path.as_path())
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_ref().map(|o| o.path.as_path())
    }

    pub fn velocity_km_s(&self) -> Option<f64> {
        self.conversion.as_ref().and_then(|c| c.velocity_km_s)
    }

    pub fn truncation(&self) -> Result<Option<Truncation>> {
        self.truncation
            .as_ref()
            .map(TruncationConfig::to_truncation)
            .transpose()
    }
}

impl Validate for TravelConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = self.input_path() {
            validation::validate_path("input.path", path)?;
        }
        if let Some(path) = self.output_path() {
            validation::validate_path("output.path", path)?;
        }
        if let Some(velocity) = self.velocity_km_s() {
            validation::validate_positive_float("conversion.velocity_km_s", velocity)?;
        }
        if let Some(count) = self.truncation.as_ref().and_then(|t| t.count) {
            validation::validate_range("truncation.count", count, 0, MAX_STRIP_COUNT)?;
        }
        self.truncation()?;
        Ok(())
    }
}
