use crate::domain::model::{ConversionResult, RunOutcome, Truncation, WeightsTable};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &Path;
    fn output_path(&self) -> &Path;
    fn velocity_km_s(&self) -> f64;
    fn truncation(&self) -> Truncation;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<WeightsTable>;
    async fn transform(&self, table: WeightsTable) -> Result<ConversionResult>;
    async fn load(&self, result: &ConversionResult) -> Result<String>;
}

/// Runs the external event processor against one configuration file.
#[async_trait]
pub trait EventProcessor: Send + Sync {
    fn program(&self) -> &str;
    async fn run(&self, config_path: &Path) -> Result<RunOutcome>;
}
