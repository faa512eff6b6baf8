use crate::core::travel_time::convert_table;
use crate::core::weights::parse_weights;
use crate::core::{ConfigProvider, ConversionResult, Pipeline, Storage, WeightsTable};
use crate::utils::error::{Result, SeisError};

pub struct TravelTimePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> TravelTimePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TravelTimePipeline<S, C> {
    async fn extract(&self) -> Result<WeightsTable> {
        let path = self.config.input_path();
        tracing::debug!("Reading weights file: {}", path.display());

        let bytes = self.storage.read_file(path).await?;
        let text = String::from_utf8(bytes).map_err(|e| SeisError::ParseError {
            line: 0,
            message: format!("{} is not valid UTF-8: {}", path.display(), e),
        })?;

        parse_weights(&text)
    }

    async fn transform(&self, table: WeightsTable) -> Result<ConversionResult> {
        let velocity = self.config.velocity_km_s();
        let truncation = self.config.truncation();
        tracing::debug!(
            "Converting {} rows at {} km/s ({})",
            table.len(),
            velocity,
            truncation
        );

        let result = convert_table(&table, velocity, truncation)?;

        for row in &result.rows {
            tracing::debug!(
                "Line {}: {} km -> {} s",
                row.line,
                row.distance_km,
                row.travel_time_s
            );
        }

        Ok(result)
    }

    async fn load(&self, result: &ConversionResult) -> Result<String> {
        let path = self.config.output_path();
        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            result.rows.len(),
            result.output.len(),
            path.display()
        );

        self.storage.write_file(path, result.output.as_bytes()).await?;
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionSettings;
    use crate::domain::model::Truncation;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(PathBuf::from(path), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(Path::new(path)).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| SeisError::FileReadError {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            })
        }

        async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_extract_transform_load() {
        let storage = MockStorage::new();
        storage
            .put("weights.dat", "STA1 28.0 1 0.0 0.0\nSTA2 14.0 1 0.0 0.0\n")
            .await;

        let settings = ConversionSettings::new("weights.dat");
        let pipeline = TravelTimePipeline::new(storage.clone(), settings);

        let table = pipeline.extract().await.unwrap();
        assert_eq!(table.len(), 2);

        let result = pipeline.transform(table).await.unwrap();
        assert_eq!(result.travel_times(), vec![10.0, 5.0]);

        let output_path = pipeline.load(&result).await.unwrap();
        assert_eq!(output_path, "newweights.dat");

        let written = storage.get_file("newweights.dat").await.unwrap();
        assert_eq!(
            String::from_utf8(written).unwrap(),
            "STA1 28.0 1 10.0 0 0\nSTA2 14.0 1 5.0 0 0"
        );
    }

    #[tokio::test]
    async fn test_transform_uses_configured_velocity_and_truncation() {
        let storage = MockStorage::new();
        storage.put("w.dat", "STA1 35.0 x").await;

        let mut settings = ConversionSettings::new("w.dat");
        settings.velocity_km_s = 3.5;
        settings.truncation = Truncation::Fields(1);
        let pipeline = TravelTimePipeline::new(storage, settings);

        let table = pipeline.extract().await.unwrap();
        let result = pipeline.transform(table).await.unwrap();
        assert_eq!(result.output, "STA1 35.0 10.0 0 0");
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let pipeline =
            TravelTimePipeline::new(MockStorage::new(), ConversionSettings::new("nope.dat"));
        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, SeisError::FileReadError { .. }));
    }

    #[tokio::test]
    async fn test_extract_rejects_binary_input() {
        let storage = MockStorage::new();
        storage
            .files
            .lock()
            .await
            .insert(PathBuf::from("bin.dat"), vec![0xff, 0xfe, 0x00]);

        let pipeline = TravelTimePipeline::new(storage, ConversionSettings::new("bin.dat"));
        assert!(matches!(
            pipeline.extract().await.unwrap_err(),
            SeisError::ParseError { .. }
        ));
    }
}
