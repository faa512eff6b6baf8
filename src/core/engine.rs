use crate::core::{ConversionResult, Pipeline};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub result: ConversionResult,
    /// `None` on a dry run
    pub output_path: Option<String>,
}

pub struct ConversionEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> ConversionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<ConversionReport> {
        tracing::info!("Reading weights...");
        let table = self.pipeline.extract().await?;
        tracing::info!("Read {} rows", table.len());

        tracing::info!("Computing travel times...");
        let result = self.pipeline.transform(table).await?;
        tracing::info!("Computed {} travel times", result.rows.len());

        if self.dry_run {
            tracing::info!("🔍 DRY RUN MODE - output not written");
            return Ok(ConversionReport {
                result,
                output_path: None,
            });
        }

        let output_path = self.pipeline.load(&result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(ConversionReport {
            result,
            output_path: Some(output_path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::travel_time::convert;
    use crate::core::weights::parse_weights;
    use crate::domain::model::{Truncation, WeightsTable};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockPipeline {
        text: &'static str,
        loads: AtomicUsize,
    }

    impl MockPipeline {
        fn new(text: &'static str) -> Self {
            Self {
                text,
                loads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for MockPipeline {
        async fn extract(&self) -> Result<WeightsTable> {
            parse_weights(self.text)
        }

        async fn transform(&self, _table: WeightsTable) -> Result<ConversionResult> {
            convert(self.text, 2.8, Truncation::None)
        }

        async fn load(&self, _result: &ConversionResult) -> Result<String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok("mock.dat".to_string())
        }
    }

    #[test]
    fn test_run_loads_output() {
        let engine = ConversionEngine::new(MockPipeline::new("STA1 28.0\nSTA2 2.8"));
        let report = tokio_test::block_on(engine.run()).unwrap();

        assert_eq!(report.output_path.as_deref(), Some("mock.dat"));
        assert_eq!(report.result.rows.len(), 2);
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dry_run_skips_load() {
        let engine = ConversionEngine::new(MockPipeline::new("STA1 28.0")).with_dry_run(true);
        let report = engine.run().await.unwrap();

        assert!(report.output_path.is_none());
        assert_eq!(report.result.output, "STA1 28.0 10.0 0 0");
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extract_error_stops_run() {
        let engine = ConversionEngine::new(MockPipeline::new("STA1 28.0\nSTA2"));
        assert!(engine.run().await.is_err());
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }
}
