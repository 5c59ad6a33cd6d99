use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct HarvestEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> HarvestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting harvest...");
        self.monitor.log_stats("Startup");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", records.len());
        self.monitor
            .log_stats(&format!("Extract ({} records)", records.len()));

        // Transform
        let result = self.pipeline.transform(records).await?;
        tracing::info!("Rendered {} CSV rows", result.records.len());
        self.monitor.log_stats(&format!(
            "Transform ({} rows, {} bytes)",
            result.records.len(),
            result.csv_output.len()
        ));

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor
            .log_final_stats(&format!("Load ({})", output_path));

        Ok(output_path)
    }
}
