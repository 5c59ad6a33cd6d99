use crate::core::extract;
use crate::core::harvester::Harvester;
use crate::core::query::QueryTemplate;
use crate::core::{ConfigProvider, PageFetcher, Pipeline, Record, Storage, TransformResult};
use crate::utils::error::Result;

/// Harvest pipeline: every page is extracted first, the CSV is rendered once,
/// and the file is written once at the very end.
pub struct HarvestPipeline<S: Storage, F: PageFetcher> {
    storage: S,
    harvester: Harvester<F>,
    output_file: String,
}

impl<S: Storage, F: PageFetcher> HarvestPipeline<S, F> {
    pub fn new<C: ConfigProvider>(storage: S, fetcher: F, config: &C) -> Result<Self> {
        let template = QueryTemplate::new(
            config.endpoint(),
            config.query_parameters(),
            config.page_parameter(),
        )?;

        Ok(Self {
            storage,
            harvester: Harvester::new(
                fetcher,
                template,
                config.page_range(),
                config.payload_key(),
            ),
            output_file: config.output_file().to_string(),
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, F: PageFetcher> Pipeline for HarvestPipeline<S, F> {
    async fn extract(&self) -> Result<Vec<Record>> {
        self.harvester.harvest().await
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let csv_output = extract::render_csv(&data)?;
        Ok(TransformResult {
            records: data,
            csv_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.storage.location(&self.output_file);

        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            result.records.len(),
            result.csv_output.len(),
            output_path
        );
        self.storage
            .write_file(&self.output_file, result.csv_output.as_bytes())
            .await?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PageResponse;
    use crate::utils::error::HarvestError;
    use std::collections::HashMap;
    use std::ops::RangeInclusive;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use url::Url;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn file_count(&self) -> usize {
            self.files.lock().await.len()
        }
    }

    impl Storage for MockStorage {
        fn location(&self, path: &str) -> String {
            format!("memory://{}", path)
        }

        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                HarvestError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct StaticFetcher {
        bodies: Vec<String>,
    }

    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &Url) -> Result<PageResponse> {
            let page: usize = url
                .query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse().ok())
                .unwrap_or(0);
            Ok(PageResponse {
                status: 200,
                body: self.bodies[page - 1].clone(),
            })
        }
    }

    struct MockConfig {
        last_page: u32,
    }

    impl ConfigProvider for MockConfig {
        fn endpoint(&self) -> &str {
            "http://listing.test/list/"
        }

        fn query_parameters(&self) -> Vec<(String, String)> {
            vec![("page".to_string(), "1".to_string())]
        }

        fn page_parameter(&self) -> &str {
            "page"
        }

        fn page_range(&self) -> RangeInclusive<u32> {
            1..=self.last_page
        }

        fn payload_key(&self) -> &str {
            "diamonds"
        }

        fn output_path(&self) -> &str {
            "out"
        }

        fn output_file(&self) -> &str {
            "brilliant.csv"
        }

        fn timeout_seconds(&self) -> u64 {
            30
        }

        fn user_agent(&self) -> &str {
            "test"
        }
    }

    #[tokio::test]
    async fn test_pipeline_writes_header_and_rows_once() {
        let storage = MockStorage::new();
        let fetcher = StaticFetcher {
            bodies: vec![
                r#"{"diamonds":[{"price":1000,"shape":"Round","carat":0.5,"cut":"Ideal","color":"G","clarity":"VS1","table":57,"depth":61}]}"#.to_string(),
            ],
        };
        let pipeline =
            HarvestPipeline::new(storage.clone(), fetcher, &MockConfig { last_page: 1 }).unwrap();

        let records = pipeline.extract().await.unwrap();
        let result = pipeline.transform(records).await.unwrap();
        let path = pipeline.load(result).await.unwrap();

        // 回報路徑來自 storage，而不是 config 的 output_path ("out")
        assert_eq!(path, "memory://brilliant.csv");
        let written = storage.get_file("brilliant.csv").await.unwrap();
        assert_eq!(
            String::from_utf8(written).unwrap(),
            "price,shape,carat,cut,color,clarity,table,depth\n1000,Round,0.5,Ideal,G,VS1,57,61\n"
        );
        assert_eq!(storage.file_count().await, 1);
    }

    #[tokio::test]
    async fn test_extract_failure_leaves_storage_untouched() {
        let storage = MockStorage::new();
        let fetcher = StaticFetcher {
            bodies: vec![
                r#"{"diamonds":[]}"#.to_string(),
                r#"{"diamonds": "oops"}"#.to_string(),
            ],
        };
        let pipeline =
            HarvestPipeline::new(storage.clone(), fetcher, &MockConfig { last_page: 2 }).unwrap();

        assert!(pipeline.extract().await.is_err());
        assert_eq!(storage.file_count().await, 0);
        assert!(storage.read_file("brilliant.csv").await.is_err());
    }
}
