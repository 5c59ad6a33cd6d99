use crate::domain::model::{PageResponse, Record, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::ops::RangeInclusive;
use url::Url;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 回報 `path` 實際寫入的位置
    fn location(&self, path: &str) -> String;
}

/// Loads one listing page and hands back its full body once the response
/// has completed.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> impl std::future::Future<Output = Result<PageResponse>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn query_parameters(&self) -> Vec<(String, String)>;
    fn page_parameter(&self) -> &str;
    fn page_range(&self) -> RangeInclusive<u32>;
    fn payload_key(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn user_agent(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
