use crate::core::{ConfigProvider, PageFetcher, PageResponse};
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Page fetcher over one shared `reqwest` client.
///
/// The client is built once and reused for every page. `fetch` returns only
/// after the whole body has been received.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.timeout_seconds()),
            config.user_agent(),
        )
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<PageResponse> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();

        // 等整個 body 下載完成才算頁面就緒
        let body = response.text().await?;

        Ok(PageResponse { status, body })
    }
}
