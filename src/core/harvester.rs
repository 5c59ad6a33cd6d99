use crate::core::extract;
use crate::core::query::QueryTemplate;
use crate::domain::model::Record;
use crate::domain::ports::PageFetcher;
use crate::utils::error::{HarvestError, Result};
use std::ops::RangeInclusive;

/// Pages through the listing search in ascending order and collects every
/// projected record.
///
/// The first failing page aborts the run; records gathered so far are
/// dropped with it.
pub struct Harvester<F: PageFetcher> {
    fetcher: F,
    template: QueryTemplate,
    pages: RangeInclusive<u32>,
    payload_key: String,
}

impl<F: PageFetcher> Harvester<F> {
    pub fn new(
        fetcher: F,
        template: QueryTemplate,
        pages: RangeInclusive<u32>,
        payload_key: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            template,
            pages,
            payload_key: payload_key.into(),
        }
    }

    pub async fn harvest(&self) -> Result<Vec<Record>> {
        let total_pages = self.pages.clone().count();
        tracing::info!(
            "🚀 Harvesting pages {}..={} ({} pages)",
            self.pages.start(),
            self.pages.end(),
            total_pages
        );

        let mut records = Vec::new();
        for page in self.pages.clone() {
            let page_records = self.fetch_page(page).await?;
            tracing::info!(
                "📄 Page {}/{}: {} entries ({} total)",
                page,
                self.pages.end(),
                page_records.len(),
                records.len() + page_records.len()
            );
            records.extend(page_records);
        }

        Ok(records)
    }

    /// 抓取單頁並投影出紀錄
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Record>> {
        let url = self.template.url_for(page);
        tracing::debug!("Requesting page {}: {}", page, url);

        let response = self.fetcher.fetch(&url).await?;
        tracing::debug!("Page {} response status: {}", page, response.status);

        if !response.is_success() {
            return Err(HarvestError::HttpStatusError {
                page,
                status: response.status,
            });
        }

        if !extract::is_ready(&response.body, &self.payload_key) {
            return Err(HarvestError::PageNotReadyError {
                page,
                marker: self.payload_key.clone(),
            });
        }

        extract::parse_page(page, &response.body, &self.payload_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PageResponse;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use url::Url;

    /// 以頁碼回傳預先準備好的內容，並記錄請求順序
    struct MockFetcher {
        pages: HashMap<u32, PageResponse>,
        requested: Mutex<Vec<u32>>,
    }

    impl MockFetcher {
        fn new(pages: Vec<(u32, u16, String)>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(page, status, body)| (page, PageResponse { status, body }))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl PageFetcher for MockFetcher {
        async fn fetch(&self, url: &Url) -> Result<PageResponse> {
            let page: u32 = url
                .query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse().ok())
                .unwrap();
            self.requested.lock().unwrap().push(page);
            Ok(self.pages.get(&page).cloned().unwrap_or(PageResponse {
                status: 404,
                body: String::new(),
            }))
        }
    }

    fn entry(price: u64, shape: &str) -> serde_json::Value {
        serde_json::json!({
            "price": price, "shape": shape, "carat": 0.5, "cut": "Ideal",
            "color": "G", "clarity": "VS1", "table": 57, "depth": 61
        })
    }

    fn body(entries: Vec<serde_json::Value>) -> String {
        serde_json::json!({ "diamonds": entries }).to_string()
    }

    fn harvester(fetcher: MockFetcher, pages: RangeInclusive<u32>) -> Harvester<MockFetcher> {
        let template = QueryTemplate::new(
            "http://listing.test/loose-diamonds/list/",
            vec![("currency".to_string(), "CAD".to_string())],
            "page",
        )
        .unwrap();
        Harvester::new(fetcher, template, pages, "diamonds")
    }

    #[tokio::test]
    async fn test_records_follow_page_then_entry_order() {
        let fetcher = MockFetcher::new(vec![
            (1, 200, body(vec![entry(100, "Round"), entry(200, "Oval")])),
            (2, 200, body(vec![entry(300, "Pear")])),
        ]);
        let harvester = harvester(fetcher, 1..=2);

        let records = harvester.harvest().await.unwrap();

        let prices: Vec<String> = records.iter().map(|r| r.price.to_string()).collect();
        assert_eq!(prices, vec!["100", "200", "300"]);
        assert_eq!(harvester.fetcher.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_empty_page_does_not_stop_run() {
        let fetcher = MockFetcher::new(vec![
            (1, 200, body(vec![entry(100, "Round")])),
            (2, 200, body(vec![])),
            (3, 200, body(vec![entry(300, "Heart")])),
        ]);
        let harvester = harvester(fetcher, 1..=3);

        let records = harvester.harvest().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(harvester.fetcher.requested(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_malformed_page_halts_run() {
        let fetcher = MockFetcher::new(vec![
            (1, 200, body(vec![entry(100, "Round")])),
            (2, 200, r#"{"diamonds": [{"price": 1}]}"#.to_string()),
            (3, 200, body(vec![entry(300, "Heart")])),
        ]);
        let harvester = harvester(fetcher, 1..=3);

        let err = harvester.harvest().await.unwrap_err();
        assert!(matches!(
            err,
            HarvestError::InvalidEntryError { page: 2, index: 0, .. }
        ));
        // 第 3 頁不應被請求
        assert_eq!(harvester.fetcher.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_http_status_failure() {
        let fetcher = MockFetcher::new(vec![(1, 503, "Service Unavailable".to_string())]);
        let harvester = harvester(fetcher, 1..=1);

        let err = harvester.harvest().await.unwrap_err();
        assert!(matches!(
            err,
            HarvestError::HttpStatusError { page: 1, status: 503 }
        ));
    }

    #[tokio::test]
    async fn test_page_without_marker_is_not_ready() {
        let fetcher = MockFetcher::new(vec![(
            1,
            200,
            "<html><body>Checking your browser</body></html>".to_string(),
        )]);
        let harvester = harvester(fetcher, 1..=1);

        let err = harvester.harvest().await.unwrap_err();
        assert!(matches!(err, HarvestError::PageNotReadyError { page: 1, .. }));
    }

    #[tokio::test]
    async fn test_page_range_not_starting_at_one() {
        let fetcher = MockFetcher::new(vec![
            (4, 200, body(vec![entry(400, "Round")])),
            (5, 200, body(vec![entry(500, "Round")])),
        ]);
        let harvester = harvester(fetcher, 4..=5);

        let records = harvester.harvest().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(harvester.fetcher.requested(), vec![4, 5]);
    }
}
