use crate::utils::error::Result;
use url::Url;

/// Request URL template for the listing search.
///
/// Every filter parameter is held constant; only the page parameter changes
/// between requests. Parameters are emitted in the order they were given.
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    endpoint: Url,
    parameters: Vec<(String, String)>,
    page_parameter: String,
}

impl QueryTemplate {
    pub fn new(
        endpoint: &str,
        parameters: Vec<(String, String)>,
        page_parameter: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            parameters,
            page_parameter: page_parameter.into(),
        })
    }

    pub fn page_parameter(&self) -> &str {
        &self.page_parameter
    }

    /// 以頁碼取代模板中的頁碼參數；模板沒有該參數時附加在最後
    pub fn url_for(&self, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        let page_value = page.to_string();
        let mut page_written = false;

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.parameters {
                if *key == self.page_parameter {
                    if !page_written {
                        pairs.append_pair(key, &page_value);
                        page_written = true;
                    }
                } else {
                    pairs.append_pair(key, value);
                }
            }
            if !page_written {
                pairs.append_pair(&self.page_parameter, &page_value);
            }
        }

        url
    }
}
