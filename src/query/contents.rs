use url::Url;

use super::Query;

/// Options for the content geocoder. The search keyword itself is a required
/// argument of [`Client::contents`](crate::Client::contents).
#[derive(Default)]
pub struct ContentsQuery {
    /// Character encoding of the keyword, e.g. `UTF-8`.
    pub ei: Option<String>,
    /// Content category filter, e.g. `landmark` or `address`.
    pub category: Option<String>,
    /// Maximum number of results.
    pub results: Option<u32>,
}

impl Query for ContentsQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(ei) = &self.ei {
            url.query_pairs_mut().append_pair("ei", ei.as_str());
        }
        if let Some(category) = &self.category {
            url.query_pairs_mut()
                .append_pair("category", category.as_str());
        }
        if let Some(results) = self.results {
            url.query_pairs_mut()
                .append_pair("results", &results.to_string());
        }
        url
    }
}

impl ContentsQuery {
    pub fn with_ei(mut self, ei: &str) -> Self {
        self.ei = Some(ei.to_string());
        self
    }
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
    pub fn with_results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }
}
