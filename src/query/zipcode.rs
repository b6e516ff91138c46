use url::Url;

use super::Query;

/// Query builder for the postal-code search.
#[derive(Default)]
pub struct ZipcodeQuery {
    /// Postal code or name keyword, e.g. `100-0005`.
    pub query: Option<String>,
    /// Address code filter.
    pub ac: Option<String>,
    /// Sort key, e.g. `zip_kana` or `zip_code`.
    pub sort: Option<String>,
    /// Postal-code kind filter.
    pub zkind: Option<u32>,
    /// Maximum number of results.
    pub results: Option<u32>,
    /// 1-indexed offset of the first result.
    pub start: Option<u32>,
    /// Response detail level, e.g. `simple` or `full`.
    pub detail: Option<String>,
}

impl Query for ZipcodeQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(query) = &self.query {
            url.query_pairs_mut().append_pair("query", query.as_str());
        }
        if let Some(ac) = &self.ac {
            url.query_pairs_mut().append_pair("ac", ac.as_str());
        }
        if let Some(sort) = &self.sort {
            url.query_pairs_mut().append_pair("sort", sort.as_str());
        }
        if let Some(zkind) = self.zkind {
            url.query_pairs_mut()
                .append_pair("zkind", &zkind.to_string());
        }
        if let Some(results) = self.results {
            url.query_pairs_mut()
                .append_pair("results", &results.to_string());
        }
        if let Some(start) = self.start {
            url.query_pairs_mut()
                .append_pair("start", &start.to_string());
        }
        if let Some(detail) = &self.detail {
            url.query_pairs_mut().append_pair("detail", detail.as_str());
        }
        url
    }
}

impl ZipcodeQuery {
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }
    pub fn with_ac(mut self, ac: &str) -> Self {
        self.ac = Some(ac.to_string());
        self
    }
    pub fn with_sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }
    pub fn with_zkind(mut self, zkind: u32) -> Self {
        self.zkind = Some(zkind);
        self
    }
    pub fn with_results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }
    pub fn with_detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
