use url::Url;

use crate::types::Datum;

use super::Query;

/// Query builder for the address geocoder. Every field is optional; a plain
/// free-text search only needs [`with_query`](GeocodeQuery::with_query).
#[derive(Default)]
pub struct GeocodeQuery {
    /// Free-text address keyword.
    pub query: Option<String>,
    /// Character encoding of `query`, e.g. `UTF-8`.
    pub ei: Option<String>,
    /// Latitude of the search center.
    pub lat: Option<f64>,
    /// Longitude of the search center.
    pub lon: Option<f64>,
    /// Bounding box to search within, `lon1,lat1,lon2,lat2`.
    pub bbox: Option<String>,
    /// Geodetic datum of the supplied and returned coordinates.
    pub datum: Option<Datum>,
    pub wgs: Option<String>,
    pub tky: Option<String>,
    /// Address code filter.
    pub ac: Option<String>,
    /// Address level to search at.
    pub al: Option<u8>,
    /// Address range filter.
    pub ar: Option<String>,
    /// Search upper address levels when nothing matches at `al`.
    pub recursive: Option<bool>,
    /// Sort key, e.g. `score` or `address`.
    pub sort: Option<String>,
    pub exclude_prefecture: Option<bool>,
    pub exclude_seireishi: Option<bool>,
    /// 1-indexed offset of the first result.
    pub start: Option<u32>,
    /// Page number.
    pub page: Option<u32>,
    /// Maximum number of results.
    pub results: Option<u32>,
    /// Response detail level, e.g. `simple` or `full`.
    pub detail: Option<String>,
}

impl Query for GeocodeQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(query) = &self.query {
            url.query_pairs_mut().append_pair("query", query.as_str());
        }
        if let Some(ei) = &self.ei {
            url.query_pairs_mut().append_pair("ei", ei.as_str());
        }
        if let Some(lat) = self.lat {
            url.query_pairs_mut().append_pair("lat", &lat.to_string());
        }
        if let Some(lon) = self.lon {
            url.query_pairs_mut().append_pair("lon", &lon.to_string());
        }
        if let Some(bbox) = &self.bbox {
            url.query_pairs_mut().append_pair("bbox", bbox.as_str());
        }
        if let Some(datum) = self.datum {
            url.query_pairs_mut()
                .append_pair("datum", &datum.to_string());
        }
        if let Some(wgs) = &self.wgs {
            url.query_pairs_mut().append_pair("wgs", wgs.as_str());
        }
        if let Some(tky) = &self.tky {
            url.query_pairs_mut().append_pair("tky", tky.as_str());
        }
        if let Some(ac) = &self.ac {
            url.query_pairs_mut().append_pair("ac", ac.as_str());
        }
        if let Some(al) = self.al {
            url.query_pairs_mut().append_pair("al", &al.to_string());
        }
        if let Some(ar) = &self.ar {
            url.query_pairs_mut().append_pair("ar", ar.as_str());
        }
        if let Some(recursive) = self.recursive {
            url.query_pairs_mut()
                .append_pair("recursive", &recursive.to_string());
        }
        if let Some(sort) = &self.sort {
            url.query_pairs_mut().append_pair("sort", sort.as_str());
        }
        if let Some(exclude_prefecture) = self.exclude_prefecture {
            url.query_pairs_mut()
                .append_pair("exclude_prefecture", &exclude_prefecture.to_string());
        }
        if let Some(exclude_seireishi) = self.exclude_seireishi {
            url.query_pairs_mut()
                .append_pair("exclude_seireishi", &exclude_seireishi.to_string());
        }
        if let Some(start) = self.start {
            url.query_pairs_mut()
                .append_pair("start", &start.to_string());
        }
        if let Some(page) = self.page {
            url.query_pairs_mut().append_pair("page", &page.to_string());
        }
        if let Some(results) = self.results {
            url.query_pairs_mut()
                .append_pair("results", &results.to_string());
        }
        if let Some(detail) = &self.detail {
            url.query_pairs_mut().append_pair("detail", detail.as_str());
        }
        url
    }
}

impl GeocodeQuery {
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }
    pub fn with_ei(mut self, ei: &str) -> Self {
        self.ei = Some(ei.to_string());
        self
    }
    pub fn with_lat(mut self, lat: f64) -> Self {
        self.lat = Some(lat);
        self
    }
    pub fn with_lon(mut self, lon: f64) -> Self {
        self.lon = Some(lon);
        self
    }
    pub fn with_bbox(mut self, bbox: &str) -> Self {
        self.bbox = Some(bbox.to_string());
        self
    }
    pub fn with_datum(mut self, datum: Datum) -> Self {
        self.datum = Some(datum);
        self
    }
    pub fn with_wgs(mut self, wgs: &str) -> Self {
        self.wgs = Some(wgs.to_string());
        self
    }
    pub fn with_tky(mut self, tky: &str) -> Self {
        self.tky = Some(tky.to_string());
        self
    }
    pub fn with_ac(mut self, ac: &str) -> Self {
        self.ac = Some(ac.to_string());
        self
    }
    pub fn with_al(mut self, al: u8) -> Self {
        self.al = Some(al);
        self
    }
    pub fn with_ar(mut self, ar: &str) -> Self {
        self.ar = Some(ar.to_string());
        self
    }
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = Some(recursive);
        self
    }
    pub fn with_sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }
    pub fn with_exclude_prefecture(mut self, exclude: bool) -> Self {
        self.exclude_prefecture = Some(exclude);
        self
    }
    pub fn with_exclude_seireishi(mut self, exclude: bool) -> Self {
        self.exclude_seireishi = Some(exclude);
        self
    }
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
    pub fn with_results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }
    pub fn with_detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::GeocodeQuery;
    use crate::query::Query;
    use crate::types::Datum;

    #[test]
    fn default_query_appends_nothing() {
        let url = Url::parse("https://example.com/geoCoder").unwrap();
        assert_eq!(GeocodeQuery::default().add_to_url(&url).query(), None);
    }

    #[test]
    fn set_options_appear_unset_options_do_not() {
        let url = Url::parse("https://example.com/geoCoder").unwrap();
        let url = GeocodeQuery::default()
            .with_query("丸の内一丁目")
            .with_datum(Datum::Tky)
            .with_recursive(true)
            .with_results(5)
            .add_to_url(&url);
        let query = url.query().unwrap();
        assert!(query.contains("datum=tky"));
        assert!(query.contains("recursive=true"));
        assert!(query.contains("results=5"));
        assert!(!query.contains("bbox="));
        assert!(!query.contains("sort="));
        assert!(!query.contains("page="));
    }
}
