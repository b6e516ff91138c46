//! HTTP client for the YOLP geo APIs.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::{
    decode::decode,
    query::{ContentsQuery, GeocodeQuery, Query, ZipcodeQuery},
    types::{Coordinate, Datum, RawResponse},
    Error,
};

/// The eight service endpoints, each on its own production host.
#[derive(Clone, Copy, Debug)]
enum Endpoint {
    Geocoder,
    ReverseGeocoder,
    Distance,
    ZipcodeSearch,
    PlaceInfo,
    ContentsGeocoder,
    DatumConvert,
    Altitude,
}

impl Endpoint {
    fn host(self) -> &'static str {
        match self {
            Endpoint::Geocoder => "geo.search.olp.yahooapis.jp",
            Endpoint::ReverseGeocoder => "reverse.search.olp.yahooapis.jp",
            Endpoint::Distance => "distance.search.olp.yahooapis.jp",
            Endpoint::ZipcodeSearch => "search.olp.yahooapis.jp",
            Endpoint::PlaceInfo => "placeinfo.olp.yahooapis.jp",
            Endpoint::ContentsGeocoder => "contents.search.olp.yahooapis.jp",
            Endpoint::DatumConvert => "datum.search.olp.yahooapis.jp",
            Endpoint::Altitude => "alt.search.olp.yahooapis.jp",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Endpoint::Geocoder => "/OpenLocalPlatform/V1/geoCoder",
            Endpoint::ReverseGeocoder => "/OpenLocalPlatform/V1/reverseGeoCoder",
            Endpoint::Distance => "/OpenLocalPlatform/V1/distance",
            Endpoint::ZipcodeSearch => "/OpenLocalPlatform/V1/zipCodeSearch",
            Endpoint::PlaceInfo => "/V1/get",
            Endpoint::ContentsGeocoder => "/OpenLocalPlatform/V1/contentsGeoCoder",
            Endpoint::DatumConvert => "/OpenLocalPlatform/V1/datumConvert",
            Endpoint::Altitude => "/OpenLocalPlatform/V1/getAltitude",
        }
    }
}

/// Client for the Yahoo! Open Local Platform geo APIs.
///
/// Holds the application ID sent with every request plus, after each call,
/// the last raw response and the last `ResultInfo` block. Methods take
/// `&mut self` because that state is overwritten on every call: one client
/// instance serves one call at a time, and the last write wins.
///
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout.
/// There are no retries; transport failures propagate immediately.
pub struct Client {
    appid: String,
    /// When set, every endpoint resolves to `{base}{path}`. Used for testing
    /// with wiremock.
    base_url: Option<String>,
    last_response: Option<RawResponse>,
    last_result: Option<Value>,
}

impl Client {
    /// Creates a client pointing at the production hosts.
    pub fn new(appid: &str) -> Self {
        Self {
            appid: appid.to_string(),
            base_url: None,
            last_response: None,
            last_result: None,
        }
    }

    /// Creates a client that sends every request to `{base_url}{path}`
    /// instead of the production hosts.
    pub fn with_base_url(appid: &str, base_url: &str) -> Self {
        Self {
            appid: appid.to_string(),
            base_url: Some(base_url.trim_end_matches('/').to_string()),
            last_response: None,
            last_result: None,
        }
    }

    /// The raw response of the most recent request, success or service
    /// failure alike.
    pub fn last_response(&self) -> Option<&RawResponse> {
        self.last_response.as_ref()
    }

    /// The `ResultInfo` block of the most recent successful call. Always
    /// `None` after [`place`](Client::place); that response shape carries
    /// none.
    pub fn last_result(&self) -> Option<&Value> {
        self.last_result.as_ref()
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, Error> {
        let raw = match &self.base_url {
            Some(base) => format!("{}{}", base, endpoint.path()),
            None => format!("https://{}{}", endpoint.host(), endpoint.path()),
        };
        Url::parse(&raw).map_err(|e| {
            tracing::error!("invalid URL constructed for {:?}: {}", endpoint, e);
            Error::InvalidUrl(e)
        })
    }

    /// Shared request path: injects the fixed parameters, performs the GET,
    /// records the raw response, decodes the body, and checks for the
    /// service's error envelope.
    async fn request(&mut self, mut url: Url) -> Result<Value, Error> {
        // The fixed parameters always win over caller-supplied ones.
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != "appid" && k != "output")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(pairs)
            .append_pair("appid", &self.appid)
            .append_pair("output", "json");

        tracing::debug!("GET {}", url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let resp = client.get(url.clone()).send().await.map_err(|e| {
            tracing::error!("failed to reach {}: {}", url, e);
            Error::Transport(e)
        })?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.text().await.map_err(|e| {
            tracing::error!("failed to read response body: {}", e);
            Error::Transport(e)
        })?;

        let raw = RawResponse {
            status,
            content_type,
            body,
            url,
        };
        self.last_response = Some(raw.clone());

        // The HTTP status is not interpreted; failures are reported through
        // the payload's Error envelope.
        let data = decode(&raw.body)?;

        if let Some(envelope) = data.get("Error") {
            let message = envelope
                .get("Message")
                .and_then(Value::as_str)
                .ok_or(Error::MissingField("Message"))?
                .to_string();
            let code = envelope.get("Code").and_then(error_code);
            let detail = envelope
                .get("Detail")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            tracing::error!("service error (code {:?}): {}", code, message);
            return Err(Error::Service {
                message,
                code,
                detail,
                response: raw,
            });
        }

        Ok(data)
    }

    /// Request path for the Feature-returning operations: captures the
    /// `ResultInfo` block and reduces the payload to its feature list.
    async fn request_features(&mut self, url: Url) -> Result<Vec<Value>, Error> {
        let data = self.request(url).await?;
        self.last_result = data.get("ResultInfo").cloned();
        Ok(features(data))
    }

    /// Searches addresses by keyword and returns their locations.
    pub async fn geocode(&mut self, query: &GeocodeQuery) -> Result<Vec<Value>, Error> {
        let url = query.add_to_url(&self.endpoint_url(Endpoint::Geocoder)?);
        self.request_features(url).await
    }

    /// Looks up the address information of a point.
    pub async fn reverse_geocode(
        &mut self,
        lat: f64,
        lon: f64,
        datum: Option<Datum>,
    ) -> Result<Vec<Value>, Error> {
        let mut url = self.endpoint_url(Endpoint::ReverseGeocoder)?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lon.to_string());
        if let Some(datum) = datum {
            url.query_pairs_mut()
                .append_pair("datum", &datum.to_string());
        }
        self.request_features(url).await
    }

    /// Computes the ellipsoidal distance between two points.
    pub async fn distance(
        &mut self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Vec<Value>, Error> {
        let mut url = self.endpoint_url(Endpoint::Distance)?;
        url.query_pairs_mut().append_pair(
            "coordinates",
            &format!("{} {}", start.to_wire(), end.to_wire()),
        );
        self.request_features(url).await
    }

    /// Searches postal codes and returns their locations and names.
    pub async fn zipcode(&mut self, query: &ZipcodeQuery) -> Result<Vec<Value>, Error> {
        let url = query.add_to_url(&self.endpoint_url(Endpoint::ZipcodeSearch)?);
        self.request_features(url).await
    }

    /// Returns landmark and area names around a point, as the service's full
    /// `ResultSet` mapping. That response shape has no `ResultInfo`, so the
    /// last-result state is cleared.
    pub async fn place(&mut self, lat: f64, lon: f64) -> Result<Value, Error> {
        let mut url = self.endpoint_url(Endpoint::PlaceInfo)?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lon.to_string());
        let mut data = self.request(url).await?;
        self.last_result = None;
        match data.get_mut("ResultSet") {
            Some(result_set) => Ok(result_set.take()),
            None => Err(Error::MissingField("ResultSet")),
        }
    }

    /// Detects place keywords in free text and returns their locations.
    pub async fn contents(
        &mut self,
        query: &str,
        options: &ContentsQuery,
    ) -> Result<Vec<Value>, Error> {
        let mut url = options.add_to_url(&self.endpoint_url(Endpoint::ContentsGeocoder)?);
        url.query_pairs_mut().append_pair("query", query);
        self.request_features(url).await
    }

    /// Converts coordinates between the Tokyo and world geodetic datums.
    /// Returns one feature per input pair.
    pub async fn datum_convert(
        &mut self,
        coordinates: &[Coordinate],
        datum: Option<Datum>,
    ) -> Result<Vec<Value>, Error> {
        if coordinates.is_empty() {
            return Err(Error::NoCoordinates);
        }
        let mut url = self.endpoint_url(Endpoint::DatumConvert)?;
        url.query_pairs_mut()
            .append_pair("coordinates", &join_coordinates(coordinates));
        if let Some(datum) = datum {
            url.query_pairs_mut()
                .append_pair("datum", &datum.to_string());
        }
        self.request_features(url).await
    }

    /// Looks up the altitude of each point. Returns one feature per input
    /// pair.
    pub async fn altitude(&mut self, coordinates: &[Coordinate]) -> Result<Vec<Value>, Error> {
        if coordinates.is_empty() {
            return Err(Error::NoCoordinates);
        }
        let mut url = self.endpoint_url(Endpoint::Altitude)?;
        url.query_pairs_mut()
            .append_pair("coordinates", &join_coordinates(coordinates));
        self.request_features(url).await
    }
}

/// A missing `Feature` key means "no results": callers always get a list.
/// The XML fallback yields a bare mapping when exactly one feature is
/// present, so a non-array value becomes a one-element list.
fn features(mut data: Value) -> Vec<Value> {
    match data.get_mut("Feature") {
        Some(value) => match value.take() {
            Value::Array(items) => items,
            single => vec![single],
        },
        None => Vec::new(),
    }
}

/// The service encodes `Code` as a JSON number, but the XML fallback yields
/// strings; accept both.
fn error_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn join_coordinates(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(Coordinate::to_wire)
        .collect::<Vec<_>>()
        .join(",")
}
