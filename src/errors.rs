//! Error types for the API client.

use crate::types::RawResponse;

/// Errors that can occur when making API requests.
///
/// Only [`Error::Service`] carries structured fields for programmatic
/// handling; the service's numeric codes are surfaced there unchanged.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The HTTP request itself failed (connection, TLS, or timeout).
    #[error("request failed")]
    Transport(#[from] reqwest::Error),
    /// An endpoint URL could not be constructed from the base URL override.
    #[error("invalid endpoint URL")]
    InvalidUrl(#[from] url::ParseError),
    /// The response body was neither valid JSON nor well-formed XML.
    #[error("response body is neither valid JSON nor well-formed XML")]
    Decode {
        #[source]
        json: serde_json::Error,
        /// The XML parse failure, when the fallback got far enough to report
        /// one. `None` when the body held no XML document at all.
        xml: Option<quick_xml::Error>,
    },
    /// The service reported an application-level failure in its response.
    #[error("{message}")]
    Service {
        /// Human-readable message, always present in the envelope.
        message: String,
        /// Numeric error code, when the service includes one.
        code: Option<i64>,
        /// Free-form detail, empty when the service omits it.
        detail: String,
        /// The raw response the envelope was decoded from.
        response: RawResponse,
    },
    /// A field the service contract guarantees was absent from the response.
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),
    /// The coordinate-list operations require at least one pair.
    #[error("at least one coordinate pair is required")]
    NoCoordinates,
}
