use url::Url;

/// Raw HTTP response captured from the most recent request.
///
/// The status code is recorded but never interpreted; error detection is
/// driven by the `Error` envelope in the decoded payload.
#[derive(Clone, Debug)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Declared `Content-Type`, if any. Not consulted when decoding.
    pub content_type: Option<String>,
    /// Body text as received.
    pub body: String,
    /// Full request URL, including the query string.
    pub url: Url,
}
