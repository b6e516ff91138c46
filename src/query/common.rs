//! Shared query infrastructure: the [`Query`] trait.

use url::Url;

/// Trait implemented by all query builders.
///
/// Builders only append parameters that were explicitly set; an unset option
/// never reaches the query string, because the service mishandles
/// empty-valued parameters.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}
