mod client;
mod decode;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{ContentsQuery, GeocodeQuery, Query, ZipcodeQuery};
pub use self::types::{Coordinate, Datum, RawResponse};
