mod geo;
pub use self::geo::{Coordinate, Datum};

mod response;
pub use self::response::RawResponse;
