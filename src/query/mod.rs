mod common;
pub use self::common::Query;

mod geocode;
pub use self::geocode::GeocodeQuery;

mod zipcode;
pub use self::zipcode::ZipcodeQuery;

mod contents;
pub use self::contents::ContentsQuery;
