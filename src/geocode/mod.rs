//! Geocode subsystem: address text to state and county FIPS via the
//! US Census geocoder.

pub mod census;
pub mod resolver;
pub mod types;

pub use resolver::{normalize_address, GeocodeResolver};
pub use types::{GeocodeError, GeocodeResult};
