//! Parcel Link: resolve a US street address to the county (or state)
//! property-record search page for that address.
//!
//! `geocode` turns address text into state + county FIPS through the US
//! Census geocoder; `registry` maps that jurisdiction to a URL; `link`
//! composes the two behind the `/api/link` endpoint served by `server`.

pub mod config;
pub mod fips;
pub mod geocode;
pub mod http;
pub mod link;
pub mod registry;
pub mod server;
pub mod smoke;
