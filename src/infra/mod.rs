//! Concrete flight sources.
//!
//! [`AirportApiClient`] queries the airport's schedule API.
//! [`LocalSource`] replays a saved payload from disk or a plain URL.

pub mod airport_api;
pub mod local;

pub use airport_api::AirportApiClient;
pub use local::LocalSource;
