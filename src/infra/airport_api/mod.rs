mod client;

pub use client::AirportApiClient;
