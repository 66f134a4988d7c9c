pub mod flight_source;

pub use flight_source::FlightSource;
