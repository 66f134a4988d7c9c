pub mod analyzers;
pub mod config;
pub mod error;
pub mod fetch;
pub mod flight;
pub mod infra;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod query;
pub mod services;
