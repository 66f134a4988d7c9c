//! Trait for anything that can supply raw flight records for a query.

use crate::error::AcquisitionError;
use crate::flight::RawBatch;
use crate::query::FlightQuery;

/// Abstraction over the upstream schedule provider (API or scraped dump).
#[async_trait::async_trait]
pub trait FlightSource: Send + Sync {
    /// Short label recorded in report metadata, e.g. `"api"`.
    fn name(&self) -> &str;

    /// Fetches every raw record for the requested day, type and direction.
    async fn fetch_raw_flights(&self, query: &FlightQuery) -> Result<RawBatch, AcquisitionError>;
}
