mod basic;
mod client;
pub mod auth;

pub use auth::ApiKey;
pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::AcquisitionError;
use tracing::debug;

/// Longest upstream error body kept in an [`AcquisitionError::Status`].
pub const MAX_ERROR_BODY: usize = 512;

/// Cuts `body` to at most `max` bytes on a char boundary.
pub fn truncate_body(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut end = max;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push('…');
    }
    body
}

/// Issues a GET for `url` and returns the body of a successful response.
///
/// Non-2xx responses become [`AcquisitionError::Status`] carrying the start of the body.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(
    client: &C,
    url: reqwest::Url,
) -> Result<Vec<u8>, AcquisitionError> {
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let body = truncate_body(resp.text().await.unwrap_or_default(), MAX_ERROR_BODY);
        return Err(AcquisitionError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = resp.bytes().await?;
    debug!(bytes = bytes.len(), "Flight payload received");
    Ok(bytes.to_vec())
}
