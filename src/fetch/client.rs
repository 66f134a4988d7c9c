use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes prepared requests against an upstream flight source.
///
/// Wrappers such as [`super::ApiKey`] decorate another client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
