use async_trait::async_trait;
use dashboard_core::HttpConfig;

use crate::FetchError;

/// Status and undecoded body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The HTTP primitive the fetcher consumes.
/// Implementations report only `Transport` and `Timeout` errors; status
/// handling belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// On `wasm32` the browser owns timeouts and the user agent, so `config`
    /// only applies to native clients.
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        #[cfg(not(target_arch = "wasm32"))]
        let builder = {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = config.timeout() {
                builder = builder.timeout(timeout);
            }
            if let Some(user_agent) = &config.user_agent {
                builder = builder.user_agent(user_agent.clone());
            }
            builder
        };
        #[cfg(target_arch = "wasm32")]
        let builder = {
            let _ = config;
            reqwest::Client::builder()
        };

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(RawResponse { status, body })
    }
}
