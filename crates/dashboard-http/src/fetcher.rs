use std::future::Future;
use std::sync::Arc;

use dashboard_core::HttpConfig;
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use tokio::task::JoinHandle;

use crate::transport::{ReqwestTransport, Transport};
use crate::FetchError;

/// How the response body should be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Raw,
    Json,
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Raw(String),
    Json(Value),
}

impl Body {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Raw(text) => Some(text),
            Body::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Raw(_) => None,
        }
    }
}

/// Issues single GET requests; no retry, no cancellation.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetcher over a reqwest client built from `config`.
    pub fn from_config(config: &HttpConfig) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    /// GET `url`, decoding the body as `format`.
    ///
    /// Status 200 gives `Ok(body)`; any other status gives
    /// [`FetchError::Status`] with the body still attached.
    pub async fn fetch(&self, url: &str, format: ResponseFormat) -> Result<Body, FetchError> {
        tracing::info!("Fetching {}", url);

        let response = self.transport.get(url).await?;
        let ok = response.status == 200;
        let body = decode(response.body, format, ok)?;

        if ok {
            Ok(body)
        } else {
            tracing::warn!("GET {} returned status {}", url, response.status);
            Err(FetchError::Status {
                status: response.status,
                body,
            })
        }
    }

    /// GET `url` and parse the body as JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        match self.fetch(url, ResponseFormat::Json).await? {
            Body::Json(value) => Ok(value),
            Body::Raw(text) => Ok(Value::String(text)),
        }
    }
}

/// A 200 body that fails to parse is an error; other statuses fall back to
/// `null` so the status still reaches the caller.
fn decode(bytes: Vec<u8>, format: ResponseFormat, ok: bool) -> Result<Body, FetchError> {
    match format {
        ResponseFormat::Raw => Ok(Body::Raw(String::from_utf8_lossy(&bytes).into_owned())),
        ResponseFormat::Json => match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Body::Json(value)),
            Err(e) if ok => Err(FetchError::Decode(e.to_string())),
            Err(_) => Ok(Body::Json(Value::Null)),
        },
    }
}

/// Spawn a request and hand its outcome to `callback` once it completes.
///
/// The callback runs on the runtime's worker threads, so it must be `Send`.
/// Callbacks that touch document nodes use [`fetch_local_with_callback`].
#[cfg(not(target_arch = "wasm32"))]
pub fn fetch_with_callback<F>(
    fetcher: &Fetcher,
    url: impl Into<String>,
    format: ResponseFormat,
    callback: F,
) -> JoinHandle<()>
where
    F: FnOnce(Result<Body, FetchError>) + Send + 'static,
{
    let fetcher = fetcher.clone();
    let url = url.into();

    tokio::spawn(async move {
        let result = fetcher.fetch(&url, format).await;
        callback(result);
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn fetch_json_with_callback<F>(
    fetcher: &Fetcher,
    url: impl Into<String>,
    callback: F,
) -> JoinHandle<()>
where
    F: FnOnce(Result<Body, FetchError>) + Send + 'static,
{
    fetch_with_callback(fetcher, url, ResponseFormat::Json, callback)
}

/// Handle of a task started by [`fetch_local_with_callback`].
#[cfg(not(target_arch = "wasm32"))]
pub type LocalHandle = JoinHandle<()>;
/// Handle of a task started by [`fetch_local_with_callback`].
#[cfg(target_arch = "wasm32")]
pub type LocalHandle = ();

/// Spawn a request on the current thread and hand its outcome to `callback`.
///
/// The callback may hold `!Send` state such as document nodes. Natively this
/// must be called from within a [`tokio::task::LocalSet`]; on `wasm32` the
/// task runs on the browser's event loop.
pub fn fetch_local_with_callback<F>(
    fetcher: &Fetcher,
    url: impl Into<String>,
    format: ResponseFormat,
    callback: F,
) -> LocalHandle
where
    F: FnOnce(Result<Body, FetchError>) + 'static,
{
    let fetcher = fetcher.clone();
    let url = url.into();

    spawn_local(async move {
        let result = fetcher.fetch(&url, format).await;
        callback(result);
    })
}

pub fn fetch_json_local_with_callback<F>(
    fetcher: &Fetcher,
    url: impl Into<String>,
    callback: F,
) -> LocalHandle
where
    F: FnOnce(Result<Body, FetchError>) + 'static,
{
    fetch_local_with_callback(fetcher, url, ResponseFormat::Json, callback)
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_local<T>(task: T) -> LocalHandle
where
    T: Future<Output = ()> + 'static,
{
    tokio::task::spawn_local(task)
}

#[cfg(target_arch = "wasm32")]
fn spawn_local<T>(task: T) -> LocalHandle
where
    T: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(task)
}
