//! Asynchronous HTTP GET helper.
//!
//! A request resolves to `Ok(body)` on status 200 and to
//! [`FetchError::Status`] carrying the status code and the unmodified body
//! otherwise. Network failures and timeouts are reported too, so a callback
//! registered through [`fetch_local_with_callback`] always fires exactly
//! once. That variant keeps the callback on the current thread, where it can
//! update document nodes.

pub mod error;
pub mod fetcher;
pub mod transport;

pub use error::FetchError;
#[cfg(not(target_arch = "wasm32"))]
pub use fetcher::{fetch_json_with_callback, fetch_with_callback};
pub use fetcher::{
    fetch_json_local_with_callback, fetch_local_with_callback, Body, Fetcher, LocalHandle,
    ResponseFormat,
};
pub use transport::{RawResponse, ReqwestTransport, Transport};
