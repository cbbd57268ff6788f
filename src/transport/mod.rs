//! HTTP transport seam.
//!
//! The clients only need a session they can open, close, and push one request
//! through. [`ReqwestTransport`] and [`BlockingReqwestTransport`] are the
//! production implementations; anything else implementing the traits (a
//! recording stub in tests, a proxying transport) plugs into the same clients.

mod http;
#[cfg(test)]
pub(crate) mod stub;

pub use http::{BlockingReqwestTransport, ReqwestTransport};

use std::time::Duration;

use async_trait::async_trait;

use crate::config::DEFAULT_TIMEOUT;
use crate::endpoint::Method;
use crate::error::Result;

/// Settings applied when a session is (re)opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub timeout: Duration,
    /// Verify TLS certificates.
    pub verify: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            verify: true,
        }
    }
}

/// A fully assembled request. `query` already contains `apikey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Non-blocking transport. Calls suspend the task, never the thread.
///
/// A transport owns at most one session. `send` takes `&mut self`, so a single
/// client never has two requests in flight on the same session; issue
/// concurrent calls through separate clients.
#[async_trait]
pub trait AsyncTransport: Send {
    fn is_open(&self) -> bool;

    /// Opens a fresh session, replacing any existing one.
    fn open(&mut self, options: &SessionOptions) -> Result<()>;

    /// Releases the session. Must be a no-op when nothing is open.
    fn close(&mut self);

    async fn send(&mut self, request: &Request) -> Result<Response>;
}

/// Blocking transport. `send` holds the calling thread for the whole round trip.
pub trait BlockingTransport {
    fn is_open(&self) -> bool;

    /// Opens a fresh session, replacing any existing one.
    fn open(&mut self, options: &SessionOptions) -> Result<()>;

    /// Releases the session. Must be a no-op when nothing is open.
    fn close(&mut self);

    fn send(&mut self, request: &Request) -> Result<Response>;
}
