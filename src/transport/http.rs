use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use super::{AsyncTransport, BlockingTransport, Request, Response, SessionOptions};
use crate::endpoint::Method;
use crate::error::{Error, Result};

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&format!("taskora-rs/{}", env!("CARGO_PKG_VERSION")))
            .unwrap_or(HeaderValue::from_static("taskora-rs")),
    );
    headers
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::Timeout(timeout)
    } else {
        // Keep the whole source chain; reqwest's top-level message hides the cause.
        let mut msg = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            msg.push_str(": ");
            msg.push_str(&cause.to_string());
            source = cause.source();
        }
        Error::Transport(msg)
    }
}

fn closed() -> Error {
    Error::Transport("session is not open".to_string())
}

#[derive(Debug)]
struct Session<C> {
    http: C,
    timeout: Duration,
}

/// Async transport backed by a pooled `reqwest::Client`.
///
/// The underlying client multiplexes connections, but the transport still
/// serves one request at a time per owner (see [`AsyncTransport`]).
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    session: Option<Session<reqwest::Client>>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AsyncTransport for ReqwestTransport {
    fn is_open(&self) -> bool {
        self.session.is_some()
    }

    fn open(&mut self, options: &SessionOptions) -> Result<()> {
        let mut builder = reqwest::Client::builder()
            .default_headers(default_headers())
            .timeout(options.timeout);

        if !options.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;
        self.session = Some(Session {
            http,
            timeout: options.timeout,
        });
        Ok(())
    }

    fn close(&mut self) {
        self.session = None;
    }

    async fn send(&mut self, request: &Request) -> Result<Response> {
        let session = self.session.as_ref().ok_or_else(closed)?;
        let builder = match request.method {
            Method::Get => session.http.get(&request.url),
            Method::Post => session.http.post(&request.url),
        };

        let resp = builder
            .query(&request.query)
            .send()
            .await
            .map_err(|e| transport_error(e, session.timeout))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| transport_error(e, session.timeout))?;

        Ok(Response { status, body })
    }
}

/// Blocking transport backed by `reqwest::blocking::Client`.
///
/// Must not be opened or dropped from inside an async runtime; use
/// [`ReqwestTransport`] there.
#[derive(Debug, Default)]
pub struct BlockingReqwestTransport {
    session: Option<Session<reqwest::blocking::Client>>,
}

impl BlockingReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlockingTransport for BlockingReqwestTransport {
    fn is_open(&self) -> bool {
        self.session.is_some()
    }

    fn open(&mut self, options: &SessionOptions) -> Result<()> {
        let mut builder = reqwest::blocking::Client::builder()
            .default_headers(default_headers())
            .timeout(options.timeout);

        if !options.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;
        self.session = Some(Session {
            http,
            timeout: options.timeout,
        });
        Ok(())
    }

    fn close(&mut self) {
        self.session = None;
    }

    fn send(&mut self, request: &Request) -> Result<Response> {
        let session = self.session.as_ref().ok_or_else(closed)?;
        let builder = match request.method {
            Method::Get => session.http.get(&request.url),
            Method::Post => session.http.post(&request.url),
        };

        let resp = builder
            .query(&request.query)
            .send()
            .map_err(|e| transport_error(e, session.timeout))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| transport_error(e, session.timeout))?;

        Ok(Response { status, body })
    }
}
