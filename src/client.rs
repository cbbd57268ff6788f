use log::{debug, warn};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use crate::config::{ClientConfig, load_config};
use crate::endpoint::{Endpoint, Method};
use crate::error::{Error, ErrorBody, Result};
use crate::service::Service;
use crate::transport::{
    AsyncTransport, BlockingReqwestTransport, BlockingTransport, ReqwestTransport, Request,
    Response, SessionOptions,
};
use crate::util::urljoin;

/// State shared by both client flavours: where to send requests and with which key.
#[derive(Clone)]
struct Core {
    url: String,
    key: String,
    options: SessionOptions,
}

impl Core {
    fn new(cfg: ClientConfig) -> Result<Self> {
        if cfg.key.trim().is_empty() {
            return Err(Error::Config("API key must not be empty".to_string()));
        }
        let url = cfg.url.trim();
        if url.is_empty() {
            return Err(Error::Config("base URL must not be empty".to_string()));
        }

        Ok(Self {
            url: url.to_string(),
            key: cfg.key,
            options: SessionOptions {
                timeout: cfg.timeout,
                verify: cfg.verify,
            },
        })
    }

    fn default_config<S: Service>(key: String) -> Result<ClientConfig> {
        let url = S::DEFAULT_BASE_URL.ok_or_else(|| {
            Error::Config(format!(
                "the {} service has no default base URL; use with_base_url",
                S::NAME
            ))
        })?;
        Ok(ClientConfig::new(url, key))
    }

    fn env_config<S: Service>() -> Result<ClientConfig> {
        load_config(S::URL_KEY, S::DEFAULT_BASE_URL, None, None)
            .map_err(|e| Error::Config(format!("{e:#}")))
    }

    fn endpoint_request(&self, endpoint: &Endpoint, args: &[&str]) -> Request {
        Request {
            method: endpoint.method,
            url: urljoin(&self.url, endpoint.path),
            query: endpoint.query(&self.key, args),
        }
    }

    fn raw_request(&self, method: Method, path: &str, params: &[(&str, &str)]) -> Request {
        let mut query = Vec::with_capacity(params.len() + 1);
        query.push(("apikey".to_string(), self.key.clone()));
        // The configured key always wins over a caller-supplied `apikey`.
        query.extend(
            params
                .iter()
                .filter(|(k, _)| *k != "apikey")
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        Request {
            method,
            url: urljoin(&self.url, path),
            query,
        }
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

/// Turns a completed round trip into the pass-through JSON value.
fn decode_response(request: &Request, response: Response) -> Result<Value> {
    if response.status != 200 {
        warn!(
            "{} {} failed with HTTP {}",
            request.method, request.url, response.status
        );
        return Err(Error::Status {
            status: response.status,
            body: ErrorBody::parse(response.body),
        });
    }

    serde_json::from_str(&response.body).map_err(|e| Error::Decode {
        status: response.status,
        reason: format!("{} (url={})", e, request.url),
    })
}

/// Non-blocking client for one Taskora service.
///
/// The session is opened lazily before the first request, reopened after
/// [`close`](Self::close), and released when the client is dropped. Methods
/// take `&mut self`: one instance runs one request at a time.
pub struct AsyncClient<S: Service, T: AsyncTransport = ReqwestTransport> {
    core: Core,
    transport: T,
    _service: PhantomData<fn() -> S>,
}

impl<S: Service> AsyncClient<S> {
    /// Client for the service's default base URL.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::from_config(Core::default_config::<S>(key.into())?)
    }

    pub fn with_base_url(key: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(url, key))
    }

    /// Creates a client from `TASKORA_*` environment variables and/or `.taskorarc`.
    pub fn from_env() -> Result<Self> {
        Self::from_config(Core::env_config::<S>()?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<S: Service, T: AsyncTransport> AsyncClient<S, T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self {
            core: Core::new(config)?,
            transport,
            _service: PhantomData,
        })
    }

    /// Sets the per-request timeout. An open session is closed so the next
    /// request picks the new value up.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.core.options.timeout = timeout;
        self.close();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.core.url
    }

    pub fn timeout(&self) -> Duration {
        self.core.options.timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Opens the session now instead of on the first request. No-op when already open.
    pub fn open(&mut self) -> Result<()> {
        if !self.transport.is_open() {
            debug!("opening {} session ({})", S::NAME, self.core.url);
            self.transport.open(&self.core.options)?;
        }
        Ok(())
    }

    /// Releases the session. Safe to call any number of times.
    pub fn close(&mut self) {
        if self.transport.is_open() {
            debug!("closing {} session", S::NAME);
            self.transport.close();
        }
    }

    /// GET `path` with `params` plus `apikey`, returning the decoded JSON body.
    pub async fn get(&mut self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let request = self.core.raw_request(Method::Get, path, params);
        self.execute(request).await
    }

    /// POST `path` with `params` plus `apikey` in the query string and no body.
    pub async fn post(&mut self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let request = self.core.raw_request(Method::Post, path, params);
        self.execute(request).await
    }

    pub(crate) async fn call(&mut self, endpoint: &Endpoint, args: &[&str]) -> Result<Value> {
        let request = self.core.endpoint_request(endpoint, args);
        self.execute(request).await
    }

    async fn execute(&mut self, request: Request) -> Result<Value> {
        self.open()?;
        debug!("{} {}", request.method, request.url);
        let response = self.transport.send(&request).await?;
        decode_response(&request, response)
    }
}

impl<S: Service, T: AsyncTransport> Drop for AsyncClient<S, T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<S: Service, T: AsyncTransport> fmt::Debug for AsyncClient<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncClient")
            .field("service", &S::NAME)
            .field("core", &self.core)
            .field("open", &self.transport.is_open())
            .finish()
    }
}

/// Blocking client for one Taskora service. Same contract as [`AsyncClient`],
/// except every call holds the calling thread until the round trip completes.
pub struct BlockingClient<S: Service, T: BlockingTransport = BlockingReqwestTransport> {
    core: Core,
    transport: T,
    _service: PhantomData<fn() -> S>,
}

impl<S: Service> BlockingClient<S> {
    /// Client for the service's default base URL.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::from_config(Core::default_config::<S>(key.into())?)
    }

    pub fn with_base_url(key: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(url, key))
    }

    /// Creates a client from `TASKORA_*` environment variables and/or `.taskorarc`.
    pub fn from_env() -> Result<Self> {
        Self::from_config(Core::env_config::<S>()?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, BlockingReqwestTransport::new())
    }
}

impl<S: Service, T: BlockingTransport> BlockingClient<S, T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self {
            core: Core::new(config)?,
            transport,
            _service: PhantomData,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.core.options.timeout = timeout;
        self.close();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.core.url
    }

    pub fn timeout(&self) -> Duration {
        self.core.options.timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    pub fn open(&mut self) -> Result<()> {
        if !self.transport.is_open() {
            debug!("opening {} session ({})", S::NAME, self.core.url);
            self.transport.open(&self.core.options)?;
        }
        Ok(())
    }

    pub fn close(&mut self) {
        if self.transport.is_open() {
            debug!("closing {} session", S::NAME);
            self.transport.close();
        }
    }

    pub fn get(&mut self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let request = self.core.raw_request(Method::Get, path, params);
        self.execute(request)
    }

    pub fn post(&mut self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let request = self.core.raw_request(Method::Post, path, params);
        self.execute(request)
    }

    pub(crate) fn call(&mut self, endpoint: &Endpoint, args: &[&str]) -> Result<Value> {
        let request = self.core.endpoint_request(endpoint, args);
        self.execute(request)
    }

    fn execute(&mut self, request: Request) -> Result<Value> {
        self.open()?;
        debug!("{} {}", request.method, request.url);
        let response = self.transport.send(&request)?;
        decode_response(&request, response)
    }
}

impl<S: Service, T: BlockingTransport> Drop for BlockingClient<S, T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<S: Service, T: BlockingTransport> fmt::Debug for BlockingClient<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingClient")
            .field("service", &S::NAME)
            .field("core", &self.core)
            .field("open", &self.transport.is_open())
            .finish()
    }
}
