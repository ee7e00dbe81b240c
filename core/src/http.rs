//! HTTP transport seam for the lookup client.
//!
//! # Design
//! Requests are plain data (`HttpRequest`) so the client can hand them to a
//! host that does its own I/O, as the FFI layer does. Responses carry the
//! body as a reader instead of a `String`: the client runs it through the
//! configured `ReaderFn` before decoding, which is where tests inject read
//! failures.
//!
//! `HttpClient` is the only capability the client needs from the network.
//! `UreqClient` is the default; anything else (a fake, a proxy-aware agent)
//! can be injected through `Options`.

use std::fmt;
use std::io::{Cursor, Read};
use std::sync::Arc;
use std::time::Duration;

use log::trace;

use crate::error::BoxError;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
}

/// An HTTP response whose body has not been read yet.
pub struct HttpResponse {
    pub status: u16,
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    /// Wrap an already-received body.
    pub fn from_text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Box::new(Cursor::new(body.into().into_bytes())),
        }
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Performs a single GET.
///
/// Implementations must return non-2xx responses as `Ok` so the client can
/// classify the status itself. Timeouts are the implementation's concern.
pub trait HttpClient: Send + Sync {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError>;
}

/// Hook applied to the raw body stream before it is decoded.
pub type ReaderFn = Arc<dyn Fn(Box<dyn Read>) -> Box<dyn Read> + Send + Sync>;

/// The default `ReaderFn`: hands the body through unchanged.
pub fn identity_reader() -> ReaderFn {
    Arc::new(|body: Box<dyn Read>| body)
}

/// `HttpClient` backed by a blocking `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    /// An agent with no timeout.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// An agent that gives up once `timeout` has elapsed for the whole call.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for UreqClient {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        let response = self.agent.get(&request.url).call()?;
        let status = response.status().as_u16();
        trace!("GET {} -> {status}", request.url);
        Ok(HttpResponse {
            status,
            body: Box::new(response.into_body().into_reader()),
        })
    }
}
