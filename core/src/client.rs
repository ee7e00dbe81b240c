//! Lookup client for the IP2C service.
//!
//! # Design
//! `Ip2cClient` holds only its `Options` and carries no mutable state between
//! calls. Each lookup is split the way a host-does-IO client would split it:
//! a `build_*` method produces an `HttpRequest`, `parse_response` consumes an
//! `HttpResponse`, and `execute` joins the two through the injected
//! `HttpClient`. Hosts that do their own networking (the FFI layer) can call
//! the halves directly.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use log::debug;

use crate::error::LookupError;
use crate::http::{identity_reader, HttpClient, HttpRequest, HttpResponse, ReaderFn, UreqClient};
use crate::parse::parse_country_info;
use crate::types::CountryInfo;

/// Production endpoint of the service.
pub const DEFAULT_BASE_URL: &str = "https://ip2c.org";

const EXPECTED_STATUS: u16 = 200;

/// The three lookups the service offers.
///
/// Implemented by `Ip2cClient` and by `testing::StaticLookup`, so code that
/// takes a `&dyn Lookup` can be exercised without network access.
pub trait Lookup: Send + Sync {
    /// Resolve a dotted-quad address. The string is sent as given; the
    /// service reports bad syntax as `LookupError::WrongInput`.
    fn lookup_ipv4(&self, ip: &str) -> Result<CountryInfo, LookupError>;

    /// Resolve an address given as its 32-bit decimal value.
    fn lookup_decimal(&self, dec: u32) -> Result<CountryInfo, LookupError>;

    /// Resolve the address the request arrives from.
    fn lookup_self(&self) -> Result<CountryInfo, LookupError>;
}

/// Client configuration.
#[derive(Clone)]
pub struct Options {
    pub base_url: String,
    pub http_client: Arc<dyn HttpClient>,
    pub reader_fn: ReaderFn,
}

impl Options {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_client(mut self, http_client: impl HttpClient + 'static) -> Self {
        self.http_client = Arc::new(http_client);
        self
    }

    /// Install a hook that wraps the body reader before it is decoded.
    pub fn with_reader_fn<F>(mut self, reader_fn: F) -> Self
    where
        F: Fn(Box<dyn Read>) -> Box<dyn Read> + Send + Sync + 'static,
    {
        self.reader_fn = Arc::new(reader_fn);
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: Arc::new(UreqClient::new()),
            reader_fn: identity_reader(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Synchronous, stateless client for the IP2C service.
#[derive(Debug, Clone)]
pub struct Ip2cClient {
    opts: Options,
}

impl Ip2cClient {
    /// A client for the production endpoint with default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(mut opts: Options) -> Self {
        opts.base_url = opts.base_url.trim_end_matches('/').to_string();
        Self { opts }
    }

    pub fn base_url(&self) -> &str {
        &self.opts.base_url
    }

    pub fn build_lookup_ipv4(&self, ip: &str) -> HttpRequest {
        HttpRequest {
            url: format!("{}/?ip={ip}", self.opts.base_url),
        }
    }

    pub fn build_lookup_decimal(&self, dec: u32) -> HttpRequest {
        HttpRequest {
            url: format!("{}/?dec={dec}", self.opts.base_url),
        }
    }

    pub fn build_lookup_self(&self) -> HttpRequest {
        HttpRequest {
            url: format!("{}/self", self.opts.base_url),
        }
    }

    /// Check the status, read the (hooked) body and classify it.
    pub fn parse_response(&self, response: HttpResponse) -> Result<CountryInfo, LookupError> {
        if response.status != EXPECTED_STATUS {
            return Err(LookupError::Status {
                expected: EXPECTED_STATUS,
                found: response.status,
            });
        }

        let mut body = (self.opts.reader_fn)(response.body);
        let mut text = String::new();
        body.read_to_string(&mut text)?;
        debug!("ip2c response: {text:?}");

        parse_country_info(&text)
    }

    /// Send `request` through the configured `HttpClient` and parse the reply.
    pub fn execute(&self, request: HttpRequest) -> Result<CountryInfo, LookupError> {
        debug!("ip2c request: GET {}", request.url);
        let response = self
            .opts
            .http_client
            .get(&request)
            .map_err(LookupError::Transport)?;
        self.parse_response(response)
    }
}

impl Default for Ip2cClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookup for Ip2cClient {
    fn lookup_ipv4(&self, ip: &str) -> Result<CountryInfo, LookupError> {
        self.execute(self.build_lookup_ipv4(ip))
    }

    fn lookup_decimal(&self, dec: u32) -> Result<CountryInfo, LookupError> {
        self.execute(self.build_lookup_decimal(dec))
    }

    fn lookup_self(&self) -> Result<CountryInfo, LookupError> {
        self.execute(self.build_lookup_self())
    }
}
