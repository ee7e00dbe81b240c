//! Synchronous client for the IP2C IP-to-country service.
//!
//! # Overview
//! Resolves an IPv4 address (dotted quad, 32-bit decimal, or the caller's
//! own address) to a `CountryInfo` by issuing one GET and classifying the
//! single `code;xx;xxx;name` line the service answers with.
//!
//! # Design
//! - `Ip2cClient` is stateless; the HTTP client and the body hook are
//!   injected through `Options`.
//! - Every lookup splits into `build_*` (produces a request) and
//!   `parse_response` (consumes a response), so hosts may do the I/O.
//! - `parse_country_info` is pure and holds the whole wire contract.
//! - `LookupError` is a closed enum; the service's in-band outcomes are the
//!   `WrongInput` and `Unknown` variants.
//! - `testing::StaticLookup` implements the same `Lookup` trait for
//!   downstream tests.

pub mod client;
pub mod error;
pub mod http;
pub mod parse;
pub mod testing;
pub mod types;

pub use client::{Ip2cClient, Lookup, Options, DEFAULT_BASE_URL};
pub use error::{BoxError, FormatError, LookupError};
pub use http::{identity_reader, HttpClient, HttpRequest, HttpResponse, ReaderFn, UreqClient};
pub use parse::parse_country_info;
pub use types::CountryInfo;
