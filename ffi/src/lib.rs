//! C-ABI wrapper around `ip2c-core`.
//!
//! # Overview
//! Exposes the IP2C lookup client through `extern "C"` functions. Hosts can
//! either let the library perform the GET (`ip2c_lookup_*`) or do the I/O
//! themselves: `ip2c_build_*` hands out the request URL and
//! `ip2c_parse_response` classifies the status and body they received.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A single `FfiLookupResult` envelope conveys both the resolved country
//!   and every error kind.
//! - The C caller owns all returned pointers and must call the matching
//!   `ip2c_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use ip2c_core::{HttpResponse, Ip2cClient, Lookup, Options, UreqClient};

use types::*;

/// Read a borrowed C string. `None` if it is not valid UTF-8.
fn c_str<'a>(s: *const c_char) -> Option<&'a str> {
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

fn new_client(base_url: *const c_char, timeout_ms: u64) -> *mut FfiIp2cClient {
    let mut opts = Options::default();
    if !base_url.is_null() {
        match c_str(base_url) {
            Some(url) => opts = opts.with_base_url(url),
            None => return std::ptr::null_mut(),
        }
    }
    if timeout_ms > 0 {
        opts = opts.with_http_client(UreqClient::with_timeout(Duration::from_millis(timeout_ms)));
    }
    let client = Ip2cClient::with_options(opts);
    Box::into_raw(Box::new(FfiIp2cClient { inner: client }))
}

/// Create a new client bound to `base_url`, or to the production endpoint
/// when `base_url` is null.
///
/// Returns null if `base_url` is not valid UTF-8 or if an internal panic
/// occurs. The caller must free the returned pointer with `ip2c_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_client_new(base_url: *const c_char) -> *mut FfiIp2cClient {
    catch_unwind(|| new_client(base_url, 0)).unwrap_or(std::ptr::null_mut())
}

/// Like `ip2c_client_new`, but every network lookup gives up after
/// `timeout_ms` milliseconds. A timeout of 0 means no timeout.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_client_new_with_timeout(
    base_url: *const c_char,
    timeout_ms: u64,
) -> *mut FfiIp2cClient {
    catch_unwind(|| new_client(base_url, timeout_ms)).unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `ip2c_client_new*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_client_free(client: *mut FfiIp2cClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the request for an IPv4 lookup.
///
/// Returns null if `client` or `ip` is null, or `ip` is not valid UTF-8.
/// The caller must free the returned pointer with `ip2c_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_build_lookup_ipv4(
    client: *const FfiIp2cClient,
    ip: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() || ip.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match c_str(ip) {
            Some(ip) => FfiHttpRequest::from_core(client.inner.build_lookup_ipv4(ip)),
            None => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request for a decimal lookup.
///
/// Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_build_lookup_decimal(
    client: *const FfiIp2cClient,
    dec: u32,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_lookup_decimal(dec))
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request for resolving the caller's own address.
///
/// Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_build_lookup_self(client: *const FfiIp2cClient) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_lookup_self())
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response
// ---------------------------------------------------------------------------

/// Classify a response the host received for any `ip2c_build_*` request.
///
/// A null `body` is treated as an empty body. Bodies that are not valid
/// UTF-8 yield a `Stream` error.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_parse_response(
    client: *const FfiIp2cClient,
    response: *const FfiHttpResponse,
) -> *mut FfiLookupResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiLookupResult::null_arg("client");
        }
        if response.is_null() {
            return FfiLookupResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            Vec::new()
        } else {
            unsafe { CStr::from_ptr(resp.body) }.to_bytes().to_vec()
        };
        let core_resp = HttpResponse {
            status: resp.status,
            body: Box::new(std::io::Cursor::new(body)),
        };
        FfiLookupResult::from_core(client.inner.parse_response(core_resp))
    }))
    .unwrap_or_else(|_| FfiLookupResult::panic("panic in ip2c_parse_response"))
}

// ---------------------------------------------------------------------------
// Network lookups
// ---------------------------------------------------------------------------

/// Resolve a dotted-quad address over the network.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_lookup_ipv4(
    client: *const FfiIp2cClient,
    ip: *const c_char,
) -> *mut FfiLookupResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiLookupResult::null_arg("client");
        }
        if ip.is_null() {
            return FfiLookupResult::null_arg("ip");
        }
        let client = unsafe { &*client };
        match c_str(ip) {
            Some(ip) => FfiLookupResult::from_core(client.inner.lookup_ipv4(ip)),
            None => FfiLookupResult::invalid_arg("ip"),
        }
    }))
    .unwrap_or_else(|_| FfiLookupResult::panic("panic in ip2c_lookup_ipv4"))
}

/// Resolve an address given as its 32-bit decimal value over the network.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_lookup_decimal(
    client: *const FfiIp2cClient,
    dec: u32,
) -> *mut FfiLookupResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiLookupResult::null_arg("client");
        }
        let client = unsafe { &*client };
        FfiLookupResult::from_core(client.inner.lookup_decimal(dec))
    }))
    .unwrap_or_else(|_| FfiLookupResult::panic("panic in ip2c_lookup_decimal"))
}

/// Resolve the caller's own address over the network.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_lookup_self(client: *const FfiIp2cClient) -> *mut FfiLookupResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiLookupResult::null_arg("client");
        }
        let client = unsafe { &*client };
        FfiLookupResult::from_core(client.inner.lookup_self())
    }))
    .unwrap_or_else(|_| FfiLookupResult::panic("panic in ip2c_lookup_self"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `ip2c_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
    });
}

/// Free an `FfiLookupResult` returned by any lookup or parse function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_free_result(result: *mut FfiLookupResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.country.is_null() {
            let country = unsafe { Box::from_raw(result.country) };
            for field in [country.two_letter_code, country.three_letter_code, country.full_name] {
                if !field.is_null() {
                    drop(unsafe { CString::from_raw(field) });
                }
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn ip2c_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
