//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String` and explicit enum discriminants.
//! Conversion functions live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use ip2c_core::{CountryInfo, LookupError};

/// Opaque handle to an `Ip2cClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiIp2cClient {
    pub(crate) inner: ip2c_core::Ip2cClient,
}

/// Copy `s` into a heap C string, dropping interior NUL bytes.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', "")).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// A GET request described as C-compatible plain data.
///
/// Built by `ip2c_build_*` functions. The C caller performs the GET and
/// passes the response back through `ip2c_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: ip2c_core::HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiHttpRequest {
            url: to_c_string(&req.url),
        }))
    }
}

/// An HTTP response described as C-compatible plain data.
///
/// Constructed by the C caller; the FFI layer reads but does not free it.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiLookupResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Transport = 1,
    Status = 2,
    Stream = 3,
    WrongInput = 4,
    Unknown = 5,
    Format = 6,
    Panic = 7,
    NullArg = 8,
    InvalidArg = 9,
}

/// Country information exposed to C.
#[repr(C)]
pub struct FfiCountryInfo {
    pub two_letter_code: *mut c_char,
    pub three_letter_code: *mut c_char,
    pub full_name: *mut c_char,
}

/// Result envelope for every lookup and parse operation.
///
/// On success `error_code` is `Ok`, `error_message` is null and `country`
/// points to the resolved country. On failure `error_code` names the
/// category, `error_message` is a human-readable C string and `country` is
/// null. `http_status` is set only for `Status` errors.
#[repr(C)]
pub struct FfiLookupResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub country: *mut FfiCountryInfo,
}

impl FfiLookupResult {
    pub(crate) fn from_core(result: Result<CountryInfo, LookupError>) -> *mut Self {
        match result {
            Ok(country) => Self::ok(country),
            Err(e) => Self::from_error(e),
        }
    }

    /// Build a success result carrying an `FfiCountryInfo`.
    pub(crate) fn ok(country: CountryInfo) -> *mut Self {
        let ffi_country = Box::new(FfiCountryInfo {
            two_letter_code: to_c_string(country.two_letter_code()),
            three_letter_code: to_c_string(country.three_letter_code()),
            full_name: to_c_string(country.full_name()),
        });
        Box::into_raw(Box::new(FfiLookupResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            country: Box::into_raw(ffi_country),
        }))
    }

    /// Build an error result from a `LookupError`.
    pub(crate) fn from_error(err: LookupError) -> *mut Self {
        let (error_code, http_status) = match &err {
            LookupError::Transport(_) => (FfiErrorCode::Transport, 0),
            LookupError::Status { found, .. } => (FfiErrorCode::Status, *found),
            LookupError::Stream(_) => (FfiErrorCode::Stream, 0),
            LookupError::WrongInput => (FfiErrorCode::WrongInput, 0),
            LookupError::Unknown => (FfiErrorCode::Unknown, 0),
            LookupError::Format(_) => (FfiErrorCode::Format, 0),
        };
        Self::error(error_code, http_status, &err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, 0, &format!("null argument: {name}"))
    }

    /// Build an error result for an argument that is not valid UTF-8.
    pub(crate) fn invalid_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::InvalidArg, 0, &format!("invalid UTF-8 in argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, 0, msg)
    }

    fn error(error_code: FfiErrorCode, http_status: u16, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiLookupResult {
            error_code,
            error_message: to_c_string(msg),
            http_status,
            country: std::ptr::null_mut(),
        }))
    }
}
