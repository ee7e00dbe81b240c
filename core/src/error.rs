//! Error types for the IP2C lookup client.
//!
//! # Design
//! The two outcomes the service reports in-band (`WrongInput` and `Unknown`)
//! get dedicated unit variants so callers can `match` on them instead of
//! comparing message text. Every other way a response line can be malformed
//! lands in `FormatError`, which keeps the offending value and the original
//! line for diagnostics. Transport and stream failures are carried through
//! untouched so their messages reach the caller verbatim.

use std::fmt;
use std::io;

/// Boxed error produced by an `HttpClient` implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by every lookup operation.
#[derive(Debug)]
pub enum LookupError {
    /// The HTTP client failed to complete the request (connect, timeout, ...).
    Transport(BoxError),

    /// The service answered with a status other than the expected one.
    Status { expected: u16, found: u16 },

    /// Reading or decoding the response body failed.
    Stream(io::Error),

    /// Code `0`: the queried value has an invalid syntax.
    WrongInput,

    /// Code `2`: the queried value is valid but not assigned to a country.
    Unknown,

    /// The response line does not follow the `code;xx;xxx;name` format.
    Format(FormatError),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Transport(err) => write!(f, "{err}"),
            LookupError::Status { expected, found } => {
                write!(f, "Unexpected response. Expected {expected} but found {found}")
            }
            LookupError::Stream(err) => write!(f, "{err}"),
            LookupError::WrongInput => {
                write!(f, "ip2c: your request has not been processed due to invalid syntax")
            }
            LookupError::Unknown => write!(
                f,
                "ip2c: given ip/dec not found in database or not yet physically assigned to any country"
            ),
            LookupError::Format(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Transport(err) => Some(err.as_ref()),
            LookupError::Stream(err) => Some(err),
            LookupError::Format(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormatError> for LookupError {
    fn from(err: FormatError) -> Self {
        LookupError::Format(err)
    }
}

impl From<io::Error> for LookupError {
    fn from(err: io::Error) -> Self {
        LookupError::Stream(err)
    }
}

/// Structural problems found while validating a response line.
///
/// `text` is always the complete line as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The line did not split into exactly four `;`-separated segments.
    SegmentCount { found: usize, text: String },

    /// The first segment was not `0`, `1` or `2`.
    Code { found: String, text: String },

    /// The second segment was not two bytes long.
    TwoLetterCode { found: usize, text: String },

    /// The third segment was not three bytes long.
    ThreeLetterCode { found: usize, text: String },

    /// The fourth segment was empty after trimming.
    BlankName { text: String },
}

impl FormatError {
    /// The original response line that failed validation.
    pub fn text(&self) -> &str {
        match self {
            FormatError::SegmentCount { text, .. }
            | FormatError::Code { text, .. }
            | FormatError::TwoLetterCode { text, .. }
            | FormatError::ThreeLetterCode { text, .. }
            | FormatError::BlankName { text } => text,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::SegmentCount { found, text } => {
                write!(f, "Invalid format. Expected 4 segments but found {found}: \"{text}\"")
            }
            FormatError::Code { found, text } => write!(
                f,
                "Invalid format. Expected code of 0, 1, or 2 in 1st segment but found {found}: \"{text}\""
            ),
            FormatError::TwoLetterCode { found, text } => write!(
                f,
                "Invalid format. Expected 2 letter code in 2nd segment but found {found}: \"{text}\""
            ),
            FormatError::ThreeLetterCode { found, text } => write!(
                f,
                "Invalid format. Expected 3 letter code in 3rd segment but found {found}: \"{text}\""
            ),
            FormatError::BlankName { text } => write!(
                f,
                "Invalid format. Expected full name in 4th segment but found blank: \"{text}\""
            ),
        }
    }
}

impl std::error::Error for FormatError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn status_message_names_both_codes() {
        let err = LookupError::Status { expected: 200, found: 503 };
        assert_eq!(err.to_string(), "Unexpected response. Expected 200 but found 503");
    }

    #[test]
    fn stream_error_keeps_inner_message() {
        let err = LookupError::from(io::Error::other("broken pipe"));
        assert_eq!(err.to_string(), "broken pipe");
        assert!(err.source().is_some());
    }

    #[test]
    fn transport_error_keeps_inner_message() {
        let err = LookupError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn sentinels_have_no_source() {
        assert!(LookupError::WrongInput.source().is_none());
        assert!(LookupError::Unknown.source().is_none());
    }

    #[test]
    fn format_error_exposes_original_text() {
        let err = FormatError::BlankName { text: "1;CA;CAN; ".to_string() };
        assert_eq!(err.text(), "1;CA;CAN; ");
        let wrapped = LookupError::from(err.clone());
        assert_eq!(wrapped.to_string(), err.to_string());
    }
}
