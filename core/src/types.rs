//! Country information returned by a successful lookup.
//!
//! # Design
//! Fields are private so every `CountryInfo` in existence satisfies the same
//! constraints the response parser enforces: a two-byte code, a three-byte
//! code and a non-blank, trimmed name. Deserialization goes through the same
//! checks via `try_from`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Country metadata for a resolved address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCountryInfo")]
pub struct CountryInfo {
    two_letter_code: String,
    three_letter_code: String,
    full_name: String,
}

impl CountryInfo {
    /// Build a `CountryInfo`, applying the same field checks as the parser.
    ///
    /// `full_name` is trimmed before it is stored.
    pub fn new(
        two_letter_code: impl Into<String>,
        three_letter_code: impl Into<String>,
        full_name: impl AsRef<str>,
    ) -> Result<Self, FormatError> {
        let two_letter_code = two_letter_code.into();
        let three_letter_code = three_letter_code.into();
        let raw_name = full_name.as_ref();
        let text = || format!("1;{two_letter_code};{three_letter_code};{raw_name}");

        if two_letter_code.len() != 2 {
            return Err(FormatError::TwoLetterCode {
                found: two_letter_code.len(),
                text: text(),
            });
        }
        if three_letter_code.len() != 3 {
            return Err(FormatError::ThreeLetterCode {
                found: three_letter_code.len(),
                text: text(),
            });
        }
        let full_name = raw_name.trim();
        if full_name.is_empty() {
            return Err(FormatError::BlankName { text: text() });
        }

        Ok(Self {
            full_name: full_name.to_string(),
            two_letter_code,
            three_letter_code,
        })
    }

    /// ISO 3166 alpha-2 style code, e.g. `CA`.
    pub fn two_letter_code(&self) -> &str {
        &self.two_letter_code
    }

    /// ISO 3166 alpha-3 style code, e.g. `CAN`.
    pub fn three_letter_code(&self) -> &str {
        &self.three_letter_code
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

impl fmt::Display for CountryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.two_letter_code)
    }
}

#[derive(Deserialize)]
struct RawCountryInfo {
    two_letter_code: String,
    three_letter_code: String,
    full_name: String,
}

impl TryFrom<RawCountryInfo> for CountryInfo {
    type Error = FormatError;

    fn try_from(raw: RawCountryInfo) -> Result<Self, Self::Error> {
        CountryInfo::new(raw.two_letter_code, raw.three_letter_code, raw.full_name)
    }
}
