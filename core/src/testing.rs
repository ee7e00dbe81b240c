//! Canned `Lookup` implementations for downstream unit tests.
//!
//! Unit tests usually run on localhost or in a container, where a real
//! lookup of the caller's address is meaningless. `StaticLookup` answers
//! every call with the same country, or the same error, without touching
//! the network.

use std::fmt;

use crate::client::Lookup;
use crate::error::LookupError;
use crate::types::CountryInfo;

/// Message of the error returned by `StaticLookup::failing`.
pub const TESTING_ERROR_MESSAGE: &str = "error from IP2C for testing";

enum Outcome {
    Country(CountryInfo),
    // `LookupError` is not `Clone`, so a fresh error is built per call.
    Error(fn() -> LookupError),
}

/// A `Lookup` that ignores its input and returns a fixed outcome.
pub struct StaticLookup {
    outcome: Outcome,
}

impl StaticLookup {
    /// Always resolves to Canada (`CA`, `CAN`, `Canada`).
    pub fn new() -> Self {
        Self::with_country(canada())
    }

    pub fn with_country(country: CountryInfo) -> Self {
        Self {
            outcome: Outcome::Country(country),
        }
    }

    /// Always fails with a transport error carrying `TESTING_ERROR_MESSAGE`.
    pub fn failing() -> Self {
        Self::failing_with(testing_error)
    }

    /// Always fails with the error built by `make_error`.
    pub fn failing_with(make_error: fn() -> LookupError) -> Self {
        Self {
            outcome: Outcome::Error(make_error),
        }
    }

    fn answer(&self) -> Result<CountryInfo, LookupError> {
        match &self.outcome {
            Outcome::Country(country) => Ok(country.clone()),
            Outcome::Error(make_error) => Err(make_error()),
        }
    }
}

impl Default for StaticLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StaticLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Country(country) => f.debug_tuple("StaticLookup").field(country).finish(),
            Outcome::Error(make_error) => f.debug_tuple("StaticLookup").field(&make_error()).finish(),
        }
    }
}

impl Lookup for StaticLookup {
    fn lookup_ipv4(&self, _ip: &str) -> Result<CountryInfo, LookupError> {
        self.answer()
    }

    fn lookup_decimal(&self, _dec: u32) -> Result<CountryInfo, LookupError> {
        self.answer()
    }

    fn lookup_self(&self) -> Result<CountryInfo, LookupError> {
        self.answer()
    }
}

fn canada() -> CountryInfo {
    match CountryInfo::new("CA", "CAN", "Canada") {
        Ok(country) => country,
        Err(err) => unreachable!("built-in country is valid: {err}"),
    }
}

fn testing_error() -> LookupError {
    LookupError::Transport(TESTING_ERROR_MESSAGE.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_answers_canada_for_every_lookup() {
        let lookup = StaticLookup::new();
        for result in [
            lookup.lookup_ipv4("8.8.8.8"),
            lookup.lookup_decimal(134744072),
            lookup.lookup_self(),
        ] {
            let info = result.unwrap();
            assert_eq!(info.two_letter_code(), "CA");
            assert_eq!(info.three_letter_code(), "CAN");
            assert_eq!(info.full_name(), "Canada");
        }
    }

    #[test]
    fn custom_country_is_returned() {
        let country = CountryInfo::new("JP", "JPN", "Japan").unwrap();
        let lookup = StaticLookup::with_country(country.clone());
        assert_eq!(lookup.lookup_self().unwrap(), country);
    }

    #[test]
    fn failing_returns_testing_error() {
        let lookup = StaticLookup::failing();
        let err = lookup.lookup_ipv4("1.1.1.1").unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
        assert_eq!(err.to_string(), TESTING_ERROR_MESSAGE);
    }

    #[test]
    fn failing_with_custom_sentinel() {
        let lookup = StaticLookup::failing_with(|| LookupError::Unknown);
        assert!(matches!(lookup.lookup_decimal(1), Err(LookupError::Unknown)));
        assert!(matches!(lookup.lookup_self(), Err(LookupError::Unknown)));
    }

    #[test]
    fn works_behind_dyn_lookup() {
        fn country_name(lookup: &dyn Lookup) -> String {
            lookup
                .lookup_self()
                .map(|c| c.full_name().to_string())
                .unwrap_or_else(|e| e.to_string())
        }
        assert_eq!(country_name(&StaticLookup::new()), "Canada");
        assert_eq!(country_name(&StaticLookup::failing()), TESTING_ERROR_MESSAGE);
    }
}
