//! Local stand-in for the IP2C service.
//!
//! Answers `GET /?ip=..`, `GET /?dec=..` and `GET /self` with the service's
//! one-line `code;xx;xxx;name` format, backed by a small fixed country
//! table. `MockConfig` can force a status code, delay every answer, or
//! replace the body outright so clients can be tested against malformed and
//! slow responses.

use std::{net::Ipv4Addr, sync::Arc, time::Duration};

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use log::debug;
use serde::Deserialize;
use tokio::net::TcpListener;

pub use axum::http::StatusCode;

/// Behaviour switches applied to every route.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub status: StatusCode,
    pub delay: Duration,
    pub body_override: Option<String>,
    /// Address `/self` resolves, since every test client is on loopback.
    pub self_addr: Ipv4Addr,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            delay: Duration::ZERO,
            body_override: None,
            self_addr: Ipv4Addr::new(1, 1, 1, 1),
        }
    }
}

impl MockConfig {
    /// Answer every request with `body` and status 200.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body_override: Some(body.into()),
            ..Self::default()
        }
    }
}

struct Country {
    first: Ipv4Addr,
    last: Ipv4Addr,
    two_letter_code: &'static str,
    three_letter_code: &'static str,
    full_name: &'static str,
}

const COUNTRIES: &[Country] = &[
    Country {
        first: Ipv4Addr::new(1, 0, 0, 0),
        last: Ipv4Addr::new(1, 255, 255, 255),
        two_letter_code: "AU",
        three_letter_code: "AUS",
        full_name: "Australia",
    },
    Country {
        first: Ipv4Addr::new(8, 8, 8, 0),
        last: Ipv4Addr::new(8, 8, 8, 255),
        two_letter_code: "US",
        three_letter_code: "USA",
        full_name: "United States",
    },
    Country {
        first: Ipv4Addr::new(24, 48, 0, 0),
        last: Ipv4Addr::new(24, 48, 255, 255),
        two_letter_code: "CA",
        three_letter_code: "CAN",
        full_name: "Canada",
    },
    Country {
        first: Ipv4Addr::new(81, 2, 69, 0),
        last: Ipv4Addr::new(81, 2, 69, 255),
        two_letter_code: "GB",
        three_letter_code: "GBR",
        full_name: "United Kingdom",
    },
    Country {
        first: Ipv4Addr::new(133, 0, 0, 0),
        last: Ipv4Addr::new(133, 255, 255, 255),
        two_letter_code: "JP",
        three_letter_code: "JPN",
        full_name: "Japan",
    },
];

/// Response line for `addr`; `None` means the input did not parse.
pub fn answer(addr: Option<Ipv4Addr>) -> String {
    let Some(addr) = addr else {
        return "0;;;".to_string();
    };
    COUNTRIES
        .iter()
        .find(|c| c.first <= addr && addr <= c.last)
        .map(|c| format!("1;{};{};{}", c.two_letter_code, c.three_letter_code, c.full_name))
        .unwrap_or_else(|| "2;;;".to_string())
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub ip: Option<String>,
    pub dec: Option<String>,
}

impl LookupQuery {
    fn addr(&self) -> Option<Ipv4Addr> {
        match (&self.ip, &self.dec) {
            (Some(ip), _) => ip.parse().ok(),
            (None, Some(dec)) => dec.parse::<u32>().ok().map(Ipv4Addr::from),
            (None, None) => None,
        }
    }
}

type Config = Arc<MockConfig>;

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    Router::new()
        .route("/", get(lookup))
        .route("/self", get(lookup_self))
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

async fn lookup(State(config): State<Config>, Query(query): Query<LookupQuery>) -> (StatusCode, String) {
    debug!("lookup {query:?}");
    respond(&config, query.addr()).await
}

async fn lookup_self(State(config): State<Config>) -> (StatusCode, String) {
    debug!("lookup self as {}", config.self_addr);
    respond(&config, Some(config.self_addr)).await
}

async fn respond(config: &MockConfig, addr: Option<Ipv4Addr>) -> (StatusCode, String) {
    if !config.delay.is_zero() {
        tokio::time::sleep(config.delay).await;
    }
    let body = match &config.body_override {
        Some(body) => body.clone(),
        None => answer(addr),
    };
    (config.status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_known_address() {
        assert_eq!(answer(Some(Ipv4Addr::new(1, 1, 1, 1))), "1;AU;AUS;Australia");
        assert_eq!(answer(Some(Ipv4Addr::new(24, 48, 107, 2))), "1;CA;CAN;Canada");
    }

    #[test]
    fn answer_unassigned_address() {
        assert_eq!(answer(Some(Ipv4Addr::LOCALHOST)), "2;;;");
    }

    #[test]
    fn answer_unparsable_input() {
        assert_eq!(answer(None), "0;;;");
    }

    #[test]
    fn query_prefers_ip_over_dec() {
        let query = LookupQuery {
            ip: Some("8.8.8.8".to_string()),
            dec: Some("16843009".to_string()),
        };
        assert_eq!(query.addr(), Some(Ipv4Addr::new(8, 8, 8, 8)));
    }

    #[test]
    fn query_decimal_maps_to_address() {
        let query = LookupQuery {
            ip: None,
            dec: Some("16843009".to_string()),
        };
        assert_eq!(query.addr(), Some(Ipv4Addr::new(1, 1, 1, 1)));
    }

    #[test]
    fn query_rejects_garbage() {
        let query = LookupQuery {
            ip: Some("a.b.c.d".to_string()),
            dec: None,
        };
        assert_eq!(query.addr(), None);

        let query = LookupQuery {
            ip: None,
            dec: Some("4294967296".to_string()),
        };
        assert_eq!(query.addr(), None);
    }
}
