use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::Deserialize;
use std::net::{AddrParseError, IpAddr};
use thiserror::Error as ThisError;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;

pub(crate) type Result<T> = ::std::result::Result<T, Error>;

/// A client for the public address echo service
#[derive(Debug)]
pub struct Echo {
    client: Client,
    url: Url,
}

impl Echo {
    /// Build a client for the configured echo endpoint
    pub fn new(config: &Config) -> Result<Echo> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Echo {
            client,
            url: config.echo_endpoint.clone(),
        })
    }

    /// Ask the echo service for the caller's current public address
    #[instrument(level = "debug", skip(self), fields(url = %self.url))]
    pub async fn current(&self) -> Result<IpAddr> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Http {
                canonical: status.canonical_reason().map(String::from).unwrap_or_default(),
                status: status.as_u16(),
            });
        }

        let body: AddressResponse = response.json().await?;
        let address = body.ip.parse()?;
        debug!(address = %address, "fetched current address");

        Ok(address)
    }
}

#[derive(Debug, Deserialize)]
struct AddressResponse {
    ip: String,
}

/// The possible errors raised by the echo client
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{canonical} ({status})")]
    Http { canonical: String, status: u16 },
    #[error("response was not an IP address")]
    Malformed(#[from] AddrParseError),
    #[error("failed to send request")]
    RequestError(#[from] ReqwestError),
}
