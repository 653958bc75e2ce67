use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use tracing::{debug, instrument};
use url::Url;

use super::{
    error::{Error, Result},
    Record,
};
use crate::config::{Config, Target};

pub(crate) const NAME: &str = "lima_city";

// All API calls authenticate as the pseudo-user "api" with the account token
// as the password.
const USERNAME: &str = "api";

/// A client for the lima-city.de domain API
#[derive(Debug)]
pub struct LimaCity {
    auth: String,
    client: Client,
    url: Url,
}

impl LimaCity {
    /// Build a client for the configured endpoint and token
    pub fn new(config: &Config) -> Result<LimaCity> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(LimaCity {
            auth: config.auth.clone(),
            client,
            url: config.provider_endpoint.clone(),
        })
    }

    /// Fetch the published record matching the target
    #[instrument(level = "debug", skip(self))]
    pub async fn record(&self, target: &Target) -> Result<Record> {
        let response = self
            .client
            .get(format!(
                "{}usercp/domains/{}/records.json",
                self.url, target.domain
            ))
            .basic_auth(USERNAME, Some(&self.auth))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Status {
                code: status.as_u16(),
            });
        }

        let list: RecordList = response.json().await?;
        debug!(count = list.records.len(), "fetched domain records");

        list.records
            .into_iter()
            .find(|record| record.id == target.record)
            .ok_or(Error::MissingRecord {
                domain: target.domain,
                record: target.record,
            })
    }

    /// Publish a new address to the target's record
    #[instrument(level = "debug", skip(self))]
    pub async fn update(&self, target: &Target, address: IpAddr) -> Result<()> {
        let content = address.to_string();
        let response = self
            .client
            .put(format!(
                "{}usercp/domains/{}/records/{}",
                self.url, target.domain, target.record
            ))
            .basic_auth(USERNAME, Some(&self.auth))
            .json(&UpdateRequest::content(&content))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(Error::Status {
                code: status.as_u16(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecordList {
    records: Vec<Record>,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'u> {
    nameserver_record: NameserverRecord<'u>,
}

#[derive(Debug, Serialize)]
struct NameserverRecord<'u> {
    content: &'u str,
}

impl<'u> UpdateRequest<'u> {
    fn content(content: &'u str) -> UpdateRequest<'u> {
        UpdateRequest {
            nameserver_record: NameserverRecord { content },
        }
    }
}
