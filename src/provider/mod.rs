use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use std::net::IpAddr;

use crate::config::{Config, Target};

mod error;
mod lima_city;

pub use error::Error;
use error::Result;
pub use lima_city::LimaCity;

/// The supported DNS providers
#[derive(Debug)]
pub enum Provider {
    LimaCity(LimaCity),
}

impl Provider {
    /// Select and build a provider from its configured name
    pub fn from_config(config: &Config) -> Result<Provider> {
        match config.provider.as_str() {
            lima_city::NAME => Ok(Provider::LimaCity(LimaCity::new(config)?)),
            name => Err(Error::UnknownProvider(name.to_owned())),
        }
    }

    /// A friendly name for the provider
    pub fn name(&self) -> &'static str {
        match self {
            Self::LimaCity(_) => lima_city::NAME,
        }
    }

    /// Fetch the currently published record for a target
    pub async fn record(&self, target: &Target) -> Result<Record> {
        match self {
            Self::LimaCity(client) => client.record(target).await,
        }
    }

    /// Publish a new address to a target's record
    pub async fn update(&self, target: &Target, address: IpAddr) -> Result<()> {
        match self {
            Self::LimaCity(client) => client.update(target, address).await,
        }
    }
}

/// A DNS record as published by a provider
///
/// Depending on the API generation, record ids arrive as JSON numbers or
/// strings; both forms decode to the numeric id.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct Record {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: u64,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::{Error, Provider};
    use crate::config::{Config, Target};
    use std::time::Duration;
    use url::Url;

    fn config(provider: &str) -> Config {
        Config {
            provider: provider.into(),
            auth: "secret".into(),
            targets: vec![Target {
                domain: 123,
                record: 456,
            }],
            interval: Duration::from_secs(60),
            timeout: Duration::from_secs(5),
            provider_endpoint: Url::parse("https://www.lima-city.de/").expect("invalid URL"),
            echo_endpoint: Url::parse("https://api64.ipify.org/?format=json")
                .expect("invalid URL"),
            sentry: None,
        }
    }

    #[test]
    fn from_config_builds_known_provider() {
        let provider =
            Provider::from_config(&config("lima_city")).expect("failed to build provider");

        assert!(matches!(provider, Provider::LimaCity(_)));
        assert_eq!("lima_city", provider.name());
    }

    #[test]
    fn from_config_rejects_unknown_names() {
        let error = Provider::from_config(&config("route53")).expect_err("expected a failure");

        assert!(matches!(error, Error::UnknownProvider(name) if name == "route53"));
    }

    #[test]
    fn record_ids_decode_from_numbers_and_strings() {
        let records: Vec<super::Record> = serde_json::from_str(
            r#"[{ "id": 42, "content": "1.2.3.4" }, { "id": "42", "content": "1.2.3.4" }]"#,
        )
        .expect("failed to deserialize");

        assert_eq!(42, records[0].id);
        assert_eq!(42, records[1].id);
    }
}
