use anyhow::{ensure, Context, Result};
use std::{sync::Arc, time::Duration};
use url::Url;

use crate::args::Args;

/// Assemble the runtime configuration from the parsed arguments
pub fn load(args: &Args) -> Result<SharedConfig> {
    ensure!(args.interval > 0, "the check interval must be at least 1s");
    ensure!(args.timeout > 0, "the request timeout must be at least 1s");

    let targets = match &args.domain_data {
        Some(raw) => parse_targets(raw)?,
        None => {
            let domain = args.domain_id.context("a domain id is required")?;
            let record = args.record_id.context("a record id is required")?;
            vec![Target { domain, record }]
        }
    };

    Ok(Arc::new(Config {
        provider: args.provider.clone(),
        auth: args.auth.clone(),
        targets,
        interval: Duration::from_secs(args.interval),
        timeout: Duration::from_secs(args.timeout),
        provider_endpoint: args.provider_endpoint.clone(),
        echo_endpoint: args.echo_endpoint.clone(),
        sentry: args.sentry_dsn.clone(),
    }))
}

pub type SharedConfig = Arc<Config>;

#[derive(Debug)]
pub struct Config {
    pub provider: String,
    pub auth: String,
    pub targets: Vec<Target>,
    pub interval: Duration,
    pub timeout: Duration,
    pub provider_endpoint: Url,
    pub echo_endpoint: Url,
    pub sentry: Option<String>,
}

/// A single record within a domain to keep updated
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Target {
    pub domain: u64,
    pub record: u64,
}

/// Parse a target list of the form "<domain>:<record>[,<record>...][;<domain>:...]"
fn parse_targets(raw: &str) -> Result<Vec<Target>> {
    let mut targets = Vec::new();

    for group in raw.split(';').filter(|group| !group.is_empty()) {
        let (domain, records) = group
            .split_once(':')
            .with_context(|| format!("expected <domain>:<records> in {:?}", group))?;
        let domain = domain
            .parse()
            .with_context(|| format!("invalid domain id in {:?}", group))?;

        for record in records.split(',') {
            let record = record
                .parse()
                .with_context(|| format!("invalid record id in {:?}", group))?;
            targets.push(Target { domain, record });
        }
    }

    ensure!(!targets.is_empty(), "at least one record must be configured");
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::{load, parse_targets, Target};
    use crate::args::Args;
    use url::Url;

    fn args() -> Args {
        Args {
            domain_id: Some(123),
            record_id: Some(456),
            domain_data: None,
            provider: "lima_city".into(),
            auth: "secret".into(),
            interval: 60,
            timeout: 30,
            provider_endpoint: Url::parse("https://www.lima-city.de/").expect("invalid URL"),
            echo_endpoint: Url::parse("https://api64.ipify.org/?format=json")
                .expect("invalid URL"),
            log_level: None,
            sentry_dsn: None,
        }
    }

    #[test]
    fn load_single_target() {
        let config = load(&args()).expect("failed to load configuration");

        assert_eq!(
            vec![Target {
                domain: 123,
                record: 456
            }],
            config.targets
        );
        assert_eq!("lima_city", &config.provider);
        assert_eq!(60, config.interval.as_secs());
    }

    #[test]
    fn domain_data_takes_precedence() {
        let mut args = args();
        args.domain_data = Some("111:222".into());

        let config = load(&args).expect("failed to load configuration");
        assert_eq!(
            vec![Target {
                domain: 111,
                record: 222
            }],
            config.targets
        );
    }

    #[test]
    fn parse_tolerates_trailing_separator() {
        let targets = parse_targets("123:456;").expect("failed to parse targets");
        assert_eq!(
            vec![Target {
                domain: 123,
                record: 456
            }],
            targets
        );
    }

    #[test]
    fn parse_multiple_domains_and_records() {
        let targets = parse_targets("123:456,789;321:654").expect("failed to parse targets");

        assert_eq!(
            vec![
                Target {
                    domain: 123,
                    record: 456
                },
                Target {
                    domain: 123,
                    record: 789
                },
                Target {
                    domain: 321,
                    record: 654
                },
            ],
            targets
        );
    }

    #[test]
    fn reject_malformed_targets() {
        for raw in ["", ";", "123", "123:", ":456", "abc:456", "123:def"] {
            assert!(parse_targets(raw).is_err(), "expected {:?} to fail", raw);
        }
    }
}
