use anyhow::Result;
use std::net::IpAddr;
use tokio::{
    select,
    sync::broadcast::Receiver,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{
    config::SharedConfig,
    ip::Echo,
    provider::{Error as ProviderError, Provider},
};

/// Watches the public address and keeps the configured records pointed at it
#[derive(Debug)]
pub struct Updater {
    config: SharedConfig,
    echo: Echo,
    provider: Option<Provider>,
    last_known: Option<IpAddr>,
}

impl Updater {
    /// Build the clients and resolve the configured provider
    ///
    /// An unrecognized provider name is reported here and again on every
    /// check, but does not prevent startup.
    pub fn new(config: SharedConfig) -> Result<Updater> {
        let echo = Echo::new(&config)?;
        let provider = match Provider::from_config(&config) {
            Ok(provider) => {
                info!(
                    provider = provider.name(),
                    records = config.targets.len(),
                    "watching for address changes"
                );
                Some(provider)
            }
            Err(error @ ProviderError::UnknownProvider(_)) => {
                error!("{}, updates will be skipped", error);
                None
            }
            Err(error) => return Err(error.into()),
        };

        for target in &config.targets {
            debug!(domain = target.domain, record = target.record, "tracking record");
        }

        Ok(Updater {
            config,
            echo,
            provider,
            last_known: None,
        })
    }

    /// Run the update loop until a stop signal arrives
    pub async fn run(mut self, mut stop: Receiver<()>) {
        self.initialize().await;

        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            select! {
                _ = interval.tick() => self.tick().await,
                _ = stop.recv() => {
                    info!("stopping address watch");
                    break;
                }
            }
        }
    }

    /// Seed the last known address from the provider's current record
    ///
    /// When this fails the address stays unset and the first check publishes
    /// unconditionally.
    async fn initialize(&mut self) {
        let provider = match &self.provider {
            Some(provider) => provider,
            None => return,
        };
        let target = match self.config.targets.first() {
            Some(target) => target,
            None => return,
        };

        match provider.record(target).await {
            Ok(record) => match record.content.parse::<IpAddr>() {
                Ok(address) => {
                    info!(address = %address, "loaded currently published address");
                    self.last_known = Some(address);
                }
                Err(_) => info!(
                    content = %record.content,
                    "record does not contain an address yet"
                ),
            },
            Err(e) => error!("failed to read published record: {}", e),
        }
    }

    /// Compare the current public address against the last known value and
    /// push it to every record when it changed
    async fn tick(&mut self) {
        let provider = match &self.provider {
            Some(provider) => provider,
            None => {
                error!(provider = %self.config.provider, "no such provider");
                return;
            }
        };

        let current = match self.echo.current().await {
            Ok(address) => address,
            Err(e) => {
                error!("failed to fetch the current address: {}", e);
                return;
            }
        };

        if self.last_known == Some(current) {
            debug!(address = %current, "address is unchanged");
            return;
        }

        let mut failed = false;
        for target in &self.config.targets {
            match provider.update(target, current).await {
                Ok(()) => debug!(
                    domain = target.domain,
                    record = target.record,
                    "record updated"
                ),
                Err(e) => {
                    failed = true;
                    error!(
                        domain = target.domain,
                        record = target.record,
                        "failed to update record: {}",
                        e
                    );
                }
            }
        }

        // Only remember the address once every record accepted it, so a
        // partial failure is retried on the next check.
        if !failed {
            match self.last_known.replace(current) {
                Some(old) => info!(
                    changed = true,
                    old = %old,
                    new = %current,
                    "published address changed"
                ),
                None => info!(changed = true, new = %current, "published address set"),
            }
        }
    }
}
