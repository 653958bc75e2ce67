use structopt::StructOpt;
use url::Url;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "tether",
    about = "Keep DNS records pointed at a changing public IP"
)]
pub struct Args {
    /// The domain containing the managed record
    ///
    /// The numeric id of the domain as known by the provider. The environment
    /// variable DOMAIN_ID can also be used. Ignored when --domain-data is set.
    #[structopt(long, env = "DOMAIN_ID", required_unless = "domain-data")]
    pub domain_id: Option<u64>,

    /// The record to keep updated
    ///
    /// The numeric id of the record within the domain. The environment
    /// variable RECORD_ID can also be used. Ignored when --domain-data is set.
    #[structopt(long, env = "RECORD_ID", required_unless = "domain-data")]
    pub record_id: Option<u64>,

    /// Multiple domains and records to keep updated
    ///
    /// A list of the form "<domain>:<record>[,<record>...][;<domain>:...]",
    /// allowing several records across several domains to track the same
    /// address. Takes precedence over --domain-id and --record-id. The
    /// environment variable DOMAIN_DATA can also be used.
    #[structopt(long, env = "DOMAIN_DATA")]
    pub domain_data: Option<String>,

    /// The DNS provider hosting the records
    ///
    /// Currently only "lima_city" is supported. The environment variable
    /// PROVIDER can also be used.
    #[structopt(short, long, env = "PROVIDER")]
    pub provider: String,

    /// The provider API token
    ///
    /// Sent as the basic auth password on every provider call. The
    /// environment variable AUTH can also be used.
    #[structopt(short, long, env = "AUTH", hide_env_values = true)]
    pub auth: String,

    /// Seconds between address checks
    ///
    /// The environment variable INTERVAL can also be used.
    #[structopt(short, long, env = "INTERVAL", default_value = "60")]
    pub interval: u64,

    /// Seconds before an outbound request is abandoned
    ///
    /// The environment variable TIMEOUT can also be used.
    #[structopt(short, long, env = "TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// The base URL of the provider API
    ///
    /// The environment variable PROVIDER_ENDPOINT can also be used.
    #[structopt(
        long,
        env = "PROVIDER_ENDPOINT",
        default_value = "https://www.lima-city.de/"
    )]
    pub provider_endpoint: Url,

    /// The address echo service to ask for the current public IP
    ///
    /// Must respond with a JSON object containing an "ip" field. The
    /// environment variable ECHO_ENDPOINT can also be used.
    #[structopt(
        long,
        env = "ECHO_ENDPOINT",
        default_value = "https://api64.ipify.org/?format=json"
    )]
    pub echo_endpoint: Url,

    /// The minimum level to log at
    ///
    /// The minimum log level specification, supports the rust log format. The
    /// environment variable RUST_LOG can also be used.
    #[structopt(short, long, env = "RUST_LOG")]
    pub log_level: Option<String>,

    /// The Sentry DSN to report errors to
    ///
    /// Error reporting is disabled when unset. The environment variable
    /// SENTRY_DSN can also be used.
    #[structopt(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}
