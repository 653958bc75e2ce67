use reqwest::Error as ReqwestError;
use thiserror::Error as ThisError;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// The possible errors raised by a DNS provider
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("check your token and endpoint are correct")]
    Config,
    #[error("failed to parse response body")]
    Deserialize(#[source] ReqwestError),
    #[error("no record {record} in domain {domain}")]
    MissingRecord { domain: u64, record: u64 },
    #[error("failed to serialize request body")]
    Serialize(#[source] ReqwestError),
    #[error("unexpected status code {code}")]
    Status { code: u16 },
    #[error("request timed out")]
    Timeout(#[source] ReqwestError),
    #[error("an unknown error occurred while sending the request")]
    Unknown(#[source] ReqwestError),
    #[error("no such provider: {0}")]
    UnknownProvider(String),
}

impl From<ReqwestError> for Error {
    fn from(error: ReqwestError) -> Error {
        if error.is_builder() {
            Error::Config
        } else if error.is_timeout() {
            Error::Timeout(error)
        } else if error.is_decode() {
            Error::Deserialize(error)
        } else if error.is_body() {
            Error::Serialize(error)
        } else {
            Error::Unknown(error)
        }
    }
}
