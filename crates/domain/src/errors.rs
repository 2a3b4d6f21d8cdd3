use thiserror::Error;

/// Errors surfaced by the DNS core (blocklist, cache, upstream, query handling).
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("upstream exchange failed: {0}")]
    UpstreamFailed(String),

    #[error("upstream exchange timed out")]
    UpstreamTimeout,

    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors surfaced while loading, validating, or persisting [`crate::Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("config file is not valid JSON: {0}")]
    Malformed(String),

    #[error("failed to write config file: {0}")]
    WriteFailed(String),
}
