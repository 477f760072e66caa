pub mod email;

pub use email::EmailNotifier;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("SMTP configuration is missing")]
    NotConfigured,

    #[error("invalid mail address {address}: {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP dispatch failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Dispatches one alert message to one address. Failures are reported and
/// never retried within a run.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, to: &str, message: &str) -> Result<(), NotifyError>;
}
