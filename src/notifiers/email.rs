use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use super::{Notifier, NotifyError};
use crate::config::SmtpConfig;

const SUBJECT: &str = "Lookout found something for you";

/// SMTP-backed notifier. Built without configuration, every dispatch fails
/// with [`NotifyError::NotConfigured`].
pub struct EmailNotifier {
    inner: Option<Inner>,
}

struct Inner {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailNotifier {
    pub fn new(config: Option<&SmtpConfig>) -> Result<Self, NotifyError> {
        let Some(config) = config else {
            return Ok(Self { inner: None });
        };

        let from_address = config.from_address.as_deref().unwrap_or(&config.username);
        let from = format!("{} <{}>", config.from_name, from_address)
            .parse()
            .map_err(|source| NotifyError::Address {
                address: from_address.to_string(),
                source,
            })?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        }
        .port(config.port)
        .credentials(credentials)
        .build();

        Ok(Self {
            inner: Some(Inner { transport, from }),
        })
    }

    fn build_message(from: &Mailbox, to: &str, message: &str) -> Result<Message, NotifyError> {
        let to = to.parse::<Mailbox>().map_err(|source| NotifyError::Address {
            address: to.to_string(),
            source,
        })?;

        Message::builder()
            .from(from.clone())
            .to(to)
            .subject(SUBJECT)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(message.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(format!("<p>{message}</p>")),
                    ),
            )
            .map_err(NotifyError::from)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, to: &str, message: &str) -> Result<(), NotifyError> {
        let Some(inner) = &self.inner else {
            return Err(NotifyError::NotConfigured);
        };

        let email = Self::build_message(&inner.from, to, message)?;
        info!("Sending an email to {}", to);
        inner.transport.send(email).await?;
        Ok(())
    }
}
