//! Outbound notification seam and the SMTP implementation behind it.
//! Every caller treats delivery as fire-and-forget: failures are logged,
//! never propagated to candidates.

pub mod templates;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

/// A file attached to an outbound message (CSV exports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn csv(filename: &str, content: Vec<u8>) -> Self {
        Self {
            filename: filename.to_string(),
            content_type: "text/csv".to_string(),
            content,
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment: Option<Attachment>,
    ) -> Result<()>;
}

/// SMTP-backed [`Notifier`] over a STARTTLS relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .context("invalid SMTP relay host")?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        let from = config
            .from_address
            .parse()
            .context("invalid sender address")?;
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment: Option<Attachment>,
    ) -> Result<()> {
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("invalid recipient address '{recipient}'"))?;
        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject);

        let message = match attachment {
            None => builder.multipart(MultiPart::alternative_plain_html(
                "This is an HTML email. Please view it in an HTML-capable client.".to_string(),
                html_body.to_string(),
            ))?,
            Some(att) => {
                let content_type = ContentType::parse(&att.content_type)
                    .context("invalid attachment content type")?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::html(html_body.to_string()))
                        .singlepart(
                            lettre::message::Attachment::new(att.filename)
                                .body(att.content, content_type),
                        ),
                )?
            }
        };

        self.transport
            .send(message)
            .await
            .context("SMTP send failed")?;
        Ok(())
    }
}
