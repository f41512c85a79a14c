//! Contact form delivery: one POST to the configured endpoint, or an email
//! draft link when no endpoint is configured.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use samarth_core::{AppConfig, ContactForm};
use serde::Serialize;

use crate::error::DeliveryError;

/// How an accepted inquiry left the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Delivery {
    /// The endpoint answered 2xx.
    Submitted { message: String },
    /// No endpoint is configured; the caller should open `uri`.
    EmailDraft { message: String, uri: String },
}

impl Delivery {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Delivery::Submitted { message } | Delivery::EmailDraft { message, .. } => message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactClient {
    client: Client,
    endpoint: Option<String>,
    recipient: String,
}

impl ContactClient {
    /// Creates a client with the given timeout and `User-Agent`.
    ///
    /// `endpoint` of `None` selects the `mailto:` fallback addressed to
    /// `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoint: Option<String>,
        recipient: impl Into<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            recipient: recipient.into(),
        })
    }

    /// # Errors
    ///
    /// See [`ContactClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, DeliveryError> {
        Self::new(
            config.contact_endpoint.clone(),
            config.contact_email.clone(),
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    /// Validate `form` and deliver it. No retry.
    ///
    /// # Errors
    ///
    /// - [`DeliveryError::Invalid`] if validation fails; nothing is sent.
    /// - [`DeliveryError::Http`] on network failure or timeout.
    /// - [`DeliveryError::UnexpectedStatus`] for any non-2xx response.
    pub async fn deliver(&self, form: &ContactForm) -> Result<Delivery, DeliveryError> {
        let valid = form.validate()?;

        let Some(endpoint) = self.endpoint.as_deref() else {
            tracing::info!("no contact endpoint configured; returning email draft");
            return Ok(Delivery::EmailDraft {
                message: "Opening email client…".to_owned(),
                uri: valid.mailto_uri(&self.recipient),
            });
        };

        let response = self
            .client
            .post(endpoint)
            .json(&valid.submission(Utc::now()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "contact endpoint rejected inquiry");
            return Err(DeliveryError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        tracing::info!(company = %valid.form().company, "contact inquiry submitted");
        Ok(Delivery::Submitted {
            message: "Thank you for your inquiry! We will get back to you within 24 hours."
                .to_owned(),
        })
    }
}
