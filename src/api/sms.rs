//! SMS delivery abstractions.
//!
//! `POST /api/send-sms` hands each validated message to an `SmsSender`.
//! The default `LogSmsSender` performs no delivery: it waits a fixed latency,
//! logs the destination and returns a fabricated receipt.
//!
//! `TwilioSmsSender` posts to the Twilio Messages API and is only used when
//! `--sms-provider twilio` is selected together with account credentials.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub const STATUS_SENT: &str = "sent";

const DEFAULT_SMS_LATENCY_MS: u64 = 1000;
const TWILIO_API_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

#[derive(Clone, Debug)]
pub struct SmsMessage {
    pub to: String,
    pub body: String,
}

/// Acknowledgement returned by a sender.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmsReceipt {
    pub sid: String,
    pub status: String,
}

/// SMS delivery abstraction used by the send-sms handler.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Deliver a message or return an error to report a delivery failure.
    async fn send(&self, message: &SmsMessage) -> Result<SmsReceipt>;
}

/// Synthetic message id shaped like a carrier SID: `SM` + 32 hex chars.
#[must_use]
pub fn synthetic_sid() -> String {
    format!("SM{}", Uuid::new_v4().simple())
}

/// Local sender that logs the message instead of delivering it.
#[derive(Clone, Debug)]
pub struct LogSmsSender {
    latency: Duration,
}

impl LogSmsSender {
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for LogSmsSender {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SMS_LATENCY_MS))
    }
}

#[async_trait]
impl SmsSender for LogSmsSender {
    #[instrument(skip_all)]
    async fn send(&self, message: &SmsMessage) -> Result<SmsReceipt> {
        sleep(self.latency).await;

        let receipt = SmsReceipt {
            sid: synthetic_sid(),
            status: STATUS_SENT.to_string(),
        };

        info!(
            to = %message.to,
            body_len = message.body.chars().count(),
            sid = %receipt.sid,
            "sms send stub"
        );

        Ok(receipt)
    }
}

/// E.164: a leading `+` followed by up to 15 digits.
#[must_use]
pub fn valid_phone_number(number: &str) -> bool {
    Regex::new(r"^\+[1-9][0-9]{6,14}$").is_ok_and(|regex| regex.is_match(number))
}

#[derive(Clone, Debug)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: SecretString,
    pub from_number: String,
}

#[derive(Deserialize)]
struct TwilioMessageResponse {
    sid: String,
    status: String,
}

/// Sender backed by the Twilio Messages REST API.
#[derive(Clone, Debug)]
pub struct TwilioSmsSender {
    client: Client,
    base_url: String,
    config: TwilioConfig,
}

impl TwilioSmsSender {
    /// # Errors
    /// Returns an error if the sender number is not E.164 or the HTTP client
    /// cannot be built.
    pub fn new(config: TwilioConfig) -> Result<Self> {
        if !valid_phone_number(&config.from_number) {
            bail!(
                "Twilio sender number must be in E.164 format: {}",
                config.from_number
            );
        }

        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build Twilio HTTP client")?;

        Ok(Self {
            client,
            base_url: TWILIO_API_BASE_URL.to_string(),
            config,
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    #[instrument(skip_all)]
    async fn send(&self, message: &SmsMessage) -> Result<SmsReceipt> {
        let url = self.messages_url();
        debug!(to = %message.to, "sending sms via twilio");

        let response = self
            .client
            .post(&url)
            .basic_auth(
                &self.config.account_sid,
                Some(self.config.auth_token.expose_secret()),
            )
            .form(&[
                ("To", message.to.as_str()),
                ("From", self.config.from_number.as_str()),
                ("Body", message.body.as_str()),
            ])
            .send()
            .await
            .context("Twilio request failed")?
            .error_for_status()
            .context("Twilio rejected the message")?;

        let created: TwilioMessageResponse = response
            .json()
            .await
            .context("Invalid Twilio response")?;

        info!(to = %message.to, sid = %created.sid, status = %created.status, "sms sent via twilio");

        Ok(SmsReceipt {
            sid: created.sid,
            status: created.status,
        })
    }
}
