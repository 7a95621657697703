use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

use crate::api::sms::TwilioConfig;

pub const ARG_SMS_PROVIDER: &str = "sms-provider";
pub const ARG_SMS_LATENCY_MS: &str = "sms-latency-ms";
pub const ARG_TWILIO_ACCOUNT_SID: &str = "twilio-account-sid";
pub const ARG_TWILIO_AUTH_TOKEN: &str = "twilio-auth-token";
pub const ARG_TWILIO_FROM_NUMBER: &str = "twilio-from-number";

#[derive(Debug)]
pub enum Provider {
    /// Log and acknowledge without delivering.
    Log { latency_ms: u64 },
    Twilio(TwilioConfig),
}

impl Provider {
    /// Parse SMS provider arguments from matches.
    ///
    /// # Errors
    /// Returns an error if `twilio` is selected without its credentials.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        // Filter empty strings which clap passes through if env vars are set to ""
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
        };

        let provider = matches
            .get_one::<String>(ARG_SMS_PROVIDER)
            .map_or("log", String::as_str);

        match provider {
            "twilio" => {
                let required = |id: &str| {
                    get_non_empty(id)
                        .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
                };
                Ok(Self::Twilio(TwilioConfig {
                    account_sid: required(ARG_TWILIO_ACCOUNT_SID)?,
                    auth_token: SecretString::from(required(ARG_TWILIO_AUTH_TOKEN)?),
                    from_number: required(ARG_TWILIO_FROM_NUMBER)?,
                }))
            }
            _ => Ok(Self::Log {
                latency_ms: matches
                    .get_one::<u64>(ARG_SMS_LATENCY_MS)
                    .copied()
                    .unwrap_or(1000),
            }),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SMS_PROVIDER)
                .long(ARG_SMS_PROVIDER)
                .help("SMS delivery backend")
                .long_help(
                    "SMS delivery backend.\n\n`log` acknowledges every message without delivering it. `twilio` delivers through the Twilio Messages API and requires --twilio-account-sid, --twilio-auth-token and --twilio-from-number.",
                )
                .env("PRORECRUIT_SMS_PROVIDER")
                .default_value("log")
                .value_parser(["log", "twilio"]),
        )
        .arg(
            Arg::new(ARG_SMS_LATENCY_MS)
                .long(ARG_SMS_LATENCY_MS)
                .help("Simulated delivery latency of the log provider in milliseconds")
                .env("PRORECRUIT_SMS_LATENCY_MS")
                .default_value("1000")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_TWILIO_ACCOUNT_SID)
                .long(ARG_TWILIO_ACCOUNT_SID)
                .help("Twilio account SID")
                .env("TWILIO_ACCOUNT_SID"),
        )
        .arg(
            Arg::new(ARG_TWILIO_AUTH_TOKEN)
                .long(ARG_TWILIO_AUTH_TOKEN)
                .help("Twilio auth token")
                .env("TWILIO_AUTH_TOKEN")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_TWILIO_FROM_NUMBER)
                .long(ARG_TWILIO_FROM_NUMBER)
                .help("Sender phone number registered with Twilio")
                .env("TWILIO_PHONE_NUMBER"),
        )
}
