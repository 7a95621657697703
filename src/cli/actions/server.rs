use crate::{
    api::{
        self,
        handlers::auth::{AccountDirectory, AuthConfig, AuthState},
        sms::{LogSmsSender, SmsSender, TwilioSmsSender},
    },
    cli::{
        commands::{auth, sms::Provider},
        telemetry,
    },
};
use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub auth: auth::Options,
    pub sms: Provider,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the SMS backend cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let state = auth_state(&args.auth);
    let sender = sms_sender(args.sms)?;

    let result = api::new(args.port, Arc::new(state), sender).await;

    telemetry::shutdown_tracer();

    result
}

fn auth_state(options: &auth::Options) -> AuthState {
    let config = AuthConfig::new(options.frontend_base_url.clone())
        .with_two_factor_enabled(options.two_factor_enabled)
        .with_challenge_ttl_seconds(options.two_factor_ttl_seconds)
        .with_latency(Duration::from_millis(options.auth_latency_ms));

    AuthState::new(config, AccountDirectory::seeded())
}

fn sms_sender(provider: Provider) -> Result<Arc<dyn SmsSender>> {
    Ok(match provider {
        Provider::Log { latency_ms } => {
            Arc::new(LogSmsSender::new(Duration::from_millis(latency_ms)))
        }
        Provider::Twilio(config) => Arc::new(TwilioSmsSender::new(config)?),
    })
}

fn log_startup_args(args: &Args) {
    let sms = match &args.sms {
        Provider::Log { latency_ms } => format!("log ({latency_ms}ms)"),
        Provider::Twilio(config) => format!("twilio ({})", config.from_number),
    };
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("frontend_base_url", args.auth.frontend_base_url.clone()),
        (
            "two_factor_enabled",
            args.auth.two_factor_enabled.to_string(),
        ),
        (
            "two_factor_ttl",
            format!("{}s", args.auth.two_factor_ttl_seconds),
        ),
        ("auth_latency", format!("{}ms", args.auth.auth_latency_ms)),
        ("sms_provider", sms),
    ];

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {} - {}\n\nStartup configuration:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}
