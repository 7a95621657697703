use clap::{builder::BoolishValueParser, Arg, ArgAction, ArgMatches, Command};

pub const ARG_FRONTEND_BASE_URL: &str = "frontend-base-url";
pub const ARG_TWO_FACTOR_ENABLED: &str = "two-factor-enabled";
pub const ARG_TWO_FACTOR_TTL_SECONDS: &str = "two-factor-ttl-seconds";
pub const ARG_AUTH_LATENCY_MS: &str = "auth-latency-ms";

#[derive(Debug)]
pub struct Options {
    pub frontend_base_url: String,
    pub two_factor_enabled: bool,
    pub two_factor_ttl_seconds: u64,
    pub auth_latency_ms: u64,
}

impl Options {
    /// Parse sign-in arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the frontend base URL is missing or empty.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let frontend_base_url = match matches.get_one::<String>(ARG_FRONTEND_BASE_URL) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => anyhow::bail!("missing required argument: --{ARG_FRONTEND_BASE_URL}"),
        };

        Ok(Self {
            frontend_base_url,
            two_factor_enabled: matches.get_flag(ARG_TWO_FACTOR_ENABLED),
            two_factor_ttl_seconds: matches
                .get_one::<u64>(ARG_TWO_FACTOR_TTL_SECONDS)
                .copied()
                .unwrap_or(300),
            auth_latency_ms: matches
                .get_one::<u64>(ARG_AUTH_LATENCY_MS)
                .copied()
                .unwrap_or(1000),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FRONTEND_BASE_URL)
                .long(ARG_FRONTEND_BASE_URL)
                .help("Frontend base URL, used as the allowed CORS origin")
                .env("PRORECRUIT_FRONTEND_BASE_URL")
                .default_value("http://localhost:3000"),
        )
        .arg(
            Arg::new(ARG_TWO_FACTOR_ENABLED)
                .long(ARG_TWO_FACTOR_ENABLED)
                .help("Require a two-factor code for admin and recruiter logins")
                .env("PRORECRUIT_TWO_FACTOR_ENABLED")
                .action(ArgAction::SetTrue)
                .value_parser(BoolishValueParser::new()),
        )
        .arg(
            Arg::new(ARG_TWO_FACTOR_TTL_SECONDS)
                .long(ARG_TWO_FACTOR_TTL_SECONDS)
                .help("Lifetime of a pending two-factor challenge in seconds")
                .env("PRORECRUIT_TWO_FACTOR_TTL_SECONDS")
                .default_value("300")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_AUTH_LATENCY_MS)
                .long(ARG_AUTH_LATENCY_MS)
                .help("Simulated latency for credential and code checks in milliseconds")
                .env("PRORECRUIT_AUTH_LATENCY_MS")
                .default_value("1000")
                .value_parser(clap::value_parser!(u64)),
        )
}
