use crate::cli::{
    actions::{server::Args, Action},
    commands::{auth, sms},
};
use anyhow::Result;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let auth = auth::Options::parse(matches)?;
    let sms = sms::Provider::parse(matches)?;

    Ok(Action::Server(Args { port, auth, sms }))
}
