//! # ProRecruit (Sign-in and Notification Service)
//!
//! `prorecruit` serves the sign-in flow of the ProRecruit administration
//! portal and a stub SMS notification endpoint.
//!
//! ## Sign-in Flow
//!
//! A login walks through up to three steps:
//!
//! 1. **Credentials:** the email/password pair is checked against a fixed
//!    in-memory account table. The table is a mock and is not a security model.
//! 2. **Two-factor gate:** elevated roles (`admin`, `recruiter`) may be asked
//!    for a 6-character code. The gate is switched off unless
//!    `PRORECRUIT_TWO_FACTOR_ENABLED` is set.
//! 3. **Role routing:** the authenticated role is mapped to the screen the
//!    client should navigate to. Unknown roles land on `/`.
//!
//! ## Notifications
//!
//! `POST /api/send-sms` validates its payload, waits a fixed simulated
//! latency and returns a fabricated acknowledgement. Real carrier delivery is
//! available behind `--sms-provider twilio` but is never the default.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
