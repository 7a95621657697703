//! Auth state, configuration, and the pending two-factor challenge store.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    accounts::AccountDirectory,
    flow::{LoginFlow, LoginStep},
    gate::{TwoFactorChallenge, TwoFactorPolicy},
};

const DEFAULT_CHALLENGE_TTL_SECONDS: u64 = 5 * 60;
const DEFAULT_AUTH_LATENCY_MS: u64 = 1000;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    frontend_base_url: String,
    two_factor: TwoFactorPolicy,
    challenge_ttl_seconds: u64,
    latency: Duration,
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_base_url: String) -> Self {
        Self {
            frontend_base_url,
            two_factor: TwoFactorPolicy::default(),
            challenge_ttl_seconds: DEFAULT_CHALLENGE_TTL_SECONDS,
            latency: Duration::from_millis(DEFAULT_AUTH_LATENCY_MS),
        }
    }

    #[must_use]
    pub fn with_two_factor_enabled(mut self, enabled: bool) -> Self {
        self.two_factor = TwoFactorPolicy::new(enabled);
        self
    }

    #[must_use]
    pub fn with_challenge_ttl_seconds(mut self, seconds: u64) -> Self {
        self.challenge_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    #[must_use]
    pub fn two_factor(&self) -> TwoFactorPolicy {
        self.two_factor
    }

    #[must_use]
    pub fn challenge_ttl_seconds(&self) -> u64 {
        self.challenge_ttl_seconds
    }

    /// Artificial delay applied before every credential or code check.
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

struct PendingChallenge {
    challenge: TwoFactorChallenge,
    created_at: Instant,
}

/// In-memory store of challenges awaiting a code.
pub struct ChallengeStore {
    ttl: Duration,
    challenges: Mutex<HashMap<Uuid, PendingChallenge>>,
}

impl ChallengeStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            challenges: Mutex::new(HashMap::new()),
        }
    }

    pub async fn store(&self, challenge: TwoFactorChallenge) -> Uuid {
        let challenge_id = Uuid::new_v4();
        let mut challenges = self.challenges.lock().await;
        challenges.retain(|_, entry| entry.created_at.elapsed() < self.ttl);
        challenges.insert(
            challenge_id,
            PendingChallenge {
                challenge,
                created_at: Instant::now(),
            },
        );
        challenge_id
    }

    /// Run the code step for a stored challenge.
    ///
    /// Returns `None` for unknown or expired ids. A rejected code keeps the
    /// challenge (with its original age) so the user can retry; any other
    /// outcome removes it.
    pub async fn submit_code(&self, challenge_id: Uuid, code: &str) -> Option<LoginStep> {
        let mut challenges = self.challenges.lock().await;
        let entry = challenges.remove(&challenge_id)?;
        if entry.created_at.elapsed() >= self.ttl {
            return None;
        }

        let step = LoginFlow::submit_code(entry.challenge, code);
        if let LoginStep::AwaitingCode(challenge) = &step {
            challenges.insert(
                challenge_id,
                PendingChallenge {
                    challenge: challenge.clone(),
                    created_at: entry.created_at,
                },
            );
        }
        Some(step)
    }

    /// Drop a challenge. Unknown ids are ignored.
    pub async fn cancel(&self, challenge_id: Uuid) -> LoginStep {
        let removed = self.challenges.lock().await.remove(&challenge_id);
        match removed {
            Some(entry) => LoginFlow::cancel(entry.challenge),
            None => LoginStep::Credentials { error: None },
        }
    }

    pub async fn len(&self) -> usize {
        self.challenges.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

pub struct AuthState {
    config: AuthConfig,
    directory: AccountDirectory,
    challenges: ChallengeStore,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, directory: AccountDirectory) -> Self {
        let challenges = ChallengeStore::new(Duration::from_secs(config.challenge_ttl_seconds()));
        Self {
            config,
            directory,
            challenges,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn directory(&self) -> &AccountDirectory {
        &self.directory
    }

    #[must_use]
    pub fn challenges(&self) -> &ChallengeStore {
        &self.challenges
    }

    #[must_use]
    pub fn flow(&self) -> LoginFlow<'_> {
        LoginFlow::new(&self.directory, self.config.two_factor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::accounts::{Role, UserRecord};

    fn challenge() -> TwoFactorChallenge {
        TwoFactorChallenge::new(UserRecord {
            email: "recruiter@prorecruit.co.il".to_string(),
            role: Role::Recruiter,
            name: "Yossi Cohen".to_string(),
        })
    }

    #[test]
    fn auth_config_defaults_and_overrides() {
        let config = AuthConfig::new("http://localhost:3000".to_string());

        assert_eq!(config.frontend_base_url(), "http://localhost:3000");
        assert!(!config.two_factor().enabled());
        assert_eq!(
            config.challenge_ttl_seconds(),
            super::DEFAULT_CHALLENGE_TTL_SECONDS
        );
        assert_eq!(
            config.latency(),
            Duration::from_millis(super::DEFAULT_AUTH_LATENCY_MS)
        );

        let config = config
            .with_two_factor_enabled(true)
            .with_challenge_ttl_seconds(42)
            .with_latency(Duration::ZERO);

        assert!(config.two_factor().enabled());
        assert_eq!(config.challenge_ttl_seconds(), 42);
        assert_eq!(config.latency(), Duration::ZERO);
    }

    #[tokio::test]
    async fn stored_challenge_verifies_once() {
        let store = ChallengeStore::new(Duration::from_secs(60));
        let id = store.store(challenge()).await;
        assert_eq!(store.len().await, 1);

        let step = store.submit_code(id, "123456").await;
        assert!(matches!(step, Some(LoginStep::Authenticated { .. })));
        assert!(store.is_empty().await);

        assert!(store.submit_code(id, "123456").await.is_none());
    }

    #[tokio::test]
    async fn rejected_code_keeps_challenge() {
        let store = ChallengeStore::new(Duration::from_secs(60));
        let id = store.store(challenge()).await;

        let step = store.submit_code(id, "12").await;
        match step {
            Some(LoginStep::AwaitingCode(retry)) => {
                assert_eq!(retry.error(), Some("Code must be 6 digits"));
            }
            other => panic!("expected challenge to remain, got {other:?}"),
        }
        assert_eq!(store.len().await, 1);

        let step = store.submit_code(id, "abcdef").await;
        assert!(matches!(step, Some(LoginStep::Authenticated { .. })));
    }

    #[tokio::test]
    async fn expired_challenge_is_unknown() {
        let store = ChallengeStore::new(Duration::ZERO);
        let id = store.store(challenge()).await;
        assert!(store.submit_code(id, "123456").await.is_none());
    }

    #[tokio::test]
    async fn storing_prunes_expired_challenges() {
        let store = ChallengeStore::new(Duration::ZERO);
        store.store(challenge()).await;
        store.store(challenge()).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn cancel_removes_challenge() {
        let store = ChallengeStore::new(Duration::from_secs(60));
        let id = store.store(challenge()).await;

        assert!(matches!(
            store.cancel(id).await,
            LoginStep::Credentials { error: None }
        ));
        assert!(store.is_empty().await);
        assert!(store.submit_code(id, "123456").await.is_none());

        // Cancelling twice is harmless.
        assert!(matches!(
            store.cancel(id).await,
            LoginStep::Credentials { error: None }
        ));
    }

    #[test]
    fn auth_state_builds_flow_from_config() {
        let config =
            AuthConfig::new("http://localhost:3000".to_string()).with_two_factor_enabled(true);
        let state = AuthState::new(config, AccountDirectory::seeded());
        assert_eq!(state.directory().len(), 6);
        assert!(state.config().two_factor().enabled());
    }
}
