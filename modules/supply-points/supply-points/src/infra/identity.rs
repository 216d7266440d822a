use async_trait::async_trait;
use supply_points_sdk::Identity;
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::domain::ports::{AuthError, AuthState, AuthSubscription, IdentityProvider};

/// In-process identity provider.
///
/// Sign-in yields the configured identity, or fails when none is configured.
#[derive(Debug)]
pub struct StaticIdentityProvider {
    identity: Option<Identity>,
    state: watch::Sender<AuthState>,
}

impl StaticIdentityProvider {
    #[must_use]
    pub fn new(identity: Option<Identity>) -> Self {
        let (state, _) = watch::channel(AuthState::SignedOut);
        Self { identity, state }
    }

    /// Provider whose session is already active.
    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        let (state, _) = watch::channel(AuthState::SignedIn(identity.clone()));
        Self {
            identity: Some(identity),
            state,
        }
    }

    /// Publish a transition as if it came from another tab or a token expiry.
    pub fn set_state(&self, state: AuthState) {
        self.state.send_replace(state);
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscribers(&self) -> usize {
        self.state.receiver_count()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    #[instrument(skip_all)]
    async fn sign_in(&self) -> Result<Identity, AuthError> {
        let identity = self
            .identity
            .clone()
            .ok_or_else(|| AuthError::Rejected("no identity configured".to_owned()))?;
        debug!(uid = %identity.uid, "Signed in");
        self.state.send_replace(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    #[instrument(skip_all)]
    async fn sign_out(&self) {
        debug!("Signed out");
        self.state.send_replace(AuthState::SignedOut);
    }

    fn observe_state(&self) -> AuthSubscription {
        AuthSubscription::new(self.state.subscribe())
    }
}
