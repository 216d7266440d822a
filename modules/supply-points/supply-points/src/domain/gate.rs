use supply_points_sdk::Identity;

use crate::domain::ports::{AuthState, AuthSubscription, IdentityProvider};

/// What the editor surface shows for the current auth state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateView {
    SignInPrompt,
    Editor(Identity),
}

impl From<AuthState> for GateView {
    fn from(state: AuthState) -> Self {
        match state {
            AuthState::SignedOut => Self::SignInPrompt,
            AuthState::SignedIn(identity) => Self::Editor(identity),
        }
    }
}

/// Holds the auth-state subscription for as long as the editor lives.
#[derive(Debug)]
pub struct IdentityGate {
    subscription: Option<AuthSubscription>,
    view: GateView,
}

impl IdentityGate {
    pub fn attach(provider: &dyn IdentityProvider) -> Self {
        let subscription = provider.observe_state();
        let view = subscription.current().into();
        Self {
            subscription: Some(subscription),
            view,
        }
    }

    #[must_use]
    pub fn view(&self) -> &GateView {
        &self.view
    }

    /// Record a transition the editor applied on its own, such as its own sign-in.
    pub fn set_view(&mut self, view: GateView) {
        self.view = view;
    }

    /// Next transition, or `None` once released or the provider is gone.
    pub async fn changed(&mut self) -> Option<GateView> {
        let state = self.subscription.as_mut()?.changed().await?;
        self.view = state.into();
        Some(self.view.clone())
    }

    pub fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }
}
