use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use wayfare_model::{Credential, UserProfile};

use crate::error::{Error, Result};
use crate::guest::GuestTripStore;
use crate::ports::{DurableStore, GenerationGateway, IdentityGateway, VolatileStore};

/// Durable-store key under which the credential is persisted.
pub const CREDENTIAL_KEY: &str = "wayfare.credential";

/// Volatile-store key marking an active guest session.
pub const GUEST_FLAG_KEY: &str = "wayfare.guest";

/// Exactly one mode holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Anonymous,
    Authenticated,
    Guest,
}

struct State {
    mode: SessionMode,
    credential: Option<Credential>,
    profile: Option<UserProfile>,
}

/// The fixed placeholder profile synthesized for guest mode.
pub fn guest_profile() -> UserProfile {
    UserProfile {
        id: 0,
        username: "guest".to_string(),
        email: "guest@wayfare.local".to_string(),
        first_name: "Guest".to_string(),
        last_name: "Traveler".to_string(),
    }
}

/// Owns the session mode state machine, the credential, and the current
/// profile, and dispatches guest data lifecycle to [`GuestTripStore`].
///
/// Invariant: at most one of {stored credential, guest flag} is set at any
/// time, and a stored credential always has a resolvable profile — a failed
/// who-am-I discards the credential rather than leaving the session
/// half-authenticated.
pub struct SessionStore {
    durable: Arc<dyn DurableStore>,
    volatile: Arc<dyn VolatileStore>,
    identity: Arc<dyn IdentityGateway>,
    guest_trips: GuestTripStore,
    state: RwLock<State>,
    loading: watch::Sender<bool>,
}

impl SessionStore {
    /// Wire the ports. The store starts loading; call [`initialize`]
    /// (typically right after construction) to resolve the starting mode.
    ///
    /// [`initialize`]: SessionStore::initialize
    pub fn new(
        durable: Arc<dyn DurableStore>,
        volatile: Arc<dyn VolatileStore>,
        identity: Arc<dyn IdentityGateway>,
        generation: Arc<dyn GenerationGateway>,
    ) -> Self {
        Self {
            durable,
            volatile,
            identity,
            guest_trips: GuestTripStore::new(generation),
            state: RwLock::new(State {
                mode: SessionMode::Anonymous,
                credential: None,
                profile: None,
            }),
            loading: watch::Sender::new(true),
        }
    }

    /// Resolve the starting mode from persisted state.
    ///
    /// A stored credential is validated against the identity gateway; if the
    /// resolution fails (expired or invalid), the credential is discarded
    /// and the session starts Anonymous. Otherwise a set guest flag yields
    /// Guest with the placeholder profile. Clears the loading flag when
    /// done, releasing every consumer awaiting [`ready`](SessionStore::ready).
    pub async fn initialize(&self) {
        if let Some(raw) = self.durable.get(CREDENTIAL_KEY) {
            let credential = Credential::new(raw);
            match self.identity.resolve_profile(&credential).await {
                Ok(profile) => {
                    tracing::debug!(username = %profile.username, "restored authenticated session");
                    let mut state = self.state.write();
                    state.mode = SessionMode::Authenticated;
                    state.credential = Some(credential);
                    state.profile = Some(profile);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "stored credential rejected, discarding");
                    self.durable.remove(CREDENTIAL_KEY);
                }
            }
        } else if self.volatile.get(GUEST_FLAG_KEY).is_some() {
            tracing::debug!("restored guest session");
            let mut state = self.state.write();
            state.mode = SessionMode::Guest;
            state.profile = Some(guest_profile());
        }

        self.loading.send_replace(false);
    }

    /// True from construction until the initial mode resolution completes.
    /// Mode-dependent consumers must defer until this is false.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Await completion of the initial mode resolution.
    pub async fn ready(&self) {
        let mut rx = self.loading.subscribe();
        while *rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                break;
            }
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.state.read().mode
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state.read().profile.clone()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.state.read().credential.clone()
    }

    pub fn guest_trips(&self) -> &GuestTripStore {
        &self.guest_trips
    }

    /// Enter Authenticated with the given credential.
    ///
    /// The profile is resolved first; only on success is the credential
    /// persisted, the guest flag cleared, and any guest data discarded
    /// (login always supersedes Guest). On failure the credential is
    /// discarded and the current mode is left untouched.
    pub async fn login(&self, credential: Credential) -> Result<UserProfile> {
        let profile = self
            .identity
            .resolve_profile(&credential)
            .await
            .map_err(Error::Login)?;

        self.durable.set(CREDENTIAL_KEY, credential.as_str());
        self.volatile.remove(GUEST_FLAG_KEY);
        self.guest_trips.clear();

        tracing::debug!(username = %profile.username, "session authenticated");
        let mut state = self.state.write();
        state.mode = SessionMode::Authenticated;
        state.credential = Some(credential);
        state.profile = Some(profile.clone());
        Ok(profile)
    }

    /// Enter Guest: set the tab-scoped guest flag, guarantee no credential
    /// is present, and synthesize the placeholder profile.
    pub fn login_as_guest(&self) -> UserProfile {
        self.durable.remove(CREDENTIAL_KEY);
        self.volatile.set(GUEST_FLAG_KEY, "1");

        tracing::debug!("session entered guest mode");
        let profile = guest_profile();
        let mut state = self.state.write();
        state.mode = SessionMode::Guest;
        state.credential = None;
        state.profile = Some(profile.clone());
        profile
    }

    /// Return to Anonymous: clear credential, guest flag, profile, and all
    /// guest trips.
    pub fn logout(&self) {
        self.durable.remove(CREDENTIAL_KEY);
        self.volatile.remove(GUEST_FLAG_KEY);
        self.guest_trips.clear();

        tracing::debug!("session logged out");
        let mut state = self.state.write();
        state.mode = SessionMode::Anonymous;
        state.credential = None;
        state.profile = None;
    }
}
