//! Injectable ports: persistence for session flags and the async gateways
//! the session layer calls out through.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use wayfare_model::{Credential, GeneratedPlan, TripDraft, UserProfile};

use crate::error::GatewayError;

/// Durable string key-value storage. Values survive a reload of the client
/// process (e.g. browser local storage). Holds the credential.
pub trait DurableStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Volatile string key-value storage. Values live only for the tab's
/// lifetime (e.g. browser session storage). Holds the guest flag.
pub trait VolatileStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// The remote "who am I" call: resolve a credential to a profile.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    async fn resolve_profile(&self, credential: &Credential) -> Result<UserProfile, GatewayError>;
}

/// The unauthenticated, stateless generation gateway used for guest trips.
/// Returns a plan without a version; the guest store assigns one.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    async fn generate(&self, draft: &TripDraft) -> Result<GeneratedPlan, GatewayError>;
}

/// In-memory [`DurableStore`] for tests and local development.
#[derive(Default)]
pub struct MemoryDurableStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDurableStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryDurableStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// In-memory [`VolatileStore`] for tests and local development.
#[derive(Default)]
pub struct MemoryVolatileStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryVolatileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VolatileStore for MemoryVolatileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}
