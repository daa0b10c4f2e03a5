//! Bridges from the shared remote gateway onto the session layer's narrow
//! ports, collapsing the API error taxonomy into [`GatewayError`].

use std::sync::Arc;

use async_trait::async_trait;
use wayfare_api::RemoteTripGateway;
use wayfare_model::{Credential, GeneratedPlan, TripDraft, UserProfile};
use wayfare_session::{GatewayError, GenerationGateway, IdentityGateway};

/// The who-am-I call, backed by the remote gateway.
pub struct RemoteIdentity(pub Arc<dyn RemoteTripGateway>);

#[async_trait]
impl IdentityGateway for RemoteIdentity {
    async fn resolve_profile(&self, credential: &Credential) -> Result<UserProfile, GatewayError> {
        self.0.who_am_i(credential).await.map_err(into_gateway_error)
    }
}

/// The unauthenticated guest generation call, backed by the remote gateway.
pub struct RemoteGeneration(pub Arc<dyn RemoteTripGateway>);

#[async_trait]
impl GenerationGateway for RemoteGeneration {
    async fn generate(&self, draft: &TripDraft) -> Result<GeneratedPlan, GatewayError> {
        self.0
            .generate_guest_itinerary(draft)
            .await
            .map_err(into_gateway_error)
    }
}

fn into_gateway_error(err: wayfare_api::Error) -> GatewayError {
    match err {
        wayfare_api::Error::RateLimited => GatewayError::RateLimited,
        wayfare_api::Error::Http(e) => GatewayError::Unavailable(e.to_string()),
        wayfare_api::Error::Json(e) => GatewayError::Unavailable(e.to_string()),
        other => GatewayError::Rejected(other.to_string()),
    }
}
