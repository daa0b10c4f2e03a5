use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wayfare_model::{Credential, GeneratedPlan, Itinerary, Trip, TripDraft, UserProfile};

use crate::contract::RemoteTripGateway;
use crate::error::{Error, decode_failure};
use crate::wire::{NewUser, TokenOut, TripOut};

/// Reqwest-backed implementation of [`RemoteTripGateway`].
pub struct RemoteTripClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteTripClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(
        req: reqwest::RequestBuilder,
        credential: Option<&Credential>,
    ) -> reqwest::RequestBuilder {
        match credential {
            Some(credential) => req.header(
                "Authorization",
                format!("Bearer {}", credential.as_str()),
            ),
            None => req,
        }
    }

    /// Send a request and decode a JSON success body. Non-success statuses
    /// are mapped through [`decode_failure`]; they are never swallowed.
    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let resp = req.send().await.map_err(|e| Error::Http(Box::new(e)))?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = decode_failure(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "remote call failed");
            return Err(err);
        }

        let body = resp.text().await.map_err(|e| Error::Http(Box::new(e)))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request whose success response carries no body (204).
    async fn send_no_content(&self, req: reqwest::RequestBuilder) -> Result<(), Error> {
        let resp = req.send().await.map_err(|e| Error::Http(Box::new(e)))?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = decode_failure(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "remote call failed");
            return Err(err);
        }
        Ok(())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> Result<T, Error> {
        self.send_json(Self::authorize(self.http.get(self.url(path)), credential))
            .await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        credential: Option<&Credential>,
        body: &B,
    ) -> Result<T, Error> {
        self.send_json(Self::authorize(self.http.post(self.url(path)), credential).json(body))
            .await
    }
}

#[async_trait]
impl RemoteTripGateway for RemoteTripClient {
    async fn register(&self, new_user: &NewUser) -> Result<UserProfile, Error> {
        self.post("/auth/register", None, new_user).await
    }

    async fn login(&self, username_or_email: &str, password: &str) -> Result<Credential, Error> {
        let form = [("username", username_or_email), ("password", password)];
        let token: TokenOut = self
            .send_json(self.http.post(self.url("/auth/login")).form(&form))
            .await?;
        Ok(Credential::new(token.access_token))
    }

    async fn who_am_i(&self, credential: &Credential) -> Result<UserProfile, Error> {
        self.get("/auth/me", Some(credential)).await
    }

    async fn list_trips(&self, credential: &Credential) -> Result<Vec<Trip>, Error> {
        let trips: Vec<TripOut> = self.get("/trips/", Some(credential)).await?;
        Ok(trips.into_iter().map(Trip::from).collect())
    }

    async fn get_trip(&self, credential: &Credential, trip_id: i64) -> Result<Trip, Error> {
        let trip: TripOut = self.get(&format!("/trips/{trip_id}"), Some(credential)).await?;
        Ok(trip.into())
    }

    async fn create_trip(&self, credential: &Credential, draft: &TripDraft) -> Result<Trip, Error> {
        let trip: TripOut = self.post("/trips/", Some(credential), draft).await?;
        Ok(trip.into())
    }

    async fn update_trip(
        &self,
        credential: &Credential,
        trip_id: i64,
        draft: &TripDraft,
    ) -> Result<Trip, Error> {
        let req = Self::authorize(
            self.http.put(self.url(&format!("/trips/{trip_id}"))),
            Some(credential),
        )
        .json(draft);
        let trip: TripOut = self.send_json(req).await?;
        Ok(trip.into())
    }

    async fn delete_trip(&self, credential: &Credential, trip_id: i64) -> Result<(), Error> {
        let req = Self::authorize(
            self.http.delete(self.url(&format!("/trips/{trip_id}"))),
            Some(credential),
        );
        self.send_no_content(req).await
    }

    async fn list_itineraries(
        &self,
        credential: &Credential,
        trip_id: i64,
    ) -> Result<Vec<Itinerary>, Error> {
        self.get(&format!("/itineraries/trip/{trip_id}"), Some(credential))
            .await
    }

    async fn generate_itinerary(
        &self,
        credential: &Credential,
        trip_id: i64,
    ) -> Result<Itinerary, Error> {
        self.post(
            &format!("/itineraries/generate/{trip_id}"),
            Some(credential),
            &serde_json::json!({}),
        )
        .await
    }

    async fn get_itinerary(
        &self,
        credential: &Credential,
        itinerary_id: i64,
    ) -> Result<Itinerary, Error> {
        self.get(&format!("/itineraries/{itinerary_id}"), Some(credential))
            .await
    }

    async fn delete_itinerary(
        &self,
        credential: &Credential,
        itinerary_id: i64,
    ) -> Result<(), Error> {
        let req = Self::authorize(
            self.http
                .delete(self.url(&format!("/itineraries/{itinerary_id}"))),
            Some(credential),
        );
        self.send_no_content(req).await
    }

    async fn generate_guest_itinerary(&self, draft: &TripDraft) -> Result<GeneratedPlan, Error> {
        self.post("/itineraries/generate/guest", None, draft).await
    }
}
