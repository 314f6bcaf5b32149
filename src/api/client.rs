use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::envelope::Envelope;
use crate::config::ApiConfig;
use crate::crypto::signer::SignatureBuilder;
use crate::error::ApiError;
use crate::models::{Handle, UserRating};

pub const FRIENDS_METHOD: &str = "user.friends";
pub const USER_INFO_METHOD: &str = "user.info";

/// Client for the two calls the panel needs. `user.friends` exposes private
/// data and is signed; `user.info` is public and sent without credentials.
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    signer: SignatureBuilder,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    pub fn with_http_client(config: &ApiConfig, http: reqwest::Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            signer: SignatureBuilder::new(&config.api_key, &config.api_secret),
        }
    }

    pub async fn fetch_friends(&self) -> Result<Vec<Handle>, ApiError> {
        let params = BTreeMap::from([("onlyOnline".to_string(), "false".to_string())]);
        let request = self.signer.sign(FRIENDS_METHOD, params);
        self.get(request.method_name(), &request.query_pairs()).await
    }

    /// Looks up ratings for `handles`. An empty list returns immediately
    /// without touching the network.
    pub async fn fetch_ratings(&self, handles: &[Handle]) -> Result<Vec<UserRating>, ApiError> {
        if handles.is_empty() {
            return Ok(Vec::new());
        }
        let query = [("handles".to_string(), handles.join(";"))];
        self.get(USER_INFO_METHOD, &query).await
    }

    /// `fetch_friends`, logging any failure and returning no friends instead.
    pub async fn friends_or_empty(&self) -> Vec<Handle> {
        self.fetch_friends().await.unwrap_or_else(|e| {
            error!("Error fetching friends: {e}");
            Vec::new()
        })
    }

    /// `fetch_ratings`, logging any failure and returning no ratings instead.
    pub async fn ratings_or_empty(&self, handles: &[Handle]) -> Vec<UserRating> {
        self.fetch_ratings(handles).await.unwrap_or_else(|e| {
            error!("Error fetching ratings: {e}");
            Vec::new()
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{method}", self.base_url);
        debug!(method, "sending API request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let comment = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.comment);
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                comment,
            });
        }

        serde_json::from_str::<Envelope<T>>(&body)?.into_result()
    }
}
