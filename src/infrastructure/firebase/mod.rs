//! # Firebase Record Store
//!
//! Implements `RecordStore` over the Realtime Database REST API.
//! Linked accounts live under `discord/<userId>`; a JSON `null` body means "no record".

pub mod auth;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::config::FirebaseConfig;
use crate::domain::error::ServiceError;
use crate::domain::traits::RecordStore;
use crate::domain::types::UserRecord;
use crate::infrastructure::http::decode_json;

pub use auth::{ServiceAccount, TokenProvider};

const SERVICE: &str = "firebase";
const USER_PATH: &str = "discord";

pub struct FirebaseStore {
    http: Client,
    database_url: String,
    auth: Option<TokenProvider>,
}

impl FirebaseStore {
    pub fn new(http: Client, database_url: &str, auth: Option<TokenProvider>) -> Self {
        Self {
            http,
            database_url: database_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    /// Builds the store from configuration, loading the service account if one is configured.
    pub fn from_config(http: Client, config: &FirebaseConfig) -> Result<Self, ServiceError> {
        let database_url = config
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ServiceError::config(SERVICE, "database URL is not set"))?;

        let auth = match &config.credentials_file {
            Some(path) => {
                let account = ServiceAccount::from_file(path)?;
                if let (Some(expected), Some(actual)) = (&config.project_id, &account.project_id)
                    && expected != actual
                {
                    tracing::warn!(
                        "Credentials belong to project {} but PROJECT_ID is {}",
                        actual,
                        expected
                    );
                }
                Some(TokenProvider::new(http.clone(), account)?)
            }
            None => {
                tracing::warn!("No Firebase credentials configured, store requests are unauthenticated");
                None
            }
        };

        Ok(Self::new(http, database_url, auth))
    }

    fn record_url(&self, user_id: u64) -> String {
        format!("{}/{}/{}.json", self.database_url, USER_PATH, user_id)
    }
}

#[async_trait]
impl RecordStore for FirebaseStore {
    async fn user_record(&self, user_id: u64) -> Result<Option<UserRecord>, ServiceError> {
        let mut request = self.http.get(self.record_url(user_id));
        if let Some(auth) = &self.auth {
            request = request.bearer_auth(auth.access_token().await?);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::transport(SERVICE, e))?;

        decode_json(SERVICE, response).await
    }
}
