//! # ESI Client
//!
//! Fetches killmail bodies and resolves ids to names via `/universe/names/`.
//! One client serves both `KillmailSource` and `NameLookup`.

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::error::ServiceError;
use crate::domain::killmail::{Killmail, NameRef};
use crate::domain::traits::{KillmailSource, NameLookup};
use crate::infrastructure::http::decode_json;

const SERVICE: &str = "esi";
const NAMES_PATH: &str = "/latest/universe/names/";

pub struct EsiClient {
    http: Client,
    base_url: String,
}

impl EsiClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn names_url(&self) -> String {
        format!("{}{}", self.base_url, NAMES_PATH)
    }
}

#[async_trait]
impl KillmailSource for EsiClient {
    async fn killmail(&self, href: &str) -> Result<Killmail, ServiceError> {
        let response = self
            .http
            .get(href)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ServiceError::transport(SERVICE, e))?;

        decode_json(SERVICE, response).await
    }
}

#[async_trait]
impl NameLookup for EsiClient {
    async fn names(&self, ids: &[i32]) -> Result<Vec<NameRef>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .http
            .post(self.names_url())
            .header("Accept", "application/json")
            .json(ids)
            .send()
            .await
            .map_err(|e| ServiceError::transport(SERVICE, e))?;

        decode_json(SERVICE, response).await
    }
}
