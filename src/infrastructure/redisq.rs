//! # RedisQ Feed
//!
//! Long-polls the zKillboard relay. Each call yields at most one killmail pointer;
//! `{"package": null}` or an empty `href` means the queue was empty.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::error::ServiceError;
use crate::domain::killmail::ZkbPointer;
use crate::domain::traits::KillFeed;
use crate::infrastructure::http::decode_json;

const SERVICE: &str = "redisq";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    package: Option<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    #[serde(rename = "killID", default)]
    kill_id: i32,
    #[serde(default)]
    zkb: ZkbPointer,
}

pub struct RedisqFeed {
    http: Client,
    url: String,
}

impl RedisqFeed {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl KillFeed for RedisqFeed {
    async fn next_pointer(&self) -> Result<Option<ZkbPointer>, ServiceError> {
        let response = self
            .http
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ServiceError::transport(SERVICE, e))?;

        let envelope: Envelope = decode_json(SERVICE, response).await?;
        let pointer = envelope.package.map(|package| ZkbPointer {
            kill_id: package.kill_id,
            ..package.zkb
        });

        Ok(pointer.filter(|p| !p.is_empty()))
    }
}
