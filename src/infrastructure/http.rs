//! # HTTP Helpers
//!
//! One `reqwest::Client` per tool, reused across requests.
//! Also the shared "read body, check status, decode JSON" step.

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::error::ServiceError;

/// Longest error body kept in a `ServiceError::Status`.
const MAX_ERROR_BODY: usize = 512;

pub fn build_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Reads the body, maps non-2xx to `Status` and decodes the JSON payload.
pub async fn decode_json<T>(service: &'static str, response: Response) -> Result<T, ServiceError>
where
    T: DeserializeOwned,
{
    let body = read_success_body(service, response).await?;
    serde_json::from_str(&body).map_err(|e| ServiceError::decode(service, e))
}

/// Reads the body, mapping non-2xx statuses to `ServiceError::Status`.
pub async fn read_success_body(service: &'static str, response: Response) -> Result<String, ServiceError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::transport(service, e))?;

    if !status.is_success() {
        return Err(ServiceError::Status {
            service,
            status: status.as_u16(),
            body: truncate(&body, MAX_ERROR_BODY),
        });
    }
    Ok(body)
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééé", 2), "éé...");
    }

    #[tokio::test]
    async fn test_decode_json_maps_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", "/ok")
            .with_status(200)
            .with_body("[1,2,3]")
            .create_async()
            .await;
        let bad = server
            .mock("GET", "/bad")
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;

        let client = build_client("test-agent", Duration::from_secs(5)).unwrap();

        let response = client.get(format!("{}/ok", server.url())).send().await.unwrap();
        let values: Vec<u32> = decode_json("test", response).await.unwrap();
        assert_eq!(values, vec![1, 2, 3]);

        let response = client.get(format!("{}/bad", server.url())).send().await.unwrap();
        let err = decode_json::<Vec<u32>>("test", response).await.unwrap_err();
        match err {
            ServiceError::Status { status, body, .. } => {
                assert_eq!(status, 503);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other}"),
        }

        ok.assert_async().await;
        bad.assert_async().await;
    }
}
