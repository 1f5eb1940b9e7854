//! Pinning capability for BadgeForge.
//!
//! The synthesis pipeline operates purely on already-resolved gateway
//! URLs and has no dependency on this crate; pinning is an injected
//! capability used by the CLI when publishing generated documents.

use serde::Deserialize;
use url::Url;

use badgeforge_shared::{BadgeForgeError, PinataConfig, Result};

/// The pinning capability: given bytes or JSON, return a CID string.
///
/// No retries or backoff here — transient failures surface to the caller.
pub trait Pinner {
    /// Pin raw bytes under a display filename, returning the CID.
    fn pin_bytes(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Pin a JSON document, returning the CID.
    fn pin_json(
        &self,
        document: &serde_json::Value,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Successful pin response from the Pinata API.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Pinata pinning service client.
#[derive(Debug, Clone)]
pub struct PinataClient {
    http: reqwest::Client,
    base_url: Url,
    gateway: String,
    api_key: String,
    api_secret: String,
}

impl PinataClient {
    /// Build a client from the `[pinata]` config section and resolved
    /// credentials (see `validate_pinata_credentials`).
    pub fn new(config: &PinataConfig, api_key: String, api_secret: String) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            BadgeForgeError::config(format!("invalid pinata base_url '{}': {e}", config.base_url))
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            gateway: config.gateway.trim_end_matches('/').to_string(),
            api_key,
            api_secret,
        })
    }

    /// Render the public gateway preview URL for a CID.
    pub fn gateway_url(&self, cid: &str) -> String {
        format!("{}/ipfs/{cid}", self.gateway)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BadgeForgeError::Pinning(format!("invalid endpoint {path}: {e}")))
    }

    async fn parse_response(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BadgeForgeError::Pinning(format!(
                "pin request rejected: {status} {body}"
            )));
        }

        let parsed: PinResponse = response
            .json()
            .await
            .map_err(|e| BadgeForgeError::Pinning(format!("unexpected pin response: {e}")))?;

        Ok(parsed.ipfs_hash)
    }
}

impl Pinner for PinataClient {
    async fn pin_bytes(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/plain")
            .map_err(|e| BadgeForgeError::Pinning(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint("/pinning/pinFileToIPFS")?)
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.api_secret)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BadgeForgeError::Pinning(e.to_string()))?;

        let cid = Self::parse_response(response).await?;
        tracing::debug!(filename, %cid, "pinned file");
        Ok(cid)
    }

    async fn pin_json(&self, document: &serde_json::Value) -> Result<String> {
        let response = self
            .http
            .post(self.endpoint("/pinning/pinJSONToIPFS")?)
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.api_secret)
            .json(document)
            .send()
            .await
            .map_err(|e| BadgeForgeError::Pinning(e.to_string()))?;

        let cid = Self::parse_response(response).await?;
        tracing::debug!(%cid, "pinned JSON document");
        Ok(cid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PinataClient {
        PinataClient::new(
            &PinataConfig::default(),
            "key".into(),
            "secret".into(),
        )
        .unwrap()
    }

    #[test]
    fn pin_response_parses_ipfs_hash() {
        let parsed: PinResponse = serde_json::from_str(
            r#"{"IpfsHash": "QmXYZ", "PinSize": 12, "Timestamp": "2025-03-01T12:00:00Z"}"#,
        )
        .expect("deserialize");
        assert_eq!(parsed.ipfs_hash, "QmXYZ");
    }

    #[test]
    fn gateway_url_rendering() {
        assert_eq!(
            client().gateway_url("QmXYZ"),
            "https://gateway.pinata.cloud/ipfs/QmXYZ"
        );
    }

    #[test]
    fn gateway_trailing_slash_normalized() {
        let config = PinataConfig {
            gateway: "https://gw.example/".into(),
            ..PinataConfig::default()
        };
        let client = PinataClient::new(&config, "k".into(), "s".into()).unwrap();
        assert_eq!(client.gateway_url("Qm1"), "https://gw.example/ipfs/Qm1");
    }

    #[test]
    fn invalid_base_url_rejected() {
        let config = PinataConfig {
            base_url: "not a url".into(),
            ..PinataConfig::default()
        };
        let err = PinataClient::new(&config, "k".into(), "s".into()).unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn endpoint_joins_pinning_paths() {
        let url = client().endpoint("/pinning/pinJSONToIPFS").unwrap();
        assert_eq!(url.as_str(), "https://api.pinata.cloud/pinning/pinJSONToIPFS");
    }
}
