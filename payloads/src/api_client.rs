use crate::{AdDetails, Identifier};
use reqwest::StatusCode;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// Production address of the ad service.
pub const DEFAULT_ADDRESS: &str = "https://www.adsterix.xyz";

/// An API client for interfacing with the ad service.
#[derive(Debug, Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

impl Default for APIClient {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into().trim_end_matches('/').to_string(),
            inner_client: reqwest::Client::new(),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        self.inner_client.get(self.format_url(path)).send().await
    }
}

/// Methods on the ad service API
impl APIClient {
    /// Address the details for `identifier` are fetched from.
    pub fn ad_details_url(&self, identifier: &Identifier) -> String {
        self.format_url(&ad_details_path(identifier))
    }

    /// Fetch the ad currently occupying the slot keyed by `identifier`.
    pub async fn ad_details(
        &self,
        identifier: &Identifier,
    ) -> Result<AdDetails, ClientError> {
        tracing::debug!(%identifier, "fetching ad details");
        let response = self.empty_get(&ad_details_path(identifier)).await?;
        ok_body(response).await
    }
}

fn ad_details_path(identifier: &Identifier) -> String {
    format!("ads/cta-details/{identifier}")
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error("Failed to fetch: {}", .0.as_u16())]
    Status(StatusCode),
    #[error("{0}")]
    Network(#[from] reqwest::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error. The body of a failed response is never read.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::Status(response.status()));
    }
    Ok(response.json::<T>().await?)
}
