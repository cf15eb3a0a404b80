//! HTTP/JSON binding of [`RemoteBankingClient`].
//!
//! Endpoints, relative to the configured base URL:
//! - `POST login` with `{"id","password"}` → `{"granted"}`
//! - `POST transfer` with `{"sender","recipient","amount"}` → `{"result"}`
//! - `GET accounts/{id}` → `[{"id","main","balance"}]`
//!
//! Path segments are percent-encoded, so an identifier never adds segments.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::core::model::{Account, Credentials, TransferRequest};
use crate::remote::types::{AccountResponse, LoginBody, LoginResponse, TransferBody, TransferResponse};
use crate::remote::{RemoteBankingClient, RemoteError};

pub struct HttpBankingClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBankingClient {
    /// `timeout` bounds each request end to end. The client itself never retries.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let raw = base_url.into();
        let base_url = Url::parse(&raw)
            .map_err(|e| RemoteError::Network(format!("invalid base URL {raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::Network(format!("invalid base URL {raw}")));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        info!("Banking client targeting {base_url} (timeout {timeout:?})");
        Ok(Self { base_url, client })
    }

    /// Appends `segments` to the base URL, encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends the request and decodes a JSON body, mapping each way it can
    /// fail onto [`RemoteError`].
    async fn exchange<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Banking service response status: {status}");

        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            warn!("Banking service error: {} - {}", status.as_u16(), message);
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Undecodable banking response: {e}");
            RemoteError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl RemoteBankingClient for HttpBankingClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn login(&self, credentials: &Credentials) -> Result<bool, RemoteError> {
        let url = self.url(&["login"]);
        debug!("POST {url}");
        let request = self
            .client
            .post(url)
            .json(&LoginBody::from(credentials));
        let response: LoginResponse = self.exchange(request).await?;
        Ok(response.granted)
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<bool, RemoteError> {
        let url = self.url(&["transfer"]);
        debug!("POST {url}");
        let request = self
            .client
            .post(url)
            .json(&TransferBody::from(request));
        let response: TransferResponse = self.exchange(request).await?;
        Ok(response.result)
    }

    async fn get_account(&self, owner_id: &str) -> Result<Vec<Account>, RemoteError> {
        let url = self.url(&["accounts", owner_id]);
        debug!("GET {url}");
        let response: Vec<AccountResponse> = self.exchange(self.client.get(url)).await?;
        Ok(response.into_iter().map(Account::from).collect())
    }
}
