//! Transfer service HTTP client
//!
//! Talks to the scheduled-transfer REST service:
//! - GET    {base}/agendamentos?page&size&contaOrigem  returns a page envelope or a bare list
//! - POST   {base}/agendamentos                        returns the created transfer
//! - DELETE {base}/agendamentos/{id}

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::domain::result::{Error, Result, ServiceError};
use crate::domain::{ScheduledTransfer, TransferDraft, TransferId, ORIGIN_ACCOUNT_FIELD};
use crate::ports::{ListQuery, ListResponse, TransferService};

/// Collection path of scheduled transfers, relative to the base URL
const TRANSFERS_PATH: &str = "agendamentos";

/// HTTP implementation of [`TransferService`]
#[derive(Debug, Clone)]
pub struct HttpTransferService {
    client: Client,
    base_url: Url,
}

impl HttpTransferService {
    /// Build a client from explicit connection settings.
    ///
    /// With `with_credentials` set, cookies the service hands out are kept
    /// and replayed on every later call, like a browser session would.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "transfer service URL must be http(s): {}",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(origin) = &config.allowed_origin {
            let value = HeaderValue::from_str(origin)
                .map_err(|_| Error::config(format!("invalid allowed origin: {}", origin)))?;
            headers.insert(ORIGIN, value.clone());
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        if config.with_credentials {
            headers.insert(
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .cookie_store(config.with_credentials);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Map request errors to service errors
    fn map_request_error(error: reqwest::Error) -> ServiceError {
        if error.is_timeout() {
            ServiceError::transport("request timed out")
        } else if error.is_connect() {
            ServiceError::transport("unable to connect to the transfer service")
        } else {
            ServiceError::transport(error.to_string())
        }
    }

    /// Turn non-2xx responses into [`ServiceError::Status`]
    async fn check_response_status(response: Response) -> std::result::Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> std::result::Result<T, ServiceError> {
        let bytes = response.bytes().await.map_err(Self::map_request_error)?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::payload(e.to_string()))
    }
}

#[async_trait]
impl TransferService for HttpTransferService {
    async fn list(&self, query: &ListQuery) -> std::result::Result<ListResponse, ServiceError> {
        let url = self.endpoint(&[TRANSFERS_PATH]);
        debug!(%url, page = query.page, size = query.size, "listing scheduled transfers");

        let mut request = self
            .client
            .get(url)
            .query(&[("page", query.page), ("size", query.size)]);
        if let Some(account) = &query.origin_account {
            request = request.query(&[(ORIGIN_ACCOUNT_FIELD, account)]);
        }

        let response = request.send().await.map_err(Self::map_request_error)?;
        let response = Self::check_response_status(response).await?;
        Self::decode(response).await
    }

    async fn create(
        &self,
        draft: &TransferDraft,
    ) -> std::result::Result<ScheduledTransfer, ServiceError> {
        let url = self.endpoint(&[TRANSFERS_PATH]);
        debug!(%url, "creating scheduled transfer");

        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(Self::map_request_error)?;
        let response = Self::check_response_status(response).await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &TransferId) -> std::result::Result<(), ServiceError> {
        let url = self.endpoint(&[TRANSFERS_PATH, id.as_str()]);
        debug!(%url, "deleting scheduled transfer");

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(Self::map_request_error)?;
        Self::check_response_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_endpoint_appends_collection() {
        let client = HttpTransferService::new(&config("http://localhost:8081/transfer")).unwrap();
        assert_eq!(
            client.endpoint(&[TRANSFERS_PATH]).as_str(),
            "http://localhost:8081/transfer/agendamentos"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = HttpTransferService::new(&config("http://localhost:8081/transfer/")).unwrap();
        assert_eq!(
            client.endpoint(&[TRANSFERS_PATH, "12"]).as_str(),
            "http://localhost:8081/transfer/agendamentos/12"
        );
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let client = HttpTransferService::new(&config("http://localhost:8081")).unwrap();
        assert_eq!(
            client.endpoint(&[TRANSFERS_PATH, "a/b"]).as_str(),
            "http://localhost:8081/agendamentos/a%2Fb"
        );
    }

    #[test]
    fn test_reject_non_http_url() {
        let result = HttpTransferService::new(&config("ftp://example.com"));
        assert!(matches!(result, Err(Error::Config(_))));

        let result = HttpTransferService::new(&config("not a url"));
        assert!(matches!(result, Err(Error::Url(_))));
    }

    #[test]
    fn test_reject_invalid_origin_header() {
        let result = HttpTransferService::new(&ClientConfig {
            allowed_origin: Some("http://bad\norigin".to_string()),
            ..ClientConfig::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
