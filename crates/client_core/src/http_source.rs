//! `DocumentSource` over the store's REST binding:
//! `GET|PATCH {base}/collections/{name}[/{id}]`.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::error::{ApiError, ApiException, ErrorCode};
use tracing::{info, warn};
use url::Url;

use crate::{
    error::DataError,
    source::{DocumentSource, Record},
};

pub struct HttpDocumentSource {
    http: Client,
    base_url: Url,
}

impl HttpDocumentSource {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid store url '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("store url '{base_url}' cannot be used as a base"));
        }
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("collections").extend(segments);
        }
        url
    }
}

fn transport(err: reqwest::Error) -> DataError {
    DataError::NetworkFailure(err.to_string())
}

async fn error_from_response(response: Response, target: String) -> DataError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let api_error = serde_json::from_str::<ApiError>(&body).ok();

    if status == StatusCode::NOT_FOUND {
        return DataError::NotFound(target);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return DataError::Unauthenticated;
    }

    let rejected = status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY;
    match api_error {
        Some(api_error) if rejected || api_error.code == ErrorCode::Validation => {
            DataError::ValidationFailure(api_error.message)
        }
        Some(api_error) => ApiException::from(api_error).into(),
        None if rejected && !body.trim().is_empty() => {
            DataError::ValidationFailure(body.trim().to_string())
        }
        None => DataError::NetworkFailure(format!("store responded with {status} for {target}")),
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch_collection(&self, name: &str) -> Result<Vec<Record>, DataError> {
        let response = self
            .http
            .get(self.endpoint(&[name]))
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            let err = error_from_response(response, name.to_string()).await;
            warn!(collection = name, error = %err, "store: collection fetch failed");
            return Err(err);
        }
        response
            .json::<Vec<Record>>()
            .await
            .map_err(|e| DataError::decode(name, e))
    }

    async fn fetch_by_id(&self, collection: &str, id: &str) -> Result<Record, DataError> {
        let response = self
            .http
            .get(self.endpoint(&[collection, id]))
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            let err = error_from_response(response, format!("{collection}/{id}")).await;
            warn!(collection, id, error = %err, "store: record fetch failed");
            return Err(err);
        }
        response
            .json::<Record>()
            .await
            .map_err(|e| DataError::decode(collection, e))
    }

    async fn write_record(
        &self,
        collection: &str,
        id: &str,
        patch: Record,
    ) -> Result<(), DataError> {
        info!(collection, id, "store: writing record");
        let response = self
            .http
            .patch(self.endpoint(&[collection, id]))
            .json(&patch)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            let err = error_from_response(response, format!("{collection}/{id}")).await;
            warn!(collection, id, error = %err, "store: write rejected");
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/http_source_tests.rs"]
mod tests;
