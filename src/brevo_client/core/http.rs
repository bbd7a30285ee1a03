use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::types::BrevoError;

use super::super::api::ApiErrorBody;
use super::super::helpers::ApiKey;

const API_KEY_HEADER: &str = "api-key";

/// Thin reqwest wrapper that knows the Brevo base URL and error body format.
#[derive(Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self, BrevoError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(BrevoError::Http)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_json<T>(&self, path: &str, api_key: &ApiKey) -> Result<T, BrevoError>
    where
        T: DeserializeOwned,
    {
        self.get_json_with_query(path, api_key, &()).await
    }

    pub async fn get_json_with_query<T, Q>(
        &self,
        path: &str,
        api_key: &ApiKey,
        query: &Q,
    ) -> Result<T, BrevoError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        let response = self.send(request, path, api_key).await?;
        response.json::<T>().await.map_err(BrevoError::Http)
    }

    /// GET with a filter query followed by the cursor query.
    pub async fn get_page<T, F, C>(
        &self,
        path: &str,
        api_key: &ApiKey,
        filter: &F,
        cursor: &C,
    ) -> Result<T, BrevoError>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
        C: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(filter).query(cursor);
        let response = self.send(request, path, api_key).await?;
        response.json::<T>().await.map_err(BrevoError::Http)
    }

    pub async fn post_json<T, B>(
        &self,
        path: &str,
        api_key: &ApiKey,
        body: &B,
    ) -> Result<T, BrevoError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let response = self.send_post(path, api_key, body).await?;
        let bytes = response.bytes().await.map_err(BrevoError::Http)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// POST whose response body is irrelevant to the caller.
    pub async fn post_unit<B>(&self, path: &str, api_key: &ApiKey, body: &B) -> Result<(), BrevoError>
    where
        B: Serialize + ?Sized,
    {
        self.send_post(path, api_key, body).await?;
        Ok(())
    }

    async fn send_post<B>(&self, path: &str, api_key: &ApiKey, body: &B) -> Result<Response, BrevoError>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .http
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .json(body);
        self.send(request, path, api_key).await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        path: &str,
        api_key: &ApiKey,
    ) -> Result<Response, BrevoError> {
        let response = request
            .header(API_KEY_HEADER, api_key.expose())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(BrevoError::Http)?;

        let status = response.status();
        debug!(path, status = status.as_u16(), "Brevo response");
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ApiErrorBody>(&text).ok();
        let message = body
            .as_ref()
            .and_then(|b| b.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        Err(BrevoError::Api {
            path: path.to_string(),
            status: status.as_u16(),
            code: body.and_then(|b| b.code),
            message,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
