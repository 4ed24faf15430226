use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::core::strong_types::{EventId, UserId};
use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::ResourceClient;
use crate::models::{Category, Creator, Event, NewEvent};

/// JSON-over-HTTP resource client against a fixed base URL
#[derive(Clone)]
pub struct HttpResourceClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResourceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: impl AsRef<str>) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path.as_ref()))
    }

    async fn recv_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = recv_raw(request).await?;
        Ok(response.json().await?)
    }
}

/// Send a request and turn a non-2xx status into an error
pub async fn recv_raw(request: RequestBuilder) -> AppResult<Response> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|value| value["error"].as_str().map(str::to_owned))
            .unwrap_or(text);
        return Err(AppError::ResponseStatus(status.as_u16(), detail));
    }
    Ok(response)
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn list_events(&self) -> AppResult<Vec<Event>> {
        debug!("GET {}/events", self.base_url);
        self.recv_json(self.request(Method::GET, "/events")).await
    }

    async fn get_event(&self, id: &EventId) -> AppResult<Event> {
        debug!("GET {}/events/{}", self.base_url, id);
        self.recv_json(self.request(Method::GET, format!("/events/{}", id)))
            .await
    }

    async fn create_event(&self, payload: &NewEvent) -> AppResult<Event> {
        debug!("POST {}/events", self.base_url);
        self.recv_json(self.request(Method::POST, "/events").json(payload))
            .await
    }

    async fn update_event(&self, id: &EventId, record: &Event) -> AppResult<Event> {
        debug!("PUT {}/events/{}", self.base_url, id);
        self.recv_json(
            self.request(Method::PUT, format!("/events/{}", id))
                .json(record),
        )
        .await
    }

    async fn delete_event(&self, id: &EventId) -> AppResult<()> {
        debug!("DELETE {}/events/{}", self.base_url, id);
        recv_raw(self.request(Method::DELETE, format!("/events/{}", id))).await?;
        Ok(())
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        debug!("GET {}/categories", self.base_url);
        self.recv_json(self.request(Method::GET, "/categories"))
            .await
    }

    async fn get_user(&self, id: UserId) -> AppResult<Creator> {
        debug!("GET {}/users/{}", self.base_url, id);
        self.recv_json(self.request(Method::GET, format!("/users/{}", id)))
            .await
    }
}
