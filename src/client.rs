use crate::errors::ClientError;
use crate::models::{Activity, NewActivity, NewPrize, Prize, VersionResponse};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub type Result<T> = std::result::Result<T, ClientError>;

/// The REST surface the front-end consumes.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn version(&self) -> Result<String>;

    async fn list_activities(&self) -> Result<Vec<Activity>>;
    async fn create_activity(&self, new_activity: &NewActivity) -> Result<Activity>;
    async fn delete_activity(&self, id: &str) -> Result<()>;

    async fn list_prizes(&self) -> Result<Vec<Prize>>;
    async fn create_prize(&self, new_prize: &NewPrize) -> Result<Prize>;
    async fn update_prize(&self, id: &str, prize: &NewPrize) -> Result<Prize>;
    async fn delete_prize(&self, id: &str) -> Result<()>;
}

/// `Backend` over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|err| ClientError::Init(err.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {url}");
        (self.client.request(method, &url), url)
    }

    async fn send(method: Method, builder: RequestBuilder, url: String) -> Result<Response> {
        let response = builder.send().await.map_err(|source| ClientError::Transport {
            url: url.clone(),
            source,
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                method: method.to_string(),
                url,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(response: Response, url: String) -> Result<T> {
        response
            .json()
            .await
            .map_err(|source| ClientError::Transport { url, source })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (builder, url) = self.request(Method::GET, path);
        let response = Self::send(Method::GET, builder, url.clone()).await?;
        Self::json(response, url).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let (builder, url) = self.request(Method::DELETE, path);
        Self::send(Method::DELETE, builder, url).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn version(&self) -> Result<String> {
        let body: VersionResponse = self.get("/version").await?;
        Ok(body.version)
    }

    async fn list_activities(&self) -> Result<Vec<Activity>> {
        self.get("/activities").await
    }

    async fn create_activity(&self, new_activity: &NewActivity) -> Result<Activity> {
        let (builder, url) = self.request(Method::POST, "/activities");
        let response = Self::send(Method::POST, builder.json(new_activity), url.clone()).await?;
        Self::json(response, url).await
    }

    async fn delete_activity(&self, id: &str) -> Result<()> {
        self.delete(&format!("/activities/{id}")).await
    }

    async fn list_prizes(&self) -> Result<Vec<Prize>> {
        self.get("/prizes").await
    }

    async fn create_prize(&self, new_prize: &NewPrize) -> Result<Prize> {
        let (builder, url) = self.request(Method::POST, "/prizes");
        let response = Self::send(Method::POST, builder.json(new_prize), url.clone()).await?;
        Self::json(response, url).await
    }

    async fn update_prize(&self, id: &str, prize: &NewPrize) -> Result<Prize> {
        let path = format!("/prizes/{id}");
        let (builder, url) = self.request(Method::PUT, &path);
        let response = Self::send(Method::PUT, builder.json(prize), url.clone()).await?;
        Self::json(response, url).await
    }

    async fn delete_prize(&self, id: &str) -> Result<()> {
        self.delete(&format!("/prizes/{id}")).await
    }
}
