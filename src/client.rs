//! HTTP client for the cat image/voting API

use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::error;

use crate::config::Config;
use crate::error::{CatteryError, Result};
use crate::model::{FavouritePayload, Image, Vote, VoteDirection, VotePayload};

/// The remote API surface, one method per endpoint
///
/// Behind a trait so the service layer can run against a mock in tests.
pub trait CatApi {
    fn list_images(&self, limit: u32) -> impl std::future::Future<Output = Result<Vec<Image>>>;
    fn list_votes(&self) -> impl std::future::Future<Output = Result<Vec<Vote>>>;
    fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<()>>;
    fn delete_image(&self, image_id: &str) -> impl std::future::Future<Output = Result<()>>;
    fn cast_vote(
        &self,
        image_id: &str,
        direction: VoteDirection,
    ) -> impl std::future::Future<Output = Result<()>>;
    fn add_favourite(&self, image_id: &str) -> impl std::future::Future<Output = Result<()>>;
    fn remove_favourite(&self, favourite_id: i64)
        -> impl std::future::Future<Output = Result<()>>;
}

/// reqwest-backed [`CatApi`] implementation
///
/// Attaches the static `x-api-key` header to every request. No retries; a
/// call either succeeds once or fails once.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: Config,
    api_key: String,
}

impl HttpClient {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let api_key = config.require_api_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.config.endpoint_url(path))
            .header("x-api-key", &self.api_key)
    }

    /// Turn a non-success response into an error, logging status and body
    ///
    /// The error message is the status text, falling back to the body when
    /// the status has no canonical reason.
    async fn fail(operation: &str, response: Response) -> CatteryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        error!(%status, body = %body, "{} endpoint failed", operation);

        let message = match status.canonical_reason() {
            Some(reason) if !reason.is_empty() => reason.to_string(),
            _ => body,
        };
        CatteryError::api(status.as_u16(), message)
    }

    async fn check(operation: &str, response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::fail(operation, response).await)
        }
    }
}

impl CatApi for HttpClient {
    async fn list_images(&self, limit: u32) -> Result<Vec<Image>> {
        let response = self
            .request(reqwest::Method::GET, "/v1/images/")
            .query(&[("limit", limit)])
            .send()
            .await?;
        let response = Self::check("Get cats", response).await?;
        Ok(response.json().await?)
    }

    async fn list_votes(&self) -> Result<Vec<Vote>> {
        let response = self
            .request(reqwest::Method::GET, "/v1/votes")
            .send()
            .await?;
        let response = Self::check("Get votes", response).await?;
        Ok(response.json().await?)
    }

    async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> Result<()> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .request(reqwest::Method::POST, "/v1/images/upload")
            .multipart(form)
            .send()
            .await?;
        Self::check("Post cat", response).await?;
        Ok(())
    }

    async fn delete_image(&self, image_id: &str) -> Result<()> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/v1/images/{}", image_id))
            .send()
            .await?;
        Self::check("Delete cat", response).await?;
        Ok(())
    }

    async fn cast_vote(&self, image_id: &str, direction: VoteDirection) -> Result<()> {
        let payload = VotePayload {
            image_id: image_id.to_string(),
            value: direction.value(),
        };

        let response = self
            .request(reqwest::Method::POST, "/v1/votes")
            .json(&payload)
            .send()
            .await?;
        Self::check("Cat vote", response).await?;
        Ok(())
    }

    async fn add_favourite(&self, image_id: &str) -> Result<()> {
        let payload = FavouritePayload {
            image_id: image_id.to_string(),
        };

        let response = self
            .request(reqwest::Method::POST, "/v1/favourites")
            .json(&payload)
            .send()
            .await?;
        Self::check("Favourite cat", response).await?;
        Ok(())
    }

    async fn remove_favourite(&self, favourite_id: i64) -> Result<()> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/v1/favourites/{}", favourite_id),
            )
            .send()
            .await?;
        Self::check("UnFavourite cat", response).await?;
        Ok(())
    }
}
