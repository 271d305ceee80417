use std::sync::Arc;

use reqwest::header::HeaderValue;
use reqwest::{Method, Request};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{self, RateLimiter};
use crate::resources::{AssetService, CompanyService, MetricsService, UserService};

/// Entry point for the Planhat API.
///
/// Clones share the same rate limiter, so one limiter governs every request
/// made with a given credential no matter how many handles exist.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<Config>,
    auth: HeaderValue,
    http: reqwest::Client,
    limiter: Arc<RateLimiter>,
}

impl Client {
    /// Builds a client with the default transport (rustls, configured timeout).
    pub fn new(config: Config) -> Result<Self> {
        let http = http::build_client(&config)?;
        Self::with_http_client(config, http)
    }

    /// Builds a client around a caller-supplied transport.
    ///
    /// Validates `config`; every constructor ends up here.
    pub fn with_http_client(config: Config, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        let auth = http::auth_header(&config.api_key)?;
        let limiter = RateLimiter::new(config.rate_per_second, config.burst);
        Ok(Self {
            config: Arc::new(config),
            auth,
            http,
            limiter: Arc::new(limiter),
        })
    }

    /// Shorthand for `Client::new(Config::from_env()?)`.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    pub fn metrics_url(&self) -> &str {
        self.config.metrics_url.trim_end_matches('/')
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Swaps the transport. The rate limiter and credentials are unchanged.
    pub fn set_http_client(&mut self, http: reqwest::Client) {
        self.http = http;
    }

    pub fn companies(&self) -> CompanyService<'_> {
        CompanyService::new(self)
    }

    pub fn assets(&self) -> AssetService<'_> {
        AssetService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    pub fn metrics(&self) -> MetricsService<'_> {
        MetricsService::new(self)
    }

    /// Sends a prepared request and decodes the JSON reply into `T`.
    ///
    /// `Ok(None)` means the API answered `201 Created`, whose body is not read.
    /// Dropping the returned future cancels the call.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<Option<T>> {
        self.execute_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Like [`execute`](Self::execute), aborting the rate-limit wait or the
    /// in-flight exchange with [`Error::Cancelled`] when `cancel` fires.
    pub async fn execute_with_cancel<T: DeserializeOwned>(
        &self,
        request: Request,
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        http::execute(&self.http, &self.limiter, &self.auth, request, cancel).await
    }

    /// Starts a request against this client's transport. Headers are added by `execute`.
    pub fn request(&self, method: Method, url: &str) -> Result<Request> {
        let url = url::Url::parse(url)?;
        Ok(Request::new(method, url))
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
    ) -> Result<Option<T>> {
        let request = self.request(method, url)?;
        self.execute(request).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(Error::Encode)?;
        let mut request = self.request(method, url)?;
        *request.body_mut() = Some(payload.into());
        self.execute(request).await
    }
}
