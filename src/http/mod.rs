pub mod rate_limit;

use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

pub use rate_limit::RateLimiter;

/// Upper bound on items per bulk upsert call. The API enforces it, this crate does not.
pub const MAX_BULK_ITEMS: usize = 50_000;

pub fn build_client(cfg: &Config) -> Result<Client> {
    let mut default_headers = HeaderMap::new();
    let ua = HeaderValue::from_str(&cfg.user_agent)
        .map_err(|_| Error::Config(format!("invalid user agent: {:?}", cfg.user_agent)))?;
    default_headers.insert(USER_AGENT, ua);
    // Authorization is injected per request in `execute`.
    let client = Client::builder()
        .default_headers(default_headers)
        .timeout(cfg.timeout)
        .use_rustls_tls()
        .build()?;
    Ok(client)
}

pub(crate) fn auth_header(api_key: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| Error::Config("api key contains characters not allowed in a header".into()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Maps a response status to an error kind, or `None` when the body should be read.
///
/// Anything in 200..=399 is success. 404 maps to `NotFound`.
pub fn map_status_to_error(status: StatusCode) -> Option<ErrorKind> {
    if (200..400).contains(&status.as_u16()) {
        return None;
    }
    let kind = match status {
        StatusCode::BAD_REQUEST => ErrorKind::BadRequest,
        StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
        StatusCode::FORBIDDEN => ErrorKind::Forbidden,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::INTERNAL_SERVER_ERROR => ErrorKind::InternalError,
        _ => ErrorKind::Unknown,
    };
    Some(kind)
}

/// The shared dispatch path: headers, rate limit, send, status check, decode.
///
/// Returns `Ok(None)` for `201 Created` without touching the body, since some
/// creation endpoints reply with nothing usable.
pub(crate) async fn execute<T: DeserializeOwned>(
    client: &Client,
    limiter: &RateLimiter,
    auth: &HeaderValue,
    mut request: Request,
    cancel: &CancellationToken,
) -> Result<Option<T>> {
    let headers = request.headers_mut();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, auth.clone());

    if !limiter.try_acquire() {
        limiter.acquire(cancel).await?;
    }

    tokio::select! {
        _ = cancel.cancelled() => Err(Error::Cancelled),
        out = send_and_decode(client, request) => out,
    }
}

async fn send_and_decode<T: DeserializeOwned>(
    client: &Client,
    request: Request,
) -> Result<Option<T>> {
    let method = request.method().clone();
    let path = request.url().path().to_string();

    // The response, and its body, drop on every return below.
    let res = client.execute(request).await?;
    let status = res.status();
    debug!("{} {} -> {}", method, path, status);

    if let Some(kind) = map_status_to_error(status) {
        if kind == ErrorKind::Unknown {
            warn!("{} {} returned unexpected status {}", method, path, status);
        }
        return Err(Error::Api(kind));
    }
    if status == StatusCode::CREATED {
        return Ok(None);
    }
    let body = res.bytes().await?;
    serde_json::from_slice::<T>(&body)
        .map(Some)
        .map_err(Error::Decode)
}

/// Replaces the query string of `url` with the set fields of `opts`, sorted by name.
///
/// `opts` must serialize to a flat object; unset (`None`) fields are skipped
/// by the option structs and never appear. Returns `url` unchanged, existing
/// query included, if nothing is set.
pub fn add_options<O: Serialize + ?Sized>(url: &str, opts: &O) -> Result<String> {
    let value = serde_json::to_value(opts).map_err(Error::Encode)?;
    let fields = match value {
        serde_json::Value::Null => return Ok(url.to_string()),
        serde_json::Value::Object(map) => map,
        other => {
            return Err(Error::Config(format!(
                "query options must be a struct, got {}",
                other
            )))
        }
    };

    let mut pairs: Vec<(String, String)> = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        let rendered = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            _ => {
                return Err(Error::Config(format!(
                    "query option {:?} must be a scalar",
                    key
                )))
            }
        };
        pairs.push((key, rendered));
    }
    if pairs.is_empty() {
        return Ok(url.to_string());
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let base = url.split_once('?').map_or(url, |(base, _)| base);
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish();
    Ok(format!("{}?{}", base, query))
}

/// Percent-encodes a single path segment (ids, alternate keys).
pub fn encode_path_segment(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}
