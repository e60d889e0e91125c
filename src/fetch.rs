//! HTTP access to the sspai API and image CDN.
//!
//! Blocking `reqwest` client sending the browser-like headers the site
//! expects. Every API response is wrapped in an `{ "error": 0, "data": ... }`
//! envelope; a non-zero `error` becomes [`Error::Api`].

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, REFERER, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::crawl::ArticleSource;
use crate::error::{Error, Result};
use crate::saver::ImageSource;

/// Base URL of the public API.
pub const API_BASE: &str = "https://sspai.com/api/v1";

const FEED_PATH: &str = "article/index/page/get";
const DETAIL_PATH: &str = "article/info/get";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Response envelope of the sspai API.
#[derive(Debug, Deserialize)]
struct Envelope {
    error: i64,
    #[serde(default)]
    data: Value,
}

/// Blocking client for feed pages, article details, and images.
#[derive(Debug, Clone)]
pub struct SspaiClient {
    client: Client,
    api_base: String,
}

impl SspaiClient {
    /// Creates a client against [`API_BASE`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] when the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_base(API_BASE)
    }

    /// Creates a client against another API base (e.g. a local mirror).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] when the HTTP client cannot be built.
    pub fn with_base(api_base: &str) -> Result<Self> {
        let client = Client::builder()
            .default_headers(default_headers())
            .timeout(TIMEOUT)
            .build()
            .map_err(http_error)?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        Url::parse_with_params(&format!("{}/{path}", self.api_base), params)
            .map_err(|e| Error::Http(format!("invalid endpoint {path}: {e}")))
    }

    fn get_data(&self, url: Url) -> Result<Value> {
        let endpoint = url.path().to_string();
        let body = self
            .client
            .get(url)
            .send()
            .and_then(Response::error_for_status)
            .and_then(Response::bytes)
            .map_err(http_error)?;
        let envelope: Envelope = serde_json::from_slice(&body)?;
        if envelope.error != 0 {
            return Err(Error::Api {
                code: envelope.error,
                message: endpoint,
            });
        }
        Ok(envelope.data)
    }
}

impl ArticleSource for SspaiClient {
    fn feed_page(&self, limit: usize, offset: usize) -> Result<Vec<Value>> {
        let url = self.endpoint(
            FEED_PATH,
            &[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("created_at", "0".to_string()),
            ],
        )?;
        match self.get_data(url)? {
            Value::Array(entries) => Ok(entries),
            Value::Null => Ok(Vec::new()),
            other => Err(Error::MalformedPayload(format!(
                "feed data is not a list: {other}"
            ))),
        }
    }

    fn article_detail(&self, id: i64) -> Result<Option<Value>> {
        let url = self.endpoint(DETAIL_PATH, &[("id", id.to_string()), ("view", "second".to_string())])?;
        match self.get_data(url)? {
            Value::Null => Ok(None),
            data => Ok(Some(data)),
        }
    }
}

impl ImageSource for SspaiClient {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(Response::error_for_status)
            .map_err(http_error)?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(Error::Http(format!(
                "{url} is not an image (content type {content_type:?})"
            )));
        }

        Ok(response.bytes().map_err(http_error)?.to_vec())
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"),
    );
    headers.insert(REFERER, HeaderValue::from_static("https://sspai.com/"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("image/avif,image/webp,image/apng,image/*,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9"));
    headers
}

#[allow(clippy::needless_pass_by_value)]
fn http_error(e: reqwest::Error) -> Error {
    Error::Http(e.to_string())
}
