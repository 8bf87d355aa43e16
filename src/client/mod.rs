//! Typed HTTP client for the v1 routes.
//!
//! Filters become query strings carrying only the fields that are set;
//! responses are decoded back into domain entities.

mod error;
mod item;
mod link;
mod player;
mod room;
mod user;

pub use error::ClientError;

use error::transport;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

use crate::model::Page;
use crate::response::ErrorBody;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Client for the server at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport("build http client"))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn collection(&self, entity: &str) -> String {
        self.url(&format!("/v1/{}", entity))
    }

    fn member(&self, entity: &str, id: Uuid) -> String {
        self.url(&format!("/v1/{}/{}", entity, id))
    }

    /// Send and decode a 200/201 JSON body.
    async fn send<T: DeserializeOwned>(&self, operation: &'static str, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await.map_err(transport(operation))?;
        if !is_success(resp.status()) {
            return Err(api_error(operation, resp).await);
        }
        resp.json::<T>().await.map_err(transport(operation))
    }

    /// Send and discard the body of a 200/201 response.
    async fn send_empty(&self, operation: &'static str, req: RequestBuilder) -> Result<(), ClientError> {
        let resp = req.send().await.map_err(transport(operation))?;
        if !is_success(resp.status()) {
            return Err(api_error(operation, resp).await);
        }
        Ok(())
    }
}

fn is_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

async fn api_error(operation: &'static str, resp: Response) -> ClientError {
    let status = resp.status();
    let body = resp.bytes().await.ok();
    let detail = match body.as_deref().and_then(|b| serde_json::from_slice::<ErrorBody>(b).ok()) {
        Some(err) => err.detail,
        None => format!(
            "{}, {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown status")
        ),
    };
    ClientError::Api {
        operation,
        status: status.as_u16(),
        detail,
    }
}

/// Query pairs for list calls; unset fields are skipped.
#[derive(Default)]
struct ListQuery(Vec<(&'static str, String)>);

impl ListQuery {
    fn text(mut self, name: &'static str, value: &Option<String>) -> Self {
        if let Some(v) = value.as_ref().filter(|v| !v.is_empty()) {
            self.0.push((name, v.clone()));
        }
        self
    }

    fn id(mut self, name: &'static str, value: Option<Uuid>) -> Self {
        if let Some(id) = value {
            self.0.push((name, id.to_string()));
        }
        self
    }

    fn page(mut self, page: Page) -> Self {
        if page.offset > 0 {
            self.0.push(("offset", page.offset.to_string()));
        }
        if page.limit > 0 {
            self.0.push(("limit", page.limit.to_string()));
        }
        self
    }

    fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}
