/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::OnfidoError;
use crate::v2::parsers::next_page_from_link;
use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Sends requests to the API and hands back the raw response.
///
/// [`HttpTransport`] is the implementation used against the real service. Anything else
/// (recorders, canned responses) can be injected through [`crate::v2::Client::with_transport`].
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, OnfidoError>;
}

/// A request shaped by the resource bindings
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    /// Value of the Accept header
    pub accept: &'static str,
    pub body: RequestBody,
}

pub const ACCEPT_JSON: &str = "application/json";
pub const ACCEPT_ANY: &str = "*/*";

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Multipart(MultipartForm),
}

/// multipart/form-data body description
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

#[derive(Debug, Clone)]
pub struct FilePart {
    pub name: String,
    pub file_name: String,
    pub content_type: String,
    pub content: Bytes,
}

impl MultipartForm {
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    /// Value of the first text field with this name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn into_reqwest(self) -> Result<reqwest::multipart::Form, OnfidoError> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.files {
            let file = reqwest::multipart::Part::bytes(part.content.to_vec())
                .file_name(part.file_name)
                .mime_str(&part.content_type)
                .map_err(|e| OnfidoError::Encoding(format!("file part `{}`: {e}", part.name)))?;
            form = form.part(part.name, file);
        }
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

/// Raw response handed back by a [`Transport`]
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// One page of a collection before decoding
#[derive(Debug, Clone)]
pub struct Page {
    pub body: Bytes,
    pub next: Option<Url>,
}

/// [`Transport`] that talks HTTPS to the service using token authentication.
#[derive(Clone)]
pub struct HttpTransport {
    api_token: String,
    user_agent: String,
    https_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(api_token: &str, timeout: Duration, user_agent: &str) -> Result<Self, OnfidoError> {
        let https_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_token: api_token.into(),
            user_agent: user_agent.into(),
            https_client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, OnfidoError> {
        let builder = self
            .https_client
            .request(request.method, request.url)
            .header(AUTHORIZATION, format!("Token token={}", self.api_token))
            .header(ACCEPT, request.accept)
            .header(USER_AGENT, self.user_agent.as_str());
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Multipart(form) => builder.multipart(form.into_reqwest()?),
        };
        let resp = builder.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_token", &"xxx")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Directly communicates with the API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, OnfidoError> {
        // Relative joins need the trailing slash or the last segment gets replaced
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        Ok(Self {
            base_url,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path (e.g. `live_photos/abc`) against the base url
    pub fn url_for(&self, path: &str) -> Result<Url, OnfidoError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Sends the request, racing it against the cancellation token. Non-2xx responses become
    /// [`OnfidoError::ApiResponse`].
    pub async fn execute(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, OnfidoError> {
        if cancel.is_cancelled() {
            return Err(OnfidoError::Cancelled);
        }
        debug!("{} {}", request.method, request.url);
        let resp = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(OnfidoError::Cancelled),
            resp = self.transport.send(request) => resp?,
        };
        if !resp.status.is_success() {
            let err = api_error(&resp);
            warn!("Api response error: {err}");
            return Err(err);
        }
        Ok(resp)
    }

    /// Performs a get request and decodes the JSON body
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        cancel: &CancellationToken,
    ) -> Result<T, OnfidoError> {
        let request = ApiRequest {
            method: Method::GET,
            url,
            accept: ACCEPT_JSON,
            body: RequestBody::Empty,
        };
        let resp = self.execute(request, cancel).await?;
        Ok(serde_json::from_slice(&resp.body)?)
    }

    /// Performs a get request returning the raw body of any content type
    pub async fn get_bytes(&self, url: Url, cancel: &CancellationToken) -> Result<Bytes, OnfidoError> {
        let request = ApiRequest {
            method: Method::GET,
            url,
            accept: ACCEPT_ANY,
            body: RequestBody::Empty,
        };
        Ok(self.execute(request, cancel).await?.body)
    }

    /// Retrieves one page of a collection along with the url of the following page.
    /// Relative Link targets resolve against the url of the page that returned them.
    pub async fn get_page(&self, url: Url, cancel: &CancellationToken) -> Result<Page, OnfidoError> {
        let request = ApiRequest {
            method: Method::GET,
            url: url.clone(),
            accept: ACCEPT_JSON,
            body: RequestBody::Empty,
        };
        let resp = self.execute(request, cancel).await?;
        let next = next_page_from_link(&resp.headers)
            .map(|next| url.join(&next))
            .transpose()?;
        Ok(Page {
            body: resp.body,
            next,
        })
    }

    /// Performs a multipart post and decodes the JSON body
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: MultipartForm,
        cancel: &CancellationToken,
    ) -> Result<T, OnfidoError> {
        let request = ApiRequest {
            method: Method::POST,
            url,
            accept: ACCEPT_JSON,
            body: RequestBody::Multipart(form),
        };
        let resp = self.execute(request, cancel).await?;
        Ok(serde_json::from_slice(&resp.body)?)
    }
}

// Error body returned by the API on failures
#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: Option<String>,
    fields: Option<serde_json::Value>,
}

fn api_error(resp: &ApiResponse) -> OnfidoError {
    let status = resp.status.as_u16();
    match serde_json::from_slice::<ErrorBody>(&resp.body) {
        Ok(body) => {
            let mut message = body.error.message.unwrap_or_default();
            if let Some(fields) = body.error.fields {
                message = format!("{message} {fields}");
            }
            OnfidoError::ApiResponse {
                status,
                error_type: body.error.error_type,
                message,
            }
        }
        Err(_) => OnfidoError::ApiResponse {
            status,
            error_type: None,
            message: String::from_utf8_lossy(&resp.body).into_owned(),
        },
    }
}
