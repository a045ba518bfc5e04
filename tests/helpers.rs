/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use async_trait::async_trait;
use bytes::Bytes;
use onfido::v2::{ApiRequest, ApiResponse, Client, OnfidoError, Transport};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, LINK};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

pub(crate) const BASE_URL: &str = "https://stub.onfido.test/v2/";

#[allow(dead_code)]
#[derive(Clone)]
pub(crate) enum Reply {
    Json(u16, String),
    Page(String, Option<String>),
    Fail(String),
    // Cancels the token then never answers
    Hang(CancellationToken),
}

/// Serves canned replies keyed by `path?query` and records every request
#[derive(Debug, Default)]
pub(crate) struct StubTransport {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl std::fmt::Debug for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Json(status, _) => write!(f, "Json({status})"),
            Reply::Page(_, next) => write!(f, "Page(next: {next:?})"),
            Reply::Fail(msg) => write!(f, "Fail({msg})"),
            Reply::Hang(_) => write!(f, "Hang"),
        }
    }
}

#[allow(dead_code)]
impl StubTransport {
    pub(crate) fn reply(&self, path_and_query: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert(path_and_query.to_string(), reply);
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn key(request: &ApiRequest) -> String {
    match request.url.query() {
        Some(q) => format!("{}?{}", request.url.path(), q),
        None => request.url.path().to_string(),
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, OnfidoError> {
        let reply = self.replies.lock().unwrap().get(&key(&request)).cloned();
        self.requests.lock().unwrap().push(request.clone());

        let mut headers = HeaderMap::new();
        let (status, body) = match reply {
            Some(Reply::Json(status, body)) => (status, body),
            Some(Reply::Page(body, next)) => {
                if let Some(next) = next {
                    let link = format!(r#"<{next}>; rel="next""#);
                    headers.insert(LINK, HeaderValue::from_str(&link).unwrap());
                }
                (200, body)
            }
            Some(Reply::Fail(msg)) => {
                return Err(OnfidoError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    msg,
                )));
            }
            Some(Reply::Hang(token)) => {
                token.cancel();
                futures::future::pending::<()>().await;
                unreachable!()
            }
            None => (
                404,
                r#"{"error":{"type":"resource_not_found","message":"The requested resource could not be found"}}"#
                    .to_string(),
            ),
        };
        Ok(ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers,
            body: Bytes::from(body),
        })
    }
}

pub(crate) fn stub_client() -> (Client, Arc<StubTransport>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let transport = Arc::new(StubTransport::default());
    let client = Client::with_transport(BASE_URL, transport.clone()).unwrap();
    (client, transport)
}
