//! HTTP transport abstraction for diagnosis submission.
//!
//! The client only needs one operation: POST a body and read back the status
//! and body bytes. [`ReqwestTransport`] talks to the real key server;
//! [`memory::ScriptedTransport`] replays canned responses in tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Result, SubmitError};

/// An outgoing POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response as seen by the client: status code and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response with a JSON body.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport trait for posting submission requests.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform exactly one POST. Implementations must not retry.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).post(request).await
    }
}

/// Transport backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::ClientSetup(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify_reqwest_error)?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn classify_reqwest_error(e: reqwest::Error) -> SubmitError {
    if e.is_timeout() {
        SubmitError::Timeout(e.to_string())
    } else if e.is_builder() {
        SubmitError::InvalidEndpoint(e.to_string())
    } else {
        SubmitError::TransportError(e.to_string())
    }
}

/// A scripted transport for testing.
///
/// Responses are returned in the order they were queued; every request is
/// recorded for later inspection.
pub mod memory {
    use super::*;
    use std::collections::VecDeque;
    use tokio::sync::Mutex;

    /// One canned reply.
    #[derive(Debug, Clone)]
    pub enum Scripted {
        Respond(HttpResponse),
        /// Fail as if the network were unreachable.
        Unreachable(String),
        /// Fail as if the request timed out.
        TimedOut,
    }

    /// In-memory transport that replays queued replies.
    #[derive(Debug, Default)]
    pub struct ScriptedTransport {
        replies: Mutex<VecDeque<Scripted>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a transport that answers the first request with `reply`.
        pub fn replying(reply: Scripted) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from([reply])),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub async fn push(&self, reply: Scripted) {
            self.replies.lock().await.push_back(reply);
        }

        /// Every request received so far.
        pub async fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().await.clone()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().await.push(request);

            match self.replies.lock().await.pop_front() {
                Some(Scripted::Respond(response)) => Ok(response),
                Some(Scripted::Unreachable(reason)) => Err(SubmitError::TransportError(reason)),
                Some(Scripted::TimedOut) => {
                    Err(SubmitError::Timeout("scripted timeout".into()))
                }
                None => Err(SubmitError::TransportError("no scripted reply".into())),
            }
        }
    }
}
