//! Messaging service: one POST per delivery mode on the shared [`LineClient`].

use crate::client::LineClient;
use crate::messaging::MessageEndpoint;
use serde_json::Value;

/// Failure of a single gateway call. Returned to the caller as-is; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    /// Connect failure, timeout or I/O error.
    #[error("line request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success status; `body` is the upstream error body verbatim.
    #[error("line api error: {status} {body}")]
    Api { status: u16, body: String },
    /// Success status but the body is not JSON.
    #[error("line response is not valid json: {0}")]
    Decode(#[from] serde_json::Error),
}

impl MessagingError {
    /// Upstream HTTP status, when the upstream answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            MessagingError::Api { status, .. } => Some(*status),
            MessagingError::Transport(e) => e.status().map(|s| s.as_u16()),
            MessagingError::Decode(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, MessagingError::Transport(e) if e.is_timeout())
    }
}

/// Gateway over the LINE message delivery endpoints.
#[derive(Debug, Clone)]
pub struct MessagingService {
    client: LineClient,
}

impl MessagingService {
    pub fn new(client: LineClient) -> Self {
        Self { client }
    }

    /// POST /message/reply
    pub async fn send_reply(&self, request: &Value) -> Result<Value, MessagingError> {
        self.send(MessageEndpoint::Reply, request).await
    }

    /// POST /message/push
    pub async fn send_push(&self, request: &Value) -> Result<Value, MessagingError> {
        self.send(MessageEndpoint::Push, request).await
    }

    /// POST /message/multicast
    pub async fn send_multicast(&self, request: &Value) -> Result<Value, MessagingError> {
        self.send(MessageEndpoint::Multicast, request).await
    }

    /// POST /message/broadcast
    pub async fn send_broadcast(&self, request: &Value) -> Result<Value, MessagingError> {
        self.send(MessageEndpoint::Broadcast, request).await
    }

    /// POST /message/narrowcast
    pub async fn send_narrowcast(&self, request: &Value) -> Result<Value, MessagingError> {
        self.send(MessageEndpoint::Narrowcast, request).await
    }

    /// Forward `request` to the endpoint's path and return the upstream JSON. Logs the response
    /// at info or the error at error level. Dropping the future aborts the request.
    pub async fn send(
        &self,
        endpoint: MessageEndpoint,
        request: &Value,
    ) -> Result<Value, MessagingError> {
        match self.post(endpoint, request).await {
            Ok(response) => {
                log::info!("LINE API {} Response: {}", endpoint.label(), response);
                Ok(response)
            }
            Err(e) => {
                log::error!("Error sending {} message: {}", endpoint.name(), e);
                Err(e)
            }
        }
    }

    async fn post(&self, endpoint: MessageEndpoint, request: &Value) -> Result<Value, MessagingError> {
        log::debug!("POST {}", self.client.url(endpoint.path()));
        let res = self.client.post(endpoint.path()).json(request).send().await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = match res.text().await {
                Ok(body) => body,
                Err(e) => {
                    log::debug!("reading {} error body failed: {}", status, e);
                    String::new()
                }
            };
            return Err(MessagingError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = res.bytes().await?;
        // Some endpoints answer 200 with no body at all.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
