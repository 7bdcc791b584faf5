use alloc::string::{String, ToString};
use serde::de::DeserializeOwned;

use crate::*;

/// Raw HTTP reply as handed over by the transport, before any interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decodes a success body, or turns a failure reply into a service error.
    ///
    /// A failure reply's `error` text is used verbatim when present, `fallback` otherwise. A success reply whose body
    /// does not decode counts as a transport error.
    pub fn decode<T: DeserializeOwned>(&self, fallback: &str) -> Result<T> {
        if self.is_success() {
            serde_json::from_str(&self.body).map_err(|err| {
                log::warn!("malformed reply ({}): {}", self.status, err);
                ClientError::Transport
            })
        } else {
            let message = serde_json::from_str::<ErrorResponse>(&self.body)
                .ok()
                .map(|response| response.error)
                .filter(|error| !error.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            log::warn!("service replied {}: {}", self.status, message);
            Err(ClientError::Service(message))
        }
    }
}
