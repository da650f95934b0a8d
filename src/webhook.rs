//! Discord webhook client.
//!
//! One call shape: execute the webhook with `wait=true` so Discord returns
//! the created message instead of a bare 204, giving us an id to link to.

use serde::{Deserialize, Serialize};

pub struct Client {
    http: reqwest::Client,
}

/// The created message, as much of it as we need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub id: String,
    pub jump_url: String,
}

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct MessageResponse {
    id: String,
    channel_id: String,
}

#[derive(Deserialize)]
struct RateLimitResponse {
    retry_after: f64,
}

#[derive(Debug)]
pub enum Error {
    Http(String),
    Api(String),
    RateLimited { retry_after: f64 },
    Parse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::Api(e) => write!(f, "API error: {e}"),
            Error::RateLimited { retry_after } => {
                write!(f, "rate limited, retry after {retry_after}s")
            }
            Error::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl Client {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Send `message` to the webhook at `url`, waiting for delivery.
    pub async fn send(&self, url: &str, message: &str) -> Result<SentMessage, Error> {
        let response = self
            .http
            .post(url)
            .query(&[("wait", "true")])
            .json(&ExecuteRequest { content: message })
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            let retry_after = serde_json::from_str::<RateLimitResponse>(&body)
                .map(|r| r.retry_after)
                .unwrap_or(0.0);
            return Err(Error::RateLimited { retry_after });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{status}: {body}")));
        }

        let message: MessageResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        // Webhook responses carry no guild id, so link through the @me route.
        let jump_url = format!(
            "https://discord.com/channels/@me/{}/{}",
            message.channel_id, message.id
        );
        Ok(SentMessage {
            id: message.id,
            jump_url,
        })
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_request_shape() {
        let body = serde_json::to_string(&ExecuteRequest { content: "ping" }).unwrap();
        assert_eq!(body, r#"{"content":"ping"}"#);
    }

    #[test]
    fn test_message_response_parse() {
        let msg: MessageResponse =
            serde_json::from_str(r#"{"id":"987","channel_id":"222","content":"ping"}"#).unwrap();
        assert_eq!(msg.id, "987");
        assert_eq!(msg.channel_id, "222");
    }

    #[test]
    fn test_rate_limit_body_parse() {
        let r: RateLimitResponse =
            serde_json::from_str(r#"{"message":"You are being rate limited.","retry_after":1.25,"global":false}"#)
                .unwrap();
        assert!((r.retry_after - 1.25).abs() < f64::EPSILON);
    }
}
