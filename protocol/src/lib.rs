//! Wire types spoken between the browser client and the scoring service.
//!
//! The service owns every game decision. These types only describe the JSON shapes of its four routes, field names
//! follow the service's snake_case convention and unknown fields are ignored on purpose so that extra development
//! fields never reach the client.

use serde::{Deserialize, Serialize};

/// A single guess, always within `MIN_GUESS..=MAX_GUESS` once validated.
pub type GuessValue = u8;

/// Attempt counter as reported by the service.
pub type AttemptCount = u32;

pub const MIN_GUESS: GuessValue = 1;
pub const MAX_GUESS: GuessValue = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    Status,
    Start,
    Guess,
    Reset,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        use Endpoint::*;
        match self {
            Status => "/status",
            Start => "/start",
            Guess => "/guess",
            Reset => "/reset",
        }
    }

    pub const fn method(self) -> Method {
        match self {
            Self::Status => Method::Get,
            Self::Start | Self::Guess | Self::Reset => Method::Post,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    pub guess: GuessValue,
    pub get_hint: bool,
}

/// One outgoing call to the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceRequest {
    Status,
    Start,
    Guess(GuessRequest),
    Reset,
}

impl ServiceRequest {
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Status => Endpoint::Status,
            Self::Start => Endpoint::Start,
            Self::Guess(_) => Endpoint::Guess,
            Self::Reset => Endpoint::Reset,
        }
    }

    /// JSON body to send, `None` for routes that take no body.
    pub fn body(&self) -> serde_json::Result<Option<String>> {
        match self {
            Self::Guess(request) => serde_json::to_string(request).map(Some),
            Self::Status | Self::Start | Self::Reset => Ok(None),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub game_active: bool,
    #[serde(default)]
    pub attempts: AttemptCount,
    #[serde(default)]
    pub guesses: Vec<GuessValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reply to a start request.
///
/// The service may echo the secret number here in development builds, it is deliberately not a field of this type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub attempts: AttemptCount,
    #[serde(default)]
    pub guesses: Vec<GuessValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess: Option<GuessValue>,
    #[serde(default)]
    pub result: String,
    pub correct: bool,
    pub attempts: AttemptCount,
    pub guesses: Vec<GuessValue>,
    #[serde(rename = "ai_hint", default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of a non-2xx reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_request_uses_service_field_names() {
        let request = ServiceRequest::Guess(GuessRequest {
            guess: 42,
            get_hint: true,
        });

        assert_eq!(request.endpoint(), Endpoint::Guess);
        assert_eq!(request.endpoint().method(), Method::Post);
        assert_eq!(
            request.body().unwrap().as_deref(),
            Some(r#"{"guess":42,"get_hint":true}"#)
        );
    }

    #[test]
    fn bodyless_routes() {
        for request in [
            ServiceRequest::Status,
            ServiceRequest::Start,
            ServiceRequest::Reset,
        ] {
            assert_eq!(request.body().unwrap(), None);
        }
        assert_eq!(Endpoint::Status.method(), Method::Get);
        assert_eq!(Endpoint::Reset.path(), "/reset");
    }

    #[test]
    fn start_response_drops_secret_number() {
        let response: StartResponse = serde_json::from_str(
            r#"{"message":"Game started! Guess a number between 1 and 100.","secret_number":37,"attempts":0}"#,
        )
        .unwrap();

        assert_eq!(response.attempts, 0);
        assert!(response.guesses.is_empty());
        let echoed = serde_json::to_string(&response).unwrap();
        assert!(!echoed.contains("secret_number"));
    }

    #[test]
    fn guess_response_maps_ai_hint() {
        let response: GuessResponse = serde_json::from_str(
            r#"{"guess":60,"result":"Too high! The number is lower than 60.","correct":false,"attempts":1,"guesses":[60],"ai_hint":"Try the 1-59 range."}"#,
        )
        .unwrap();

        assert!(!response.correct);
        assert_eq!(response.guesses, vec![60]);
        assert_eq!(response.hint.as_deref(), Some("Try the 1-59 range."));
        assert_eq!(response.final_message, None);
        assert!(!response.game_over);
    }

    #[test]
    fn inactive_status_needs_only_the_flag() {
        let response: StatusResponse =
            serde_json::from_str(r#"{"game_active":false,"message":"No active game"}"#).unwrap();

        assert_eq!(
            response,
            StatusResponse {
                game_active: false,
                attempts: 0,
                guesses: vec![],
                message: Some("No active game".to_string()),
            }
        );
    }

    #[test]
    fn negative_guess_values_are_rejected() {
        let result = serde_json::from_str::<GuessResponse>(
            r#"{"result":"Too low","correct":false,"attempts":1,"guesses":[-3]}"#,
        );
        assert!(result.is_err());
    }
}
