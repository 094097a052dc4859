//! AI palette suggestions from a free-text mood.
//!
//! Sends one `generateContent` request to a Gemini-compatible endpoint with a
//! JSON response schema, and parses the reply into a base color, a harmony
//! rule, and a short description.
//!
//! A client built without an API key is permanently disabled: every call fails
//! with [`SuggestionError::MissingCredential`] and no request is made.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_MODEL, MAX_DESCRIPTION_CHARS};
use crate::models::{HarmonyRule, HexColor};

/// Connection settings for [`SuggestionClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionConfig {
    /// API key; `None` or blank disables the client
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-2.5-flash`
    pub model: String,
    /// Base URL of the API, without the `/v1beta` path
    pub endpoint: String,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl SuggestionConfig {
    /// True when an API key is present.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

/// A palette suggestion returned by the AI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Suggested base color
    pub base_hex: HexColor,
    /// Suggested harmony rule
    pub harmony: HarmonyRule,
    /// Short explanation, at most 100 characters
    pub description: String,
}

/// Why a suggestion could not be produced.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// No API key configured
    #[error("AI suggestions are disabled: no API key configured")]
    MissingCredential,

    /// The mood text was empty
    #[error("Mood description is empty")]
    EmptyPrompt,

    /// The request did not complete
    #[error("Request to the AI service failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("AI service returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// The response did not contain a usable suggestion
    #[error("AI response could not be understood: {0}")]
    MalformedResponse(String),
}

impl SuggestionError {
    /// True for the permanent "no API key" state, as opposed to a failed request.
    #[must_use]
    pub const fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}

/// Client for the suggestion service.
#[derive(Debug, Clone)]
pub struct SuggestionClient {
    http: reqwest::Client,
    config: SuggestionConfig,
}

impl SuggestionClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::Network`] if the HTTP client cannot be built.
    pub fn new(config: SuggestionConfig) -> Result<Self, SuggestionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// True when requests will be attempted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Full URL of the `generateContent` call.
    #[must_use]
    pub fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Asks the service for a palette matching `mood`.
    ///
    /// # Errors
    ///
    /// - [`SuggestionError::MissingCredential`] when the client is disabled
    /// - [`SuggestionError::EmptyPrompt`] when `mood` is blank
    /// - [`SuggestionError::Network`] or [`SuggestionError::Api`] when the request fails
    /// - [`SuggestionError::MalformedResponse`] when the reply cannot be parsed
    pub async fn suggest(&self, mood: &str) -> Result<Suggestion, SuggestionError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key.trim(),
            _ => return Err(SuggestionError::MissingCredential),
        };
        let mood = mood.trim();
        if mood.is_empty() {
            return Err(SuggestionError::EmptyPrompt);
        }

        info!("Requesting palette suggestion from {}", self.config.model);
        let response = self
            .http
            .post(self.request_url())
            .header("x-goog-api-key", api_key)
            .json(&build_request_body(mood))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SuggestionError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let suggestion = parse_response(&body)?;
        debug!(
            "Suggestion: {} / {} ({})",
            suggestion.base_hex, suggestion.harmony, suggestion.description
        );
        Ok(suggestion)
    }
}

/// Prompt text sent for `mood`.
#[must_use]
pub fn build_prompt(mood: &str) -> String {
    format!(
        "Generate a base color (hex) and suggest a color harmony rule based on this \
         mood/description: \"{mood}\". Explain briefly why."
    )
}

/// JSON body of the `generateContent` request.
///
/// The response schema restricts `harmony` to the known rule ids.
#[must_use]
pub fn build_request_body(mood: &str) -> Value {
    let harmony_ids: Vec<&str> = HarmonyRule::all().iter().map(|rule| rule.id()).collect();

    json!({
        "contents": [{ "parts": [{ "text": build_prompt(mood) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "baseHex": {
                        "type": "STRING",
                        "description": "The base color in hexadecimal format (e.g. #FF5500)"
                    },
                    "harmony": {
                        "type": "STRING",
                        "enum": harmony_ids,
                        "description": "The type of color harmony to apply."
                    },
                    "description": {
                        "type": "STRING",
                        "description": "A very short explanation (max 100 chars)."
                    }
                },
                "required": ["baseHex", "harmony", "description"]
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSuggestion {
    base_hex: String,
    harmony: String,
    description: String,
}

/// Parses a `generateContent` response body into a [`Suggestion`].
///
/// # Errors
///
/// Returns [`SuggestionError::MalformedResponse`] if the body has no candidate
/// text, the text is not the expected JSON object, the color is not a valid
/// hex string, or the harmony is not a known rule.
pub fn parse_response(body: &str) -> Result<Suggestion, SuggestionError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| SuggestionError::MalformedResponse(format!("invalid response body: {e}")))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| SuggestionError::MalformedResponse("response has no text".to_string()))?;

    let raw: RawSuggestion = serde_json::from_str(text.trim()).map_err(|e| {
        SuggestionError::MalformedResponse(format!("suggestion is not valid JSON: {e}"))
    })?;

    let base_hex = HexColor::from_str(&raw.base_hex).map_err(|_| {
        SuggestionError::MalformedResponse(format!("invalid base color '{}'", raw.base_hex))
    })?;
    let harmony = HarmonyRule::from_name(&raw.harmony).ok_or_else(|| {
        SuggestionError::MalformedResponse(format!("unknown harmony '{}'", raw.harmony))
    })?;

    Ok(Suggestion {
        base_hex,
        harmony,
        description: truncate_chars(raw.description.trim(), MAX_DESCRIPTION_CHARS),
    })
}

/// Extracts `error.message` from an API error body, or returns the body itself.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
