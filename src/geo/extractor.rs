//! Coordinate extractor
//!
//! Prompts the completion gateway for a strict-JSON city record and parses
//! the reply, stripping any markdown code fences the model wrapped it in.

use crate::error::{GeoJsonMcpError, ParseError, Result};
use crate::geo::gateway::CompletionGateway;
use crate::geo::types::{ChatMessage, CityRecord};

const SYSTEM_PROMPT: &str = "You are a geography assistant. When asked for city \
coordinates, return only the JSON object with no extra commentary.";

/// Extracts structured coordinates for a city via the completion gateway
pub struct CoordinateExtractor<G: CompletionGateway> {
    gateway: G,
}

impl<G: CompletionGateway> CoordinateExtractor<G> {
    /// Create an extractor over a gateway
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Model identifier the underlying gateway completes with
    pub fn model(&self) -> &str {
        self.gateway.model()
    }

    /// Look up coordinates for a city name.
    ///
    /// The model decides how to interpret ambiguous or fictional names; this
    /// method does not validate semantic plausibility or coordinate ranges.
    pub async fn extract(&self, city_name: &str) -> Result<CityRecord> {
        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt(city_name)),
        ];

        let raw = self.gateway.complete(messages).await?;
        let cleaned = strip_code_fences(&raw);

        tracing::debug!(city = city_name, "parsing completion output");

        let value: serde_json::Value = serde_json::from_str(cleaned).map_err(|e| {
            GeoJsonMcpError::Parse(ParseError::InvalidJson {
                message: e.to_string(),
            })
        })?;

        serde_json::from_value(value).map_err(|e| {
            GeoJsonMcpError::Parse(ParseError::InvalidRecord {
                message: e.to_string(),
            })
        })
    }
}

fn user_prompt(city_name: &str) -> String {
    format!(
        "For the city \"{}\", return the following information as JSON:\n\
         {{\n\
         \x20   \"city_name\": \"city name\",\n\
         \x20   \"latitude\": number,\n\
         \x20   \"longitude\": number,\n\
         \x20   \"country\": \"country\",\n\
         \x20   \"description\": \"short description\"\n\
         }}",
        city_name
    )
}

/// Strip an optional markdown code fence from completion output.
///
/// Accepts a ```` ```json ```` wrapper, a bare ```` ``` ```` wrapper, or
/// unfenced text.
pub fn strip_code_fences(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + 7..];
        return match rest.find("```") {
            Some(end) => rest[..end].trim(),
            None => rest.trim(),
        };
    }

    if let Some(start) = text.find("```") {
        let rest = &text[start + 3..];
        return match rest.find("```") {
            Some(end) => rest[..end].trim(),
            None => rest.trim(),
        };
    }

    text.trim()
}
