//! Request/response bodies of the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

use postcraft_core::ports::{ModelRequest, ModelResponse, ResponsePart};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl<'a> From<&'a ModelRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a ModelRequest) -> Self {
        let generation_config =
            if request.response_schema.is_some() || request.temperature.is_some() {
                Some(GenerationConfig {
                    response_mime_type: request
                        .response_schema
                        .as_ref()
                        .map(|_| "application/json"),
                    response_schema: request.response_schema.as_ref(),
                    temperature: request.temperature,
                })
            } else {
                None
            };

        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart {
                    text: &request.prompt,
                }],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

impl From<GenerateContentResponse> for ModelResponse {
    /// Only the first candidate is used.
    fn from(response: GenerateContentResponse) -> Self {
        let parts = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.thought)
            .filter_map(|p| match (p.inline_data, p.text) {
                (Some(inline), _) => Some(ResponsePart::InlineData {
                    mime_type: inline.mime_type,
                    data: inline.data,
                }),
                (None, Some(text)) => Some(ResponsePart::Text(text)),
                (None, None) => None,
            })
            .collect();

        ModelResponse { parts }
    }
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_request_has_no_generation_config() {
        let request = ModelRequest::new("gemini-2.5-flash-image", "a cozy desk");
        let body = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();

        assert_eq!(
            body,
            json!({ "contents": [{ "role": "user", "parts": [{ "text": "a cozy desk" }] }] })
        );
    }

    #[test]
    fn test_schema_request_sets_json_mime_type() {
        let request = ModelRequest::new("gemini-2.5-flash", "prompt")
            .with_response_schema(json!({ "type": "OBJECT" }))
            .with_temperature(0.5);
        let body = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();

        assert_eq!(
            body["generationConfig"],
            json!({
                "responseMimeType": "application/json",
                "responseSchema": { "type": "OBJECT" },
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn test_response_uses_first_candidate_and_skips_thoughts() {
        let raw = json!({
            "candidates": [
                { "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "hello" },
                    { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
                ] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let response = ModelResponse::from(response);

        assert_eq!(response.text().as_deref(), Some("hello"));
        assert_eq!(response.first_inline_data(), Some("AAAA"));
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(ModelResponse::from(response).parts.is_empty());
    }
}
