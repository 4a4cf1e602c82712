use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::model::SourceRef;

use super::{GenerationProvider, GenerationReply, GenerationRequest};

/// Default generation model, overridable per provider in the config file.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: String,
    model: String,
    http: Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &GenerationRequest<'a>) -> Self {
        Self {
            contents: vec![Content { parts: vec![Part { text: request.prompt }] }],
            system_instruction: request
                .system_instruction
                .map(|text| Content { parts: vec![Part { text }] }),
            tools: if request.web_search {
                vec![Tool { google_search: GoogleSearch {} }]
            } else {
                Vec::new()
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    title: Option<String>,
    uri: Option<String>,
}

impl GenerateContentResponse {
    /// Flatten the first candidate into reply text plus its web citations.
    fn into_reply(self) -> GenerationReply {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return GenerationReply { text: String::new(), sources: Vec::new() };
        };

        let text = candidate
            .content
            .map(|content| {
                content.parts.into_iter().filter_map(|part| part.text).collect::<Vec<_>>().join("")
            })
            .unwrap_or_default();

        let sources = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| SourceRef { title: web.title, uri: web.uri })
                    .collect()
            })
            .unwrap_or_default();

        GenerationReply { text, sources }
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<GenerationReply> {
        let url = format!("{API_BASE}/models/{}:generateContent", self.model);
        let payload = GenerateContentRequest::from_request(request);

        tracing::debug!(
            model = %self.model,
            web_search = request.web_search,
            "dispatching generateContent request"
        );

        let res = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to the Gemini API")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read Gemini response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Gemini generateContent request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).context("Failed to parse Gemini generateContent JSON")?;

        Ok(parsed.into_reply())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
