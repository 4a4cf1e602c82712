use crate::{Config, model::SourceRef, provider::gemini::GeminiProvider};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod gemini;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Gemini,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Gemini]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "gemini" => Ok(ProviderId::Gemini),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: gemini."
            )),
        }
    }
}

/// One text-generation exchange: a prompt, an optional system instruction,
/// and whether the provider may augment the answer with web search.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub system_instruction: Option<&'a str>,
    pub web_search: bool,
}

/// Reply text plus whatever grounding citations the service attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReply {
    pub text: String,
    pub sources: Vec<SourceRef>,
}

/// The single operation the rest of the crate depends on. Everything above
/// this trait is transport-agnostic; swapping providers must not touch the
/// prompt or parsing layers.
#[async_trait]
pub trait GenerationProvider: Send + Sync + Debug {
    async fn generate(&self, request: &GenerationRequest<'_>) -> anyhow::Result<GenerationReply>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn GenerationProvider>> {
    let api_key = config.provider_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `skyinsight configure {id}` and enter your API key."
        )
    })?;

    let model = config.provider_config(id).and_then(|cfg| cfg.model.clone());

    let boxed: Box<dyn GenerationProvider> = match id {
        ProviderId::Gemini => Box::new(GeminiProvider::new(api_key.to_owned(), model)),
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(
    config: &Config,
) -> anyhow::Result<Box<dyn GenerationProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}
