//! Orchestration of the two flows: weather lookup and advice chat.
//!
//! Each call is an independent request/response pair against the generation
//! provider; no state is shared between calls and nothing is retried. The
//! lookup flow surfaces a single fetch error; the advice flow never fails.

use chrono::Local;
use thiserror::Error;

use crate::model::WeatherReport;
use crate::parser;
use crate::prompt;
use crate::provider::{GenerationProvider, GenerationRequest};

/// Shown as the assistant reply when the service answered with empty text.
pub const ADVICE_EMPTY_FALLBACK: &str = "I'm sorry, I couldn't generate advice right now.";

/// Shown as the assistant reply when the service call itself failed.
pub const ADVICE_UNAVAILABLE_FALLBACK: &str =
    "The SkyInsight AI is currently unavailable. Please try again in a moment.";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The generation call rejected; no partial report is produced.
    #[error("Failed to fetch weather information.")]
    Fetch(#[source] anyhow::Error),
}

#[derive(Debug)]
pub struct WeatherService {
    provider: Box<dyn GenerationProvider>,
}

impl WeatherService {
    pub fn new(provider: Box<dyn GenerationProvider>) -> Self {
        Self { provider }
    }

    /// Fetch current conditions for a free-text location query.
    ///
    /// The reply is parsed leniently: format drift degrades individual report
    /// fields to their defaults and is never an error. Only a failed service
    /// call aborts the request.
    pub async fn fetch_weather(&self, query: &str) -> Result<WeatherReport, ServiceError> {
        let prompt = prompt::weather_query(query);
        let request =
            GenerationRequest { prompt: &prompt, system_instruction: None, web_search: true };

        let reply = self.provider.generate(&request).await.map_err(|err| {
            tracing::error!(error = %format!("{err:#}"), query, "weather request failed");
            ServiceError::Fetch(err)
        })?;

        let timestamp = Local::now().format("%H:%M:%S").to_string();
        Ok(parser::parse_weather_reply(query, &reply.text, reply.sources, timestamp))
    }

    /// Ask for lifestyle advice in the context of a previously fetched report.
    ///
    /// Never surfaces an error to the caller: an empty reply or a failed call
    /// degrades to a fixed fallback string.
    pub async fn advice(&self, message: &str, report: &WeatherReport) -> String {
        let system = prompt::advice_system(report);
        let request = GenerationRequest {
            prompt: message,
            system_instruction: Some(&system),
            web_search: false,
        };

        match self.provider.generate(&request).await {
            Ok(reply) if reply.text.is_empty() => ADVICE_EMPTY_FALLBACK.to_string(),
            Ok(reply) => reply.text,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "advice request failed");
                ADVICE_UNAVAILABLE_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceRef;
    use crate::provider::GenerationReply;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    type SeenRequests = Arc<Mutex<Vec<(String, Option<String>, bool)>>>;

    /// Provider double that returns a canned result and records each request.
    #[derive(Debug)]
    struct ScriptedProvider {
        reply: Option<GenerationReply>,
        seen: SeenRequests,
    }

    impl ScriptedProvider {
        fn replying(text: &str, sources: Vec<SourceRef>) -> Self {
            Self {
                reply: Some(GenerationReply { text: text.to_string(), sources }),
                seen: Arc::default(),
            }
        }

        fn failing() -> Self {
            Self { reply: None, seen: Arc::default() }
        }

        fn seen(&self) -> SeenRequests {
            Arc::clone(&self.seen)
        }
    }

    #[async_trait]
    impl GenerationProvider for ScriptedProvider {
        async fn generate(
            &self,
            request: &GenerationRequest<'_>,
        ) -> anyhow::Result<GenerationReply> {
            self.seen.lock().unwrap().push((
                request.prompt.to_string(),
                request.system_instruction.map(str::to_string),
                request.web_search,
            ));
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(anyhow::anyhow!("quota exceeded")),
            }
        }
    }

    fn report() -> WeatherReport {
        WeatherReport {
            location: "Paris, France".to_string(),
            summary: "Grey and mild.".to_string(),
            air_quality: None,
            hourly: vec![],
            daily: vec![],
            sources: vec![],
            timestamp: "09:00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn fetch_weather_parses_reply_into_report() {
        let reply = "\
Clear skies over the city.
LOCATION_DATA | Paris, France
AQI_DATA | Value: 42 | Category: Good";
        let sources =
            vec![SourceRef { title: Some("Met".to_string()), uri: Some("https://m".to_string()) }];
        let provider = ScriptedProvider::replying(reply, sources.clone());
        let service = WeatherService::new(Box::new(provider));

        let report = service.fetch_weather("Paris").await.expect("fetch must succeed");

        assert_eq!(report.location, "Paris, France");
        assert_eq!(report.summary, "Clear skies over the city.");
        assert_eq!(report.sources, sources);
        assert!(!report.timestamp.is_empty());
    }

    #[tokio::test]
    async fn fetch_weather_enables_web_search_without_system_instruction() {
        let provider = ScriptedProvider::replying("anything", vec![]);
        let seen = provider.seen();
        let service = WeatherService::new(Box::new(provider));

        service.fetch_weather("Berlin").await.expect("fetch must succeed");

        let seen = seen.lock().unwrap();
        let (prompt, system, web_search) = &seen[0];
        assert!(prompt.contains("current weather in Berlin?"));
        assert_eq!(*system, None);
        assert!(*web_search);
    }

    #[tokio::test]
    async fn fetch_weather_failure_is_a_single_fetch_error() {
        let provider = ScriptedProvider::failing();
        let service = WeatherService::new(Box::new(provider));

        let err = service.fetch_weather("Paris").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch weather information.");
    }

    #[tokio::test]
    async fn advice_returns_reply_text_unmodified() {
        let provider = ScriptedProvider::replying("  Wear a light jacket.  ", vec![]);
        let service = WeatherService::new(Box::new(provider));

        let answer = service.advice("What should I wear?", &report()).await;
        assert_eq!(answer, "  Wear a light jacket.  ");
    }

    #[tokio::test]
    async fn advice_embeds_report_context_and_disables_search() {
        let provider = ScriptedProvider::replying("Take an umbrella.", vec![]);
        let seen = provider.seen();
        let service = WeatherService::new(Box::new(provider));

        service.advice("Do I need an umbrella?", &report()).await;

        let seen = seen.lock().unwrap();
        let (prompt, system, web_search) = &seen[0];
        assert_eq!(prompt, "Do I need an umbrella?");
        assert!(system.as_deref().unwrap().contains("Current Location: Paris, France"));
        assert!(!web_search);
    }

    #[tokio::test]
    async fn advice_empty_reply_falls_back() {
        let provider = ScriptedProvider::replying("", vec![]);
        let service = WeatherService::new(Box::new(provider));

        let answer = service.advice("Hello", &report()).await;
        assert_eq!(answer, ADVICE_EMPTY_FALLBACK);
    }

    #[tokio::test]
    async fn advice_failure_falls_back_instead_of_erroring() {
        let provider = ScriptedProvider::failing();
        let service = WeatherService::new(Box::new(provider));

        let answer = service.advice("Hello", &report()).await;
        assert_eq!(answer, ADVICE_UNAVAILABLE_FALLBACK);
    }
}
