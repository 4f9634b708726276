use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use super::Translator;
use crate::error::TranslationFailure;

const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com";

/// Client for the public Google Translate `translate_a/single` endpoint.
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
}

impl GoogleTranslateClient {
    pub fn new(timeout: Duration) -> Result<Self, TranslationFailure> {
        Self::with_endpoint(DEFAULT_ENDPOINT, timeout)
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, TranslationFailure> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

impl Translator for GoogleTranslateClient {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationFailure> {
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.endpoint))
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationFailure::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json()?;
        let translated = parse_translation(&body)?;
        debug!("Translated '{}' -> '{}' ({})", text, translated, target_language);
        Ok(translated)
    }
}

/// The body is a nested array whose first element lists the translated
/// segments; each segment starts with its translated text.
fn parse_translation(body: &Value) -> Result<String, TranslationFailure> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationFailure::UnexpectedResponse("missing segment list".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslationFailure::UnexpectedResponse(
            "no translated text".into(),
        ));
    }
    Ok(translated)
}
