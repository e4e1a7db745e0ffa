//! Plain-language health summaries from a generative-text service.
//!
//! The service is treated as an opaque text box: one prompt goes out, one
//! blob of text comes back. Every failure collapses into
//! [`INSIGHT_FALLBACK`] so the dashboard always has something to show.

use std::fmt::Write as _;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{config::InsightConfig, domain::air_quality::CurrentReadings, error::DashboardError};

pub const INSIGHT_FALLBACK: &str =
    "Unable to generate health insights at this time. Please try again later.";

#[derive(Debug, Clone)]
pub struct InsightClient {
    client: Client,
    config: InsightConfig,
}

impl InsightClient {
    pub fn new(config: InsightConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("reqwest client"),
            config,
        }
    }

    /// Summary text, or [`INSIGHT_FALLBACK`] on any failure.
    pub async fn generate(&self, place: &str, current: &CurrentReadings) -> String {
        match self.try_generate(place, current).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "insight generation failed; using fallback text");
                INSIGHT_FALLBACK.to_string()
            }
        }
    }

    pub async fn try_generate(
        &self,
        place: &str,
        current: &CurrentReadings,
    ) -> Result<String, DashboardError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(DashboardError::InvalidInput(
                "no generative-text API key configured".to_string(),
            ));
        };

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(place, current),
                }],
            }],
        };

        let response: GenerateResponse = self
            .client
            .post(self.config.endpoint())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|err| DashboardError::upstream("insight request failed", err))?
            .error_for_status()
            .map_err(|err| {
                DashboardError::upstream("insight request returned non-success status", err)
            })?
            .json()
            .await
            .map_err(|err| DashboardError::upstream("failed to decode insight response", err))?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(DashboardError::upstream(
                "insight response was empty",
                "no candidate text",
            ));
        }
        Ok(text.trim().to_string())
    }
}

/// Deterministic prompt for the given place and readings.
#[must_use]
pub fn build_prompt(place: &str, current: &CurrentReadings) -> String {
    let mut prompt = format!("Current air quality readings for {place}:\n");
    for (name, value, unit) in [
        ("PM2.5", current.pm2_5, "µg/m³"),
        ("PM10", current.pm10, "µg/m³"),
        ("Carbon Monoxide", current.carbon_monoxide, "µg/m³"),
        ("Nitrogen Dioxide", current.nitrogen_dioxide, "µg/m³"),
        ("Sulphur Dioxide", current.sulphur_dioxide, "µg/m³"),
        ("Ozone", current.ozone, "µg/m³"),
    ] {
        match value {
            Some(value) => {
                let _ = writeln!(prompt, "- {name}: {value} {unit}");
            }
            None => {
                let _ = writeln!(prompt, "- {name}: n/a");
            }
        }
    }
    prompt.push_str(
        "Write a short plain-language summary of what these levels mean for health, \
         who should take precautions, and one practical recommendation. \
         Keep it under 120 words and avoid markdown.",
    );
    prompt
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
