//! Analysis client: one request to the generation service, one fallible parse.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::error::{AnalysisError, MalformedReason};
use super::schema::{missing_required, response_schema};
use crate::domain::AnalysisResult;

/// Countries covered by every analysis request, Egypt first.
pub const COUNTRIES: [&str; 5] = [
    "Egypt",
    "Saudi Arabia",
    "Turkey",
    "Israel",
    "United Arab Emirates",
];

pub const SYSTEM_PERSONA: &str = "You are an expert energy analyst specializing in the MENA (Middle East and North Africa) region. Be precise with data.";

pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Build the fixed instruction sent with every request.
pub fn analysis_prompt() -> String {
    let countries = match COUNTRIES.split_last() {
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{}, and {last}", rest.join(", ")),
        None => String::new(),
    };

    format!(
        "Perform a comparative analysis of clean energy adoption and CO2 emissions for the following countries:
{countries}.

Focus on:
1. Total Electricity Generation (TWh).
2. CO2 Emissions (Million Tonnes).
3. Energy Mix percentages (Fossil vs Renewable vs Nuclear).
4. Detailed breakdown of top 3 generation sources (e.g. Gas, Wind, Solar) and their % share.

Provide the most recent reliable annual data available to you (likely 2023 or 2024).
Ensure the numbers are realistic estimates based on public energy reports (like Ember, BP Statistical Review, IEA).

The output must be JSON matching the schema provided."
    )
}

/// Everything the generation service needs for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: String,
    pub response_schema: Value,
    pub response_mime_type: String,
}

impl GenerationRequest {
    pub fn energy_analysis() -> Self {
        Self {
            prompt: analysis_prompt(),
            system_instruction: SYSTEM_PERSONA.to_string(),
            response_schema: response_schema(),
            response_mime_type: RESPONSE_MIME_TYPE.to_string(),
        }
    }
}

/// Transport to a generative model.
///
/// `Ok(None)` means the call completed but carried no text payload.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, AnalysisError>;
}

/// Requests the comparative energy analysis and turns the reply into an
/// [`AnalysisResult`]. Every call goes to the backend; nothing is cached.
#[derive(Clone)]
pub struct AnalysisClient {
    backend: Arc<dyn GenerationBackend>,
}

impl AnalysisClient {
    pub fn new(backend: impl GenerationBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn from_shared(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    pub async fn fetch_energy_analysis(&self) -> Result<AnalysisResult, AnalysisError> {
        let request = GenerationRequest::energy_analysis();
        tracing::info!(countries = COUNTRIES.len(), "requesting energy analysis");

        let outcome = self.request(&request).await;
        match &outcome {
            Ok(result) => tracing::info!(
                records = result.data.len(),
                period = %result.generated_at,
                "energy analysis received"
            ),
            Err(err) => tracing::error!(kind = %err.kind(), error = %err, "energy analysis failed"),
        }

        outcome
    }

    async fn request(&self, request: &GenerationRequest) -> Result<AnalysisResult, AnalysisError> {
        let text = self
            .backend
            .generate(request)
            .await?
            .filter(|text| !text.is_empty())
            .ok_or(AnalysisError::EmptyResponse)?;

        tracing::debug!(bytes = text.len(), "parsing analysis payload");
        parse_analysis(&text)
    }
}

/// Parse a raw text payload into an [`AnalysisResult`].
///
/// Checks JSON syntax, then the schema's required fields, then field types.
/// Value ranges and array lengths are taken as returned.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let value: Value = serde_json::from_str(text).map_err(MalformedReason::InvalidJson)?;

    let missing = missing_required(&response_schema(), &value);
    if !missing.is_empty() {
        return Err(MalformedReason::MissingFields(missing).into());
    }

    let result = serde_json::from_value(value).map_err(MalformedReason::Shape)?;
    Ok(result)
}
