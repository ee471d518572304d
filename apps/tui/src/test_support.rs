use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::analysis::{AnalysisError, GenerationBackend, GenerationRequest};
use crate::domain::{AnalysisResult, EnergyMix, EnergyRecord, SourceShare};

pub fn record(country: &str, fossil: f64, renewable: f64, nuclear: f64) -> EnergyRecord {
    EnergyRecord {
        country: country.to_string(),
        total_generation_twh: 100.0,
        co2_emissions_mt: 50.0,
        energy_mix: EnergyMix {
            fossil_percentage: fossil,
            renewable_percentage: renewable,
            nuclear_percentage: nuclear,
            details: format!("{country} mix"),
            top_sources: vec![
                SourceShare {
                    source: "Natural Gas".to_string(),
                    percentage: fossil,
                },
                SourceShare {
                    source: "Solar".to_string(),
                    percentage: renewable,
                },
            ],
        },
        analysis: format!("{country} analysis"),
    }
}

pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        overview: "Egypt leans on gas while the UAE scales nuclear.".to_string(),
        data: vec![
            record("Egypt", 88.0, 12.0, 0.0),
            record("Saudi Arabia", 99.0, 1.0, 0.0),
            record("Turkey", 58.0, 42.0, 0.0),
            record("Israel", 90.0, 10.0, 0.0),
            record("United Arab Emirates", 70.0, 8.0, 22.0),
        ],
        generated_at: "2023".to_string(),
    }
}

pub fn sample_json() -> String {
    serde_json::to_string(&sample_result()).unwrap_or_default()
}

pub enum StubReply {
    Text(String),
    Empty,
    Transport(&'static str),
}

/// Backend that answers from a script and records each request.
pub struct StubBackend {
    replies: Mutex<VecDeque<StubReply>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl StubBackend {
    pub fn new(replies: Vec<StubReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerationBackend for StubBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, AnalysisError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or(StubReply::Transport("stub script exhausted"));

        match reply {
            StubReply::Text(text) => Ok(Some(text)),
            StubReply::Empty => Ok(None),
            StubReply::Transport(message) => Err(AnalysisError::Transport(message.to_string())),
        }
    }
}
