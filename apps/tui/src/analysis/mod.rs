// Analysis module for mena-energy-tracker
// Request contract, response validation and the Gemini transport

pub mod client;
pub mod error;
pub mod gemini;
pub mod schema;

pub use client::{
    analysis_prompt, parse_analysis, AnalysisClient, GenerationBackend, GenerationRequest,
    COUNTRIES, SYSTEM_PERSONA,
};
pub use error::{AnalysisError, ErrorKind, MalformedReason};
pub use gemini::{GeminiBackend, GeminiConfig};
pub use schema::{missing_required, response_schema};
