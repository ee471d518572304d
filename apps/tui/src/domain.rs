use serde::{Deserialize, Serialize};

/// One named generation source and its share of total output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceShare {
    pub source: String,
    pub percentage: f64,
}

/// Percentage breakdown of a country's electricity generation.
///
/// The three category percentages come straight from the generation service
/// and are not required to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyMix {
    pub fossil_percentage: f64,
    pub renewable_percentage: f64,
    pub nuclear_percentage: f64,
    pub details: String,
    pub top_sources: Vec<SourceShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRecord {
    pub country: String,
    #[serde(rename = "totalGenerationTWh")]
    pub total_generation_twh: f64,
    pub co2_emissions_mt: f64,
    pub energy_mix: EnergyMix,
    pub analysis: String,
}

/// The full document produced by one successful analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overview: String,
    pub data: Vec<EnergyRecord>,
    pub generated_at: String,
}

impl AnalysisResult {
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(|record| record.country.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_field_names() -> Result<(), Box<dyn std::error::Error>> {
        let payload = serde_json::json!({
            "overview": "Gas dominates the region.",
            "generatedAt": "2023",
            "data": [{
                "country": "Egypt",
                "totalGenerationTWh": 215.8,
                "co2EmissionsMt": 249.1,
                "energyMix": {
                    "fossilPercentage": 88.0,
                    "renewablePercentage": 12.0,
                    "nuclearPercentage": 0.0,
                    "details": "Natural Gas dominance, growing Solar",
                    "topSources": [{ "source": "Natural Gas", "percentage": 80.0 }]
                },
                "analysis": "Benban keeps growing."
            }]
        });

        let result: AnalysisResult = serde_json::from_value(payload)?;
        assert_eq!(result.generated_at, "2023");
        assert_eq!(result.data.len(), 1);

        let egypt = &result.data[0];
        assert!((egypt.total_generation_twh - 215.8).abs() < f64::EPSILON);
        assert!((egypt.co2_emissions_mt - 249.1).abs() < f64::EPSILON);
        assert_eq!(egypt.energy_mix.top_sources[0].source, "Natural Gas");
        assert_eq!(result.countries().collect::<Vec<_>>(), vec!["Egypt"]);

        Ok(())
    }

    #[test]
    fn serializes_back_to_camel_case() -> Result<(), Box<dyn std::error::Error>> {
        let mix = EnergyMix {
            fossil_percentage: 50.0,
            renewable_percentage: 30.0,
            nuclear_percentage: 20.0,
            details: String::new(),
            top_sources: Vec::new(),
        };

        let value = serde_json::to_value(&mix)?;
        assert!(value.get("fossilPercentage").is_some());
        assert!(value.get("topSources").is_some());
        assert!(value.get("fossil_percentage").is_none());

        Ok(())
    }
}
