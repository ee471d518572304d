//! Response shape shared by the generation request and local validation.
//!
//! The schema uses the generation service's dialect (`OBJECT`, `ARRAY`,
//! `STRING`, `NUMBER`). [`missing_required`] walks the same document so the
//! required-field set is only declared once.

use serde_json::{json, Value};

fn source_share_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "source": { "type": "STRING", "description": "Name of the source (e.g. Natural Gas, Solar, Oil)" },
            "percentage": { "type": "NUMBER", "description": "Percentage share (0-100)" }
        },
        "required": ["source", "percentage"]
    })
}

fn energy_mix_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "fossilPercentage": { "type": "NUMBER", "description": "Percentage of generation from fossil fuels (0-100)" },
            "renewablePercentage": { "type": "NUMBER", "description": "Percentage of generation from renewables (0-100)" },
            "nuclearPercentage": { "type": "NUMBER", "description": "Percentage of generation from nuclear (0-100)" },
            "details": { "type": "STRING", "description": "Short summary of main sources, e.g., 'Natural Gas dominance, growing Solar'" },
            "topSources": {
                "type": "ARRAY",
                "description": "List of top 3 electricity generation sources with their percentage share.",
                "items": source_share_schema()
            }
        },
        "required": ["fossilPercentage", "renewablePercentage", "nuclearPercentage", "details", "topSources"]
    })
}

fn energy_record_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "country": { "type": "STRING", "description": "Name of the country" },
            "totalGenerationTWh": { "type": "NUMBER", "description": "Total annual electricity generation in Terawatt-hours (TWh)" },
            "co2EmissionsMt": { "type": "NUMBER", "description": "Annual CO2 emissions from energy in Million Tonnes (Mt)" },
            "energyMix": energy_mix_schema(),
            "analysis": { "type": "STRING", "description": "A brief specific insight about this country's clean energy transition status." }
        },
        "required": ["country", "totalGenerationTWh", "co2EmissionsMt", "energyMix", "analysis"]
    })
}

/// Schema of the whole analysis document.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "overview": { "type": "STRING", "description": "A high-level paragraph comparing Egypt's situation to its neighbors generally." },
            "data": {
                "type": "ARRAY",
                "items": energy_record_schema()
            },
            "generatedAt": { "type": "STRING", "description": "The approximate year/period this data represents." }
        },
        "required": ["overview", "data", "generatedAt"]
    })
}

/// Dotted paths of required fields absent (or null) in `value`.
///
/// Only presence is checked here; a field of the wrong type is reported later
/// by typed deserialization.
pub fn missing_required(schema: &Value, value: &Value) -> Vec<String> {
    let mut missing = Vec::new();
    collect_missing(schema, value, "", &mut missing);
    missing
}

fn collect_missing(schema: &Value, value: &Value, path: &str, missing: &mut Vec<String>) {
    match schema.get("type").and_then(Value::as_str) {
        Some("OBJECT") => {
            let Some(object) = value.as_object() else {
                return;
            };

            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for field in required.iter().filter_map(Value::as_str) {
                    if object.get(field).map_or(true, Value::is_null) {
                        missing.push(join_path(path, field));
                    }
                }
            }

            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (name, child_schema) in properties {
                    if let Some(child) = object.get(name) {
                        collect_missing(child_schema, child, &join_path(path, name), missing);
                    }
                }
            }
        }
        Some("ARRAY") => {
            let (Some(items), Some(elements)) = (schema.get("items"), value.as_array()) else {
                return;
            };

            for (index, element) in elements.iter().enumerate() {
                collect_missing(items, element, &format!("{path}[{index}]"), missing);
            }
        }
        _ => {}
    }
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_of(schema: &Value) -> Vec<&str> {
        schema["required"]
            .as_array()
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn valid_document() -> Value {
        json!({
            "overview": "Regional overview",
            "generatedAt": "2023",
            "data": [{
                "country": "Egypt",
                "totalGenerationTWh": 210.0,
                "co2EmissionsMt": 250.0,
                "energyMix": {
                    "fossilPercentage": 88.0,
                    "renewablePercentage": 12.0,
                    "nuclearPercentage": 0.0,
                    "details": "Gas",
                    "topSources": [{ "source": "Natural Gas", "percentage": 78.0 }]
                },
                "analysis": "Growing solar"
            }]
        })
    }

    #[test]
    fn required_sets_cover_every_field() {
        let schema = response_schema();
        assert_eq!(required_of(&schema), vec!["overview", "data", "generatedAt"]);

        let record = &schema["properties"]["data"]["items"];
        assert_eq!(
            required_of(record),
            vec!["country", "totalGenerationTWh", "co2EmissionsMt", "energyMix", "analysis"]
        );

        let mix = &record["properties"]["energyMix"];
        assert_eq!(
            required_of(mix),
            vec![
                "fossilPercentage",
                "renewablePercentage",
                "nuclearPercentage",
                "details",
                "topSources"
            ]
        );
        assert_eq!(
            required_of(&mix["properties"]["topSources"]["items"]),
            vec!["source", "percentage"]
        );
    }

    #[test]
    fn valid_document_has_no_missing_fields() {
        assert!(missing_required(&response_schema(), &valid_document()).is_empty());
    }

    #[test]
    fn reports_nested_paths() {
        let mut document = valid_document();
        document["data"][0]["energyMix"]["topSources"] = Value::Null;
        if let Some(root) = document.as_object_mut() {
            root.remove("generatedAt");
        }

        let missing = missing_required(&response_schema(), &document);
        assert!(missing.contains(&"generatedAt".to_string()));
        assert!(missing.contains(&"data[0].energyMix.topSources".to_string()));
        assert_eq!(missing.len(), 2);
    }

    #[test]
    fn reports_missing_source_share_fields() {
        let mut document = valid_document();
        document["data"][0]["energyMix"]["topSources"] = json!([
            { "source": "Solar" },
            { "source": "Wind", "percentage": 3.0 }
        ]);

        let missing = missing_required(&response_schema(), &document);
        assert_eq!(missing, vec!["data[0].energyMix.topSources[0].percentage"]);
    }

    #[test]
    fn non_object_root_is_left_to_deserialization() {
        assert!(missing_required(&response_schema(), &json!([1, 2, 3])).is_empty());
    }
}
