//! Colors, badges and chart rows derived from analysis data.
//!
//! Pure functions only. The palette mirrors the web dashboard this terminal
//! view replaces so screenshots stay comparable.

use ratatui::style::Color;
use serde::Serialize;

use crate::domain::{EnergyMix, EnergyRecord};

/// Renewable share (percent) above which a country counts as leading.
pub const LEADING_RENEWABLE_THRESHOLD: f64 = 20.0;

/// Country singled out in the highlight card.
pub const HIGHLIGHT_COUNTRY: &str = "egypt";

pub const RENEWABLE_COLOR: Color = Color::Rgb(34, 197, 94);
pub const NUCLEAR_COLOR: Color = Color::Rgb(234, 179, 8);
pub const GAS_COLOR: Color = Color::Rgb(249, 115, 22);
pub const FOSSIL_COLOR: Color = Color::Rgb(239, 68, 68);
pub const DEFAULT_SOURCE_COLOR: Color = Color::Rgb(59, 130, 246);

pub const GENERATION_BAR_COLOR: Color = Color::Rgb(59, 130, 246);
pub const EMISSIONS_BAR_COLOR: Color = Color::Rgb(100, 116, 139);

const RENEWABLE_KEYWORDS: [&str; 5] = ["solar", "wind", "hydro", "renewable", "geothermal"];
const FOSSIL_KEYWORDS: [&str; 3] = ["oil", "coal", "fossil"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCategory {
    Renewable,
    Nuclear,
    Gas,
    Fossil,
    Other,
}

impl SourceCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Renewable => "renewable",
            Self::Nuclear => "nuclear",
            Self::Gas => "gas",
            Self::Fossil => "fossil",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Renewable => "Renewable",
            Self::Nuclear => "Nuclear",
            Self::Gas => "Gas",
            Self::Fossil => "Fossil",
            Self::Other => "Other",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Renewable => RENEWABLE_COLOR,
            Self::Nuclear => NUCLEAR_COLOR,
            Self::Gas => GAS_COLOR,
            Self::Fossil => FOSSIL_COLOR,
            Self::Other => DEFAULT_SOURCE_COLOR,
        }
    }
}

/// Classify a free-text source name; the first matching category wins.
pub fn classify_source(source: &str) -> SourceCategory {
    let name = source.to_lowercase();

    if mentions_any(&name, &RENEWABLE_KEYWORDS) {
        SourceCategory::Renewable
    } else if name.contains("nuclear") {
        SourceCategory::Nuclear
    } else if name.contains("gas") {
        SourceCategory::Gas
    } else if mentions_any(&name, &FOSSIL_KEYWORDS) {
        SourceCategory::Fossil
    } else {
        SourceCategory::Other
    }
}

fn mentions_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| name.contains(keyword))
}

pub fn source_color(source: &str) -> Color {
    classify_source(source).color()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leadership {
    Leading,
    Transitioning,
}

impl Leadership {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Leading => "Leading",
            Self::Transitioning => "Transitioning",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Leading => RENEWABLE_COLOR,
            Self::Transitioning => GAS_COLOR,
        }
    }
}

pub fn leadership(record: &EnergyRecord) -> Leadership {
    if record.energy_mix.renewable_percentage > LEADING_RENEWABLE_THRESHOLD {
        Leadership::Leading
    } else {
        Leadership::Transitioning
    }
}

/// The record shown in the highlight card, if the service returned one.
pub fn find_highlight(records: &[EnergyRecord]) -> Option<&EnergyRecord> {
    records
        .iter()
        .find(|record| record.country.to_lowercase().contains(HIGHLIGHT_COUNTRY))
}

/// One row of the stacked energy-mix chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixRow {
    pub country: String,
    #[serde(rename = "Fossil")]
    pub fossil: f64,
    #[serde(rename = "Renewable")]
    pub renewable: f64,
    #[serde(rename = "Nuclear")]
    pub nuclear: f64,
}

impl MixRow {
    pub fn from_mix(country: &str, mix: &EnergyMix) -> Self {
        Self {
            country: country.to_string(),
            fossil: mix.fossil_percentage,
            renewable: mix.renewable_percentage,
            nuclear: mix.nuclear_percentage,
        }
    }

    /// Segments in stacking order (renewable, nuclear, fossil).
    pub const fn segments(&self) -> [(SourceCategory, f64); 3] {
        [
            (SourceCategory::Renewable, self.renewable),
            (SourceCategory::Nuclear, self.nuclear),
            (SourceCategory::Fossil, self.fossil),
        ]
    }
}

/// Flatten every record's mix for stacked display. Values are not renormalized.
pub fn stacked_mix(records: &[EnergyRecord]) -> Vec<MixRow> {
    records
        .iter()
        .map(|record| MixRow::from_mix(&record.country, &record.energy_mix))
        .collect()
}

/// Whole numbers without decimals, everything else with one decimal place.
pub fn display_number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
