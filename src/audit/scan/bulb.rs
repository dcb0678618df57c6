use crate::audit::domain::ApplianceCategory;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Structured fields recovered from a light bulb packaging or base photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulbScan {
    pub wattage: Option<f64>,
    pub lumens: Option<u32>,
    pub color_temp_kelvin: Option<u32>,
    pub bulb_type: Option<ApplianceCategory>,
    pub raw_text: String,
}

/// Color temperatures outside this window are assumed to be misreads.
const COLOR_TEMP_RANGE: std::ops::RangeInclusive<u32> = 1800..=7000;

fn wattage_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(\d+\.?\d*)\s*[Ww](?:att)?s?\b").expect("wattage pattern compiles")
    })
}

fn lumens_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(?:lm|lumens?)\b").expect("lumens pattern compiles")
    })
}

fn color_temp_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(\d{2,4})\s*[Kk]\b").expect("color temp pattern compiles"))
}

/// Parse the OCR text of a bulb label.
pub fn parse(text: &str) -> BulbScan {
    let mut result = BulbScan {
        raw_text: text.to_string(),
        ..BulbScan::default()
    };

    if let Some(captures) = wattage_regex().captures(text) {
        result.wattage = captures[1].parse().ok();
    }

    if let Some(captures) = lumens_regex().captures(text) {
        result.lumens = captures[1].parse().ok();
    }

    if let Some(captures) = color_temp_regex().captures(text) {
        if let Ok(kelvin) = captures[1].parse::<u32>() {
            if COLOR_TEMP_RANGE.contains(&kelvin) {
                result.color_temp_kelvin = Some(kelvin);
            }
        }
    }

    // Priority order: LED markings are the most explicit, incandescent and
    // halogen labels the least.
    let lowered = text.to_lowercase();
    result.bulb_type = if lowered.contains("led") {
        Some(ApplianceCategory::LedBulb)
    } else if lowered.contains("cfl") || lowered.contains("compact fluorescent") {
        Some(ApplianceCategory::CflBulb)
    } else if lowered.contains("incandescent") || lowered.contains("halogen") {
        Some(ApplianceCategory::IncandescentBulb)
    } else {
        None
    };

    result
}
