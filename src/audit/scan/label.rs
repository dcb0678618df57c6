use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Structured fields recovered from an equipment rating plate or
/// EnergyGuide label photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelScan {
    pub manufacturer: Option<String>,
    pub model_number: Option<String>,
    pub efficiency_value: Option<f64>,
    pub efficiency_unit: Option<&'static str>,
    pub btu_capacity: Option<u32>,
    pub raw_text: String,
}

const KNOWN_MANUFACTURERS: &[&str] = &[
    "carrier",
    "trane",
    "lennox",
    "goodman",
    "rheem",
    "york",
    "daikin",
    "mitsubishi",
    "bosch",
    "ao smith",
    "a.o. smith",
    "bradford white",
    "navien",
    "rinnai",
    "amana",
    "bryant",
    "ruud",
    "heil",
    "payne",
    "coleman",
    "frigidaire",
    "lg",
    "samsung",
    "whirlpool",
    "ge",
    "general electric",
    "maytag",
    "kenmore",
    "speed queen",
    "electrolux",
    "honeywell",
    "ecobee",
    "nest",
    "emerson",
    "sensi",
    "pella",
    "andersen",
    "marvin",
    "milgard",
    "jeld-wen",
];

// Ordered: the first pattern that matches wins and stops the search, so the
// more specific unit names must come before substrings of themselves.
const EFFICIENCY_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)SEER2?\s*[:=]?\s*(\d+\.?\d*)", "SEER"),
    (r"(?i)EER\s*[:=]?\s*(\d+\.?\d*)", "EER"),
    (r"(?i)CEER\s*[:=]?\s*(\d+\.?\d*)", "CEER"),
    (r"(?i)HSPF2?\s*[:=]?\s*(\d+\.?\d*)", "HSPF"),
    (r"(?i)AFUE\s*[:=]?\s*(\d+\.?\d*)\s*%?", "AFUE"),
    (r"(?i)UEF\s*[:=]?\s*(\d+\.?\d*)", "UEF"),
    (r"(?i)U-?factor\s*[:=]?\s*(\d+\.?\d*)", "U-factor"),
    (r"(?i)R-?value\s*[:=]?\s*R?-?(\d+\.?\d*)", "R-value"),
    (r"(?i)IMEF\s*[:=]?\s*(\d+\.?\d*)", "IMEF"),
    (r"(?i)CEF\s*[:=]?\s*(\d+\.?\d*)", "CEF"),
];

fn efficiency_regexes() -> &'static Vec<(Regex, &'static str)> {
    static REGEXES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        EFFICIENCY_PATTERNS
            .iter()
            .map(|(pattern, unit)| {
                (
                    Regex::new(pattern).expect("efficiency pattern compiles"),
                    *unit,
                )
            })
            .collect()
    })
}

fn model_number_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // alphanumeric token 8-20 chars, starts with an uppercase letter
    REGEX.get_or_init(|| Regex::new(r"[A-Z][A-Z0-9\-]{7,19}").expect("model pattern compiles"))
}

fn btu_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)(\d{1,3}[,.]?\d{3})\s*BTU").expect("btu pattern compiles"))
}

/// Parse the OCR text of an equipment label. Only the first match in
/// document order is taken for every field.
pub fn parse(text: &str) -> LabelScan {
    let mut result = LabelScan {
        raw_text: text.to_string(),
        ..LabelScan::default()
    };

    let lowered = text.to_lowercase();
    for manufacturer in KNOWN_MANUFACTURERS {
        if lowered.contains(manufacturer) {
            result.manufacturer = Some(title_case(manufacturer));
            break;
        }
    }

    for (regex, unit) in efficiency_regexes() {
        if let Some(captures) = regex.captures(text) {
            if let Some(value) = captures.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
                result.efficiency_value = Some(value);
                result.efficiency_unit = Some(unit);
                break;
            }
        }
    }

    if let Some(m) = model_number_regex().find(text) {
        result.model_number = Some(m.as_str().to_string());
    }

    if let Some(captures) = btu_regex().captures(text) {
        let digits: String = captures[1]
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        result.btu_capacity = digits.parse().ok();
    }

    result
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_manufacturer_case_insensitively() {
        let scan = parse("TRANE XR16 outdoor unit");
        assert_eq!(scan.manufacturer.as_deref(), Some("Trane"));
    }

    #[test]
    fn title_cases_multi_word_manufacturers() {
        let scan = parse("BRADFORD WHITE water heater UEF 0.93");
        assert_eq!(scan.manufacturer.as_deref(), Some("Bradford White"));
        assert_eq!(scan.efficiency_unit, Some("UEF"));
        assert_eq!(scan.efficiency_value, Some(0.93));
    }

    #[test]
    fn first_efficiency_pattern_wins() {
        // SEER appears in the ordered list before EER, so SEER is reported
        // even though the EER pattern would also match inside "SEER".
        let scan = parse("SEER 16.5 EER 12.0");
        assert_eq!(scan.efficiency_unit, Some("SEER"));
        assert_eq!(scan.efficiency_value, Some(16.5));
    }

    #[test]
    fn extracts_model_number_token() {
        let scan = parse("Model XR16-036-230 Serial 123");
        assert_eq!(scan.model_number.as_deref(), Some("XR16-036-230"));
        // short tokens and lowercase-leading words are not model numbers
        let scan = parse("installed 2019, unit no. 4521");
        assert_eq!(scan.model_number, None);
    }

    #[test]
    fn strips_separators_from_btu_capacity() {
        let scan = parse("Cooling capacity 36,000 BTU");
        assert_eq!(scan.btu_capacity, Some(36000));
        let scan = parse("Capacity 24.000 BTU/h");
        assert_eq!(scan.btu_capacity, Some(24000));
    }

    #[test]
    fn empty_text_yields_empty_scan() {
        let scan = parse("");
        assert_eq!(scan.manufacturer, None);
        assert_eq!(scan.efficiency_value, None);
        assert_eq!(scan.model_number, None);
        assert_eq!(scan.btu_capacity, None);
    }
}
