use chrono::{Duration, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Structured fields recovered from a utility bill scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BillScan {
    pub utility_name: Option<String>,
    pub billing_period_start: Option<NaiveDate>,
    pub billing_period_end: Option<NaiveDate>,
    pub total_kwh: Option<f64>,
    pub total_cost: Option<f64>,
    pub rate_per_kwh: Option<f64>,
    pub raw_text: String,
}

/// Grand totals above this are assumed to be account numbers or other noise.
const COST_SANITY_CEILING: f64 = 10_000.0;

const KNOWN_UTILITIES: &[&str] = &[
    "PG&E",
    "Pacific Gas and Electric",
    "Pacific Gas & Electric",
    "SCE",
    "Southern California Edison",
    "SDG&E",
    "San Diego Gas & Electric",
    "San Diego Gas and Electric",
    "Con Edison",
    "Consolidated Edison",
    "ConEd",
    "Duke Energy",
    "Florida Power & Light",
    "FPL",
    "Dominion Energy",
    "Xcel Energy",
    "AEP",
    "American Electric Power",
    "National Grid",
    "Eversource",
    "Entergy",
    "ComEd",
    "Commonwealth Edison",
    "CenterPoint",
    "Oncor",
    "TXU Energy",
    "Reliant",
    "Gexa Energy",
    "Green Mountain Energy",
    "Direct Energy",
    "Cirro Energy",
    "APS",
    "Arizona Public Service",
    "Salt River Project",
    "SRP",
    "Georgia Power",
    "Alabama Power",
    "DTE Energy",
    "PECO",
    "PPL Electric",
    "Ameren",
];

fn kwh_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)(\d[\d,]*\.?\d*)\s*kWh").expect("kwh pattern compiles"))
}

fn labeled_cost_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)(?:Amount\s*Due|Total\s*(?:Due|Charges?|Amount))[:\s]*\$\s*(\d[\d,]*\.\d{2})")
            .expect("labeled cost pattern compiles")
    })
}

fn dollar_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\$\s*(\d[\d,]*\.\d{2})").expect("dollar pattern compiles"))
}

fn cents_rate_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)(\d+\.?\d*)\s*(?:¢|cents?)\s*(?:/|per)\s*kWh")
            .expect("cents rate pattern compiles")
    })
}

fn dollar_rate_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)\$\s*(\d+\.\d+)\s*(?:/|per)\s*kWh").expect("dollar rate pattern compiles")
    })
}

fn date_regexes() -> &'static Vec<Regex> {
    static REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        [
            // named month: "Jan 15, 2024", "January 15 2024", "Jan. 15, 2024"
            r"(?i)([A-Za-z]{3,9}\.?\s+\d{1,2},?\s+\d{4})",
            r"(\d{1,2}/\d{1,2}/\d{2,4})",
            r"(\d{1,2}-\d{1,2}-\d{2,4})",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("date pattern compiles"))
        .collect()
    })
}

/// Parse the OCR text of a utility bill. `today` anchors the plausibility
/// window for billing dates (within the last two years, not in the future).
pub fn parse(text: &str, today: NaiveDate) -> BillScan {
    let mut result = BillScan {
        raw_text: text.to_string(),
        ..BillScan::default()
    };

    result.total_kwh = extract_kwh(text);
    result.total_cost = extract_total_cost(text);
    result.rate_per_kwh = extract_rate(text);
    result.utility_name = extract_utility_name(text);

    let (start, end) = extract_billing_dates(text, today);
    result.billing_period_start = start;
    result.billing_period_end = end;

    // Derive the rate when the bill states cost and usage but no unit price.
    if result.rate_per_kwh.is_none() {
        if let (Some(kwh), Some(cost)) = (result.total_kwh, result.total_cost) {
            if kwh > 0.0 {
                result.rate_per_kwh = Some(cost / kwh);
            }
        }
    }

    result
}

fn parse_grouped_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse().ok()
}

fn extract_kwh(text: &str) -> Option<f64> {
    let captures = kwh_regex().captures(text)?;
    parse_grouped_number(&captures[1])
}

fn extract_total_cost(text: &str) -> Option<f64> {
    // The labeled total is the most trustworthy line on the bill.
    if let Some(captures) = labeled_cost_regex().captures(text) {
        if let Some(value) = parse_grouped_number(&captures[1]) {
            return Some(value);
        }
    }

    // Fall back to the largest dollar amount below the sanity ceiling; the
    // grand total is usually the biggest line item.
    let mut largest = 0.0_f64;
    for captures in dollar_regex().captures_iter(text) {
        if let Some(value) = parse_grouped_number(&captures[1]) {
            if value > largest && value < COST_SANITY_CEILING {
                largest = value;
            }
        }
    }
    (largest > 0.0).then_some(largest)
}

fn extract_rate(text: &str) -> Option<f64> {
    if let Some(captures) = cents_rate_regex().captures(text) {
        if let Some(cents) = parse_grouped_number(&captures[1]) {
            return Some(cents / 100.0);
        }
    }
    let captures = dollar_rate_regex().captures(text)?;
    parse_grouped_number(&captures[1])
}

fn extract_utility_name(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    KNOWN_UTILITIES
        .iter()
        .find(|name| lowered.contains(&name.to_lowercase()))
        .map(|name| name.to_string())
}

fn extract_billing_dates(
    text: &str,
    today: NaiveDate,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let mut dates = Vec::new();
    for regex in date_regexes() {
        for captures in regex.captures_iter(text) {
            if let Some(date) = parse_date(&captures[1]) {
                dates.push(date);
            }
        }
    }

    dates.sort();
    let cutoff = today - Duration::days(365 * 2);
    let recent: Vec<NaiveDate> = dates
        .into_iter()
        .filter(|date| *date > cutoff && *date <= today)
        .collect();

    match recent.as_slice() {
        [] => (None, None),
        [only] => (Some(*only), None),
        [start, end, ..] => (Some(*start), Some(*end)),
    }
}

const DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%m/%d/%y",
    "%m-%d-%Y",
    "%m-%d-%y",
    "%b %d, %Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b. %d, %Y",
    "%b. %d %Y",
];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}
