use crate::audit::domain::ApplianceCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One ranked hypothesis from the platform image classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub identifier: String,
    pub confidence: f32,
}

/// A classifier observation mapped into the appliance catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationMatch {
    pub category: ApplianceCategory,
    pub confidence: f32,
    pub raw_identifier: String,
}

/// Distinct categories kept from one classification pass.
pub const DEFAULT_TOP_K: usize = 3;

/// Observations at or below this confidence are discarded as noise.
const MIN_CONFIDENCE: f32 = 0.05;

/// Classifier identifiers mapped to catalog categories. The platform model
/// has over a thousand labels; only these have an appliance counterpart.
const IDENTIFIER_MAPPING: &[(&str, ApplianceCategory)] = &[
    // Entertainment
    ("television", ApplianceCategory::Television),
    ("tv", ApplianceCategory::Television),
    ("screen", ApplianceCategory::Television),
    ("monitor", ApplianceCategory::Monitor),
    ("desktop computer", ApplianceCategory::Desktop),
    ("computer", ApplianceCategory::Desktop),
    ("laptop", ApplianceCategory::Laptop),
    ("notebook", ApplianceCategory::Laptop),
    ("joystick", ApplianceCategory::GamingConsole),
    ("loudspeaker", ApplianceCategory::Soundbar),
    ("speaker", ApplianceCategory::Soundbar),
    // Kitchen
    ("refrigerator", ApplianceCategory::Refrigerator),
    ("washer", ApplianceCategory::Dishwasher),
    ("dishwasher", ApplianceCategory::Dishwasher),
    ("microwave", ApplianceCategory::Microwave),
    ("oven", ApplianceCategory::Oven),
    ("stove", ApplianceCategory::Oven),
    ("toaster", ApplianceCategory::Toaster),
    ("coffee maker", ApplianceCategory::CoffeeMaker),
    ("espresso maker", ApplianceCategory::CoffeeMaker),
    ("coffeepot", ApplianceCategory::CoffeeMaker),
    // Lighting
    ("lamp", ApplianceCategory::LampFixture),
    ("table lamp", ApplianceCategory::LampFixture),
    ("lampshade", ApplianceCategory::LampFixture),
    ("spotlight", ApplianceCategory::Floodlight),
    // Computing
    ("keyboard", ApplianceCategory::Desktop),
    ("mouse", ApplianceCategory::Desktop),
    ("modem", ApplianceCategory::Router),
    // Other
    ("electric fan", ApplianceCategory::CeilingFan),
    ("space heater", ApplianceCategory::PortableHeater),
];

/// Map ranked classifier observations to appliance categories, deduplicating
/// by category and keeping the first `top_k` distinct matches. When nothing
/// maps, a single `Other` result with zero confidence lets the user pick
/// manually.
pub fn map_observations(observations: &[Observation], top_k: usize) -> Vec<ClassificationMatch> {
    let mut matches = Vec::new();
    let mut seen: HashSet<ApplianceCategory> = HashSet::new();

    for observation in observations {
        if observation.confidence <= MIN_CONFIDENCE {
            continue;
        }
        if let Some(category) = map_identifier(&observation.identifier) {
            if seen.insert(category) {
                matches.push(ClassificationMatch {
                    category,
                    confidence: observation.confidence,
                    raw_identifier: observation.identifier.clone(),
                });
            }
        }
        if matches.len() >= top_k {
            break;
        }
    }

    if matches.is_empty() {
        matches.push(ClassificationMatch {
            category: ApplianceCategory::Other,
            confidence: 0.0,
            raw_identifier: observations
                .first()
                .map(|observation| observation.identifier.clone())
                .unwrap_or_else(|| "unknown".to_string()),
        });
    }

    matches
}

fn map_identifier(identifier: &str) -> Option<ApplianceCategory> {
    let lowered = identifier.to_lowercase();

    // Exact match first, substring sweep second.
    if let Some((_, category)) = IDENTIFIER_MAPPING
        .iter()
        .find(|(key, _)| *key == lowered.as_str())
    {
        return Some(*category);
    }

    IDENTIFIER_MAPPING
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|(_, category)| *category)
}
