//! Upgrade tiers for a single piece of equipment and home-level
//! recommendations not tied to any one unit.

use crate::audit::catalog::{self, CostModel};
use crate::audit::domain::{ClimateZone, EnvelopeRating, Equipment, EquipmentType, Home};
use crate::config::RatePlan;
use serde::{Deserialize, Serialize};

/// Share of phantom load a smart power strip can eliminate.
const SMART_STRIP_SAVINGS: f64 = 0.75;

/// Standby kWh/yr below this is not worth a recommendation.
const PHANTOM_THRESHOLD_KWH: f64 = 100.0;

/// Annual usage above this makes time-of-use shifting worth mentioning.
const TIME_OF_USE_THRESHOLD_KWH: f64 = 8000.0;

/// Swapping a 60 W incandescent for a 9 W LED saves 51 W per bulb.
const LED_SWAP_DELTA_KW: f64 = 0.051;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeTier {
    Good,
    Better,
    Best,
}

impl UpgradeTier {
    pub const fn all() -> [Self; 3] {
        [Self::Good, Self::Better, Self::Best]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Better => "Better",
            Self::Best => "Best",
        }
    }

    /// Installed cost range as a share of the typical replacement cost.
    const fn cost_factors(self) -> (f64, f64) {
        match self {
            Self::Good => (0.70, 0.90),
            Self::Better => (0.90, 1.10),
            Self::Best => (1.15, 1.40),
        }
    }
}

/// One upgrade option for a piece of equipment. Computed on demand for the
/// detail view and the report; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeRecommendation {
    pub tier: UpgradeTier,
    pub title: String,
    pub target_efficiency: f64,
    pub cost_low: f64,
    pub cost_high: f64,
    pub annual_savings: f64,
    pub payback_years: Option<f64>,
    pub tax_credit_eligible: bool,
    pub tax_credit_amount: f64,
    pub effective_payback_years: Option<f64>,
    pub technology_note: Option<&'static str>,
    pub already_meets_tier: bool,
}

/// Generate the Good/Better/Best options for one piece of equipment. Tier
/// targets and costs are monotonic: each step up targets a higher efficiency
/// (lower U-factor for windows) at a higher installed cost.
pub fn generate(
    equipment: &Equipment,
    climate: ClimateZone,
    home_sqft: f64,
    model: &CostModel,
) -> Vec<UpgradeRecommendation> {
    let kind = equipment.kind;
    let spec = catalog::lookup(kind, equipment.age_range);

    let code_minimum = if equipment.current_code_minimum > 0.0 {
        equipment.current_code_minimum
    } else {
        spec.current_code_minimum
    };
    let best_in_class = if equipment.best_in_class > 0.0 {
        equipment.best_in_class
    } else {
        spec.best_in_class
    };
    let current = if equipment.estimated_efficiency > 0.0 {
        equipment.estimated_efficiency
    } else {
        spec.estimated
    };

    UpgradeTier::all()
        .into_iter()
        .map(|tier| {
            let target = match tier {
                UpgradeTier::Good => code_minimum,
                UpgradeTier::Better => (code_minimum + best_in_class) / 2.0,
                UpgradeTier::Best => best_in_class,
            };

            let already_meets_tier = if kind.lower_is_better() {
                current > 0.0 && current <= target
            } else {
                current >= target
            };

            let annual_savings = if already_meets_tier {
                0.0
            } else {
                model.annual_savings(kind, current, target, home_sqft, climate)
            };

            let (low_factor, high_factor) = tier.cost_factors();
            let cost_low = spec.upgrade_cost * low_factor;
            let cost_high = spec.upgrade_cost * high_factor;
            let cost_mid = (cost_low + cost_high) / 2.0;

            let payback_years = catalog::payback_years(cost_mid, annual_savings);
            let tax_credit_amount = tax_credit(kind, tier, cost_mid);
            let tax_credit_eligible = tax_credit_amount > 0.0;
            let effective_payback_years = if tax_credit_eligible {
                catalog::payback_years((cost_mid - tax_credit_amount).max(0.0), annual_savings)
            } else {
                payback_years
            };

            UpgradeRecommendation {
                tier,
                title: tier_title(tier, kind, target),
                target_efficiency: target,
                cost_low,
                cost_high,
                annual_savings,
                payback_years,
                tax_credit_eligible,
                tax_credit_amount,
                effective_payback_years,
                technology_note: technology_note(kind, tier),
                already_meets_tier,
            }
        })
        .collect()
}

fn tier_title(tier: UpgradeTier, kind: EquipmentType, target: f64) -> String {
    let unit = kind.efficiency_unit();
    let target = format_efficiency(target);
    match tier {
        UpgradeTier::Good => format!("Meet current code ({target} {unit})"),
        UpgradeTier::Better => format!("High-efficiency upgrade ({target} {unit})"),
        UpgradeTier::Best => format!("Best in class ({target} {unit})"),
    }
}

fn format_efficiency(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.2}")
    }
}

/// Federal tax credit for the tier's typical cost, zero when the measure
/// does not qualify. Heat pump equipment qualifies at every tier; for the
/// other categories only the top-tier technology is credit-eligible.
fn tax_credit(kind: EquipmentType, tier: UpgradeTier, cost_mid: f64) -> f64 {
    let (rate, cap) = match (kind, tier) {
        (EquipmentType::HeatPump, _) => (0.30, 2000.0),
        (EquipmentType::WaterHeaterTank | EquipmentType::WaterHeaterTankless, UpgradeTier::Best) => {
            (0.30, 2000.0)
        }
        (EquipmentType::CentralAc | EquipmentType::Furnace, UpgradeTier::Best) => (0.30, 600.0),
        (EquipmentType::Windows, _) => (0.30, 600.0),
        (EquipmentType::Insulation, _) => (0.30, 1200.0),
        _ => return 0.0,
    };
    (rate * cost_mid).min(cap)
}

const fn technology_note(kind: EquipmentType, tier: UpgradeTier) -> Option<&'static str> {
    match (kind, tier) {
        (EquipmentType::HeatPump, UpgradeTier::Best) => {
            Some("Cold-climate heat pumps hold full heating capacity well below freezing.")
        }
        (
            EquipmentType::WaterHeaterTank | EquipmentType::WaterHeaterTankless,
            UpgradeTier::Best,
        ) => Some("Heat pump water heaters use roughly a third of the energy of a standard tank."),
        (EquipmentType::Dryer, UpgradeTier::Best) => {
            Some("Heat pump dryers recycle hot air and need no outdoor vent.")
        }
        (EquipmentType::Windows, UpgradeTier::Best) => {
            Some("Triple-pane low-E glazing reaches U-factors near 0.20.")
        }
        (EquipmentType::Thermostat, UpgradeTier::Best) => {
            Some("Smart thermostats learn occupancy and trim runtime automatically.")
        }
        _ => None,
    }
}

/// Bucket for a home-level recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Envelope,
    Appliance,
    Behavioral,
}

impl RecommendationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Envelope => "Envelope",
            Self::Appliance => "Appliance",
            Self::Behavioral => "Behavioral",
        }
    }
}

/// A behavioral, appliance, or envelope tip for the whole home.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub detail: String,
    pub estimated_savings: Option<String>,
}

/// Home-level recommendations not tied to a specific piece of equipment.
pub fn for_home(home: &Home, rates: &RatePlan) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let rate = home.effective_electricity_rate(rates);

    if let Some(envelope) = &home.envelope {
        if envelope.attic_insulation == EnvelopeRating::Poor {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Envelope,
                title: "Upgrade Attic Insulation".to_string(),
                detail: "Your attic insulation is rated Poor. Upgrading to R-49 can reduce \
                         heating/cooling costs by 15-25% and improve comfort year-round."
                    .to_string(),
                estimated_savings: Some("15-25% HVAC savings".to_string()),
            });
        }
        if envelope.air_sealing == EnvelopeRating::Poor {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Envelope,
                title: "Professional Air Sealing".to_string(),
                detail: "Poor air sealing allows conditioned air to escape through gaps around \
                         pipes, wiring, and ductwork. Professional sealing typically costs \
                         $350-$700 and pays back in 1-2 years."
                    .to_string(),
                estimated_savings: Some("$150-$300/yr".to_string()),
            });
        }
        if envelope.weatherstripping == EnvelopeRating::Poor {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Envelope,
                title: "Replace Weatherstripping".to_string(),
                detail: "Worn weatherstripping around doors and windows lets drafts in. \
                         Replacement is a low-cost DIY project ($20-$50 per door) with \
                         immediate comfort improvement."
                    .to_string(),
                estimated_savings: Some("$50-$100/yr".to_string()),
            });
        }
    }

    let incandescent_count = home.incandescent_count();
    if incandescent_count > 0 {
        let incandescents: Vec<_> = home
            .appliances
            .iter()
            .filter(|appliance| {
                appliance.category == crate::audit::domain::ApplianceCategory::IncandescentBulb
            })
            .collect();
        let average_hours = if incandescents.is_empty() {
            5.0
        } else {
            incandescents
                .iter()
                .map(|appliance| appliance.hours_per_day)
                .sum::<f64>()
                / incandescents.len() as f64
        };
        let annual_savings =
            f64::from(incandescent_count) * LED_SWAP_DELTA_KW * average_hours * 365.0 * rate;
        let plural = if incandescent_count == 1 { "" } else { "s" };
        recommendations.push(Recommendation {
            kind: RecommendationKind::Appliance,
            title: format!("Switch {incandescent_count} Incandescent Bulb{plural} to LED"),
            detail: format!(
                "LED bulbs use ~85% less energy and last 15-25x longer. Switching \
                 {incandescent_count} incandescent bulb{plural} saves energy immediately with \
                 no comfort trade-off."
            ),
            estimated_savings: Some(format!("${}/yr", annual_savings as i64)),
        });
    }

    let phantom_kwh = home.total_phantom_annual_kwh();
    if phantom_kwh > PHANTOM_THRESHOLD_KWH {
        let phantom_cost = phantom_kwh * rate;
        let strip_savings = phantom_cost * SMART_STRIP_SAVINGS;
        recommendations.push(Recommendation {
            kind: RecommendationKind::Appliance,
            title: "Smart Power Strips for Phantom Loads".to_string(),
            detail: format!(
                "Your devices waste ~{} kWh/yr (${}) on standby power. Smart power strips cut \
                 phantom loads by up to 75% by automatically disconnecting idle devices.",
                phantom_kwh as i64, phantom_cost as i64
            ),
            estimated_savings: Some(format!("${}/yr", strip_savings as i64)),
        });
    }

    recommendations.push(Recommendation {
        kind: RecommendationKind::Behavioral,
        title: "Thermostat Setback Schedule".to_string(),
        detail: "Setting your thermostat back 7-10\u{b0}F for 8 hours/day (while sleeping or \
                 away) can save up to 10% on heating and cooling annually, with no equipment \
                 purchase needed."
            .to_string(),
        estimated_savings: Some("Up to 10% HVAC savings".to_string()),
    });

    if let Some(bill_kwh) = home.bill_based_annual_kwh() {
        if bill_kwh > TIME_OF_USE_THRESHOLD_KWH {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Behavioral,
                title: "Shift Usage to Off-Peak Hours".to_string(),
                detail: format!(
                    "With annual usage around {} kWh, shifting laundry, dishwasher, and EV \
                     charging to off-peak hours (typically 9pm-6am) can reduce costs if your \
                     utility offers time-of-use rates.",
                    bill_kwh as i64
                ),
                estimated_savings: Some("5-15% bill reduction".to_string()),
            });
        }
    }

    recommendations
}
