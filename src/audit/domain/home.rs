use super::{Appliance, ApplianceCategory, EnergyBill, Equipment};
use crate::config::RatePlan;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Construction era of the home, coarse enough for a guided onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearBuiltRange {
    Pre1970,
    Y1970To1989,
    Y1990To2005,
    Y2006To2015,
    Y2016Plus,
}

impl YearBuiltRange {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pre1970 => "Pre-1970",
            Self::Y1970To1989 => "1970 to 1989",
            Self::Y1990To2005 => "1990 to 2005",
            Self::Y2006To2015 => "2006 to 2015",
            Self::Y2016Plus => "2016+",
        }
    }
}

/// Coarse climate bucket driving the heating/cooling load multiplier. The
/// multiplier constants are part of the pluggable cost table, not physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateZone {
    Hot,
    Moderate,
    Cold,
}

impl ClimateZone {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hot => "Hot",
            Self::Moderate => "Moderate",
            Self::Cold => "Cold",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Hot => "Long cooling season, minimal heating",
            Self::Moderate => "Balanced heating and cooling",
            Self::Cold => "Long heating season, short summers",
        }
    }
}

impl Default for ClimateZone {
    fn default() -> Self {
        Self::Moderate
    }
}

/// Homeowner rating of one envelope aspect during the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeRating {
    Good,
    Fair,
    Poor,
}

impl EnvelopeRating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

/// Self-assessed condition of the building envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeAssessment {
    pub attic_insulation: EnvelopeRating,
    pub air_sealing: EnvelopeRating,
    pub weatherstripping: EnvelopeRating,
}

/// A room with its measured or estimated floor area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub square_footage: f64,
}

static HOME_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_home_id() -> String {
    let id = HOME_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("home-{id:06}")
}

/// Aggregate root for one audited home. The engine treats an instance as a
/// read snapshot per invocation; ownership of persistence lives elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub year_built: YearBuiltRange,
    pub total_sqft: Option<f64>,
    pub climate_zone: ClimateZone,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub appliances: Vec<Appliance>,
    #[serde(default)]
    pub energy_bills: Vec<EnergyBill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope: Option<EnvelopeAssessment>,
}

impl Home {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: next_home_id(),
            name: name.into(),
            address: None,
            year_built: YearBuiltRange::Y1990To2005,
            total_sqft: None,
            climate_zone: ClimateZone::Moderate,
            rooms: Vec::new(),
            equipment: Vec::new(),
            appliances: Vec::new(),
            energy_bills: Vec::new(),
            envelope: None,
        }
    }

    /// Manual override when positive, otherwise the sum of room areas.
    pub fn computed_total_sqft(&self) -> f64 {
        if let Some(manual) = self.total_sqft {
            if manual > 0.0 {
                return manual;
            }
        }
        self.rooms.iter().map(|room| room.square_footage).sum()
    }

    /// Total standby energy wasted per year across the appliance inventory.
    pub fn total_phantom_annual_kwh(&self) -> f64 {
        self.appliances
            .iter()
            .map(Appliance::phantom_annual_kwh)
            .sum()
    }

    /// Mean annualized usage across bills that carry a full billing window.
    pub fn bill_based_annual_kwh(&self) -> Option<f64> {
        let annualized: Vec<f64> = self
            .energy_bills
            .iter()
            .filter_map(EnergyBill::annualized_kwh)
            .collect();
        if annualized.is_empty() {
            return None;
        }
        Some(annualized.iter().sum::<f64>() / annualized.len() as f64)
    }

    /// Electricity rate for cost math: the most recent bill that can produce
    /// a rate wins, otherwise the configured rate applies.
    pub fn effective_electricity_rate(&self, rates: &RatePlan) -> f64 {
        self.energy_bills
            .iter()
            .rev()
            .find(|bill| {
                bill.rate_per_kwh.map_or(false, |rate| rate > 0.0)
                    || (bill.total_kwh > 0.0 && bill.total_cost > 0.0)
            })
            .map(|bill| bill.computed_rate(rates.electricity))
            .unwrap_or(rates.electricity)
    }

    /// Number of incandescent bulbs still installed, counting quantity.
    pub fn incandescent_count(&self) -> u32 {
        self.appliances
            .iter()
            .filter(|appliance| appliance.category == ApplianceCategory::IncandescentBulb)
            .map(|appliance| appliance.quantity)
            .sum()
    }

    /// Reject snapshots the engines cannot price sensibly. Zero square
    /// footage is fine (the default area applies); negative or non-finite
    /// figures are not.
    pub fn validate(&self) -> Result<(), HomeValidationError> {
        if let Some(area) = self.total_sqft {
            if area < 0.0 || !area.is_finite() {
                return Err(HomeValidationError::InvalidSquareFootage);
            }
        }
        if self
            .rooms
            .iter()
            .any(|room| room.square_footage < 0.0 || !room.square_footage.is_finite())
        {
            return Err(HomeValidationError::InvalidSquareFootage);
        }
        for appliance in &self.appliances {
            if appliance.wattage < 0.0 || !appliance.wattage.is_finite() {
                return Err(HomeValidationError::NegativeWattage {
                    name: appliance.name.clone(),
                });
            }
            if !(0.0..=24.0).contains(&appliance.hours_per_day) {
                return Err(HomeValidationError::ImplausibleRuntime {
                    name: appliance.name.clone(),
                });
            }
        }
        if self
            .energy_bills
            .iter()
            .any(|bill| bill.total_kwh < 0.0 || bill.total_cost < 0.0)
        {
            return Err(HomeValidationError::NegativeBillFigures);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HomeValidationError {
    #[error("square footage must be a non-negative finite number")]
    InvalidSquareFootage,
    #[error("appliance '{name}' has an invalid wattage")]
    NegativeWattage { name: String },
    #[error("appliance '{name}' runs outside 0-24 hours per day")]
    ImplausibleRuntime { name: String },
    #[error("bill usage and cost must be non-negative")]
    NegativeBillFigures,
}
