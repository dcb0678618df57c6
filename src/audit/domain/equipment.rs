use crate::audit::catalog::EfficiencySpec;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Major HVAC, water-heating, envelope, and laundry categories audited per home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    CentralAc,
    HeatPump,
    Furnace,
    WaterHeaterTank,
    WaterHeaterTankless,
    WindowUnit,
    Thermostat,
    Insulation,
    Windows,
    Washer,
    Dryer,
}

impl EquipmentType {
    pub const fn all() -> [Self; 11] {
        [
            Self::CentralAc,
            Self::HeatPump,
            Self::Furnace,
            Self::WaterHeaterTank,
            Self::WaterHeaterTankless,
            Self::WindowUnit,
            Self::Thermostat,
            Self::Insulation,
            Self::Windows,
            Self::Washer,
            Self::Dryer,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CentralAc => "Central AC",
            Self::HeatPump => "Heat Pump",
            Self::Furnace => "Furnace",
            Self::WaterHeaterTank => "Water Heater (Tank)",
            Self::WaterHeaterTankless => "Water Heater (Tankless)",
            Self::WindowUnit => "Window AC Unit",
            Self::Thermostat => "Thermostat",
            Self::Insulation => "Insulation",
            Self::Windows => "Windows",
            Self::Washer => "Washer",
            Self::Dryer => "Dryer",
        }
    }

    /// Industry unit the efficiency figure is expressed in.
    pub const fn efficiency_unit(self) -> &'static str {
        match self {
            Self::CentralAc | Self::WindowUnit | Self::HeatPump => "SEER",
            Self::Furnace => "% AFUE",
            Self::WaterHeaterTank | Self::WaterHeaterTankless => "UEF",
            Self::Thermostat => "type",
            Self::Insulation => "R-value",
            Self::Windows => "U-factor",
            Self::Washer => "IMEF",
            Self::Dryer => "CEF",
        }
    }

    /// U-factor is the one unit in the catalog where a lower number is better.
    pub const fn lower_is_better(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Guidance shown when the user points the camera at this equipment.
    pub const fn camera_prompt(self) -> &'static str {
        match self {
            Self::CentralAc | Self::HeatPump => {
                "Point camera at the rating plate on your outdoor unit"
            }
            Self::Furnace => {
                "Photograph the yellow EnergyGuide label or rating plate on your furnace"
            }
            Self::WaterHeaterTank | Self::WaterHeaterTankless => {
                "Capture the EnergyGuide label on your water heater"
            }
            Self::WindowUnit => "Photograph the rating label on the side of the unit",
            Self::Thermostat => "Photograph your thermostat display",
            Self::Insulation => "Photograph the insulation label or packaging",
            Self::Windows => "Capture the NFRC sticker on your window",
            Self::Washer => "Photograph the EnergyGuide label on your washer",
            Self::Dryer => "Photograph the EnergyGuide label on your dryer",
        }
    }

    /// Fraction of whole-home energy use attributed to this equipment type,
    /// used to weight the grading average. Weights are per type and do not
    /// sum to 1 across a home.
    pub const fn energy_share_weight(self) -> f64 {
        match self {
            Self::CentralAc | Self::HeatPump | Self::Furnace => 0.45,
            Self::WaterHeaterTank | Self::WaterHeaterTankless => 0.18,
            Self::Insulation | Self::Windows => 0.25,
            Self::Thermostat | Self::WindowUnit | Self::Washer | Self::Dryer => 0.12,
        }
    }
}

/// Installation age band; the efficiency spec lookup keys on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeRange {
    Years0To5,
    Years5To10,
    Years10To15,
    Years15To20,
    Years20Plus,
}

impl AgeRange {
    pub const fn all() -> [Self; 5] {
        [
            Self::Years0To5,
            Self::Years5To10,
            Self::Years10To15,
            Self::Years15To20,
            Self::Years20Plus,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Years0To5 => "0 to 5 years",
            Self::Years5To10 => "5 to 10 years",
            Self::Years10To15 => "10 to 15 years",
            Self::Years15To20 => "15 to 20 years",
            Self::Years20Plus => "20+ years",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Years0To5 => "< 5 yr",
            Self::Years5To10 => "5-10 yr",
            Self::Years10To15 => "10-15 yr",
            Self::Years15To20 => "15-20 yr",
            Self::Years20Plus => "20+ yr",
        }
    }
}

static EQUIPMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_equipment_id() -> String {
    let id = EQUIPMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("equipment-{id:06}")
}

/// One audited piece of home equipment. `estimated_efficiency` of zero means
/// no rating was recovered; downstream math substitutes the age-band estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub kind: EquipmentType,
    pub manufacturer: Option<String>,
    pub model_number: Option<String>,
    pub age_range: AgeRange,
    pub estimated_efficiency: f64,
    pub current_code_minimum: f64,
    pub best_in_class: f64,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDate>,
}

impl Equipment {
    pub fn new(kind: EquipmentType, age_range: AgeRange) -> Self {
        Self {
            id: next_equipment_id(),
            kind,
            manufacturer: None,
            model_number: None,
            age_range,
            estimated_efficiency: 0.0,
            current_code_minimum: 0.0,
            best_in_class: 0.0,
            notes: None,
            created_at: None,
        }
    }

    /// Create an entry whose baseline figures come from the reference table,
    /// as the scan flow does after a spec lookup.
    pub fn from_spec(kind: EquipmentType, age_range: AgeRange, spec: &EfficiencySpec) -> Self {
        Self {
            id: next_equipment_id(),
            kind,
            manufacturer: None,
            model_number: None,
            age_range,
            estimated_efficiency: spec.estimated,
            current_code_minimum: spec.current_code_minimum,
            best_in_class: spec.best_in_class,
            notes: None,
            created_at: None,
        }
    }
}
