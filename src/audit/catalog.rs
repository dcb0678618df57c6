//! Static reference tables behind the audit math: efficiency specs keyed by
//! equipment type and age band, industry worst-case values, and the annual
//! cost model. Constants live here so the engines stay pure arithmetic.

use crate::audit::domain::{AgeRange, ClimateZone, EquipmentType};
use serde::{Deserialize, Serialize};

/// Square footage assumed when a home has no measured area yet.
pub const DEFAULT_HOME_SQFT: f64 = 1500.0;

/// Lookup result for one equipment type and age band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySpec {
    /// Typical efficiency for a unit of this age still in service.
    pub estimated: f64,
    /// Best rating currently sold in this category.
    pub best_in_class: f64,
    /// Typical installed cost of a replacement, in dollars.
    pub upgrade_cost: f64,
    /// Minimum efficiency today's building code allows for new installs.
    pub current_code_minimum: f64,
}

/// Deterministic spec lookup. Age only moves the `estimated` figure; the
/// best-in-class, code minimum, and upgrade cost are per-type constants.
pub fn lookup(kind: EquipmentType, age: AgeRange) -> EfficiencySpec {
    let (current_code_minimum, best_in_class, upgrade_cost, by_age) = type_row(kind);
    let estimated = match age {
        AgeRange::Years0To5 => by_age[0],
        AgeRange::Years5To10 => by_age[1],
        AgeRange::Years10To15 => by_age[2],
        AgeRange::Years15To20 => by_age[3],
        AgeRange::Years20Plus => by_age[4],
    };
    EfficiencySpec {
        estimated,
        best_in_class,
        upgrade_cost,
        current_code_minimum,
    }
}

/// (code minimum, best in class, upgrade cost, estimated efficiency per age band)
const fn type_row(kind: EquipmentType) -> (f64, f64, f64, [f64; 5]) {
    match kind {
        EquipmentType::CentralAc => (14.0, 22.0, 6800.0, [16.0, 14.5, 12.0, 10.0, 9.0]),
        EquipmentType::HeatPump => (15.0, 24.0, 8200.0, [18.0, 15.5, 13.0, 10.5, 9.0]),
        EquipmentType::Furnace => (80.0, 98.5, 5600.0, [95.0, 92.0, 85.0, 80.0, 68.0]),
        EquipmentType::WaterHeaterTank => (0.90, 0.95, 1500.0, [0.93, 0.90, 0.62, 0.56, 0.50]),
        EquipmentType::WaterHeaterTankless => (0.87, 0.99, 2900.0, [0.95, 0.93, 0.90, 0.87, 0.82]),
        EquipmentType::WindowUnit => (12.0, 15.5, 750.0, [13.5, 12.0, 10.5, 9.0, 8.0]),
        EquipmentType::Thermostat => (0.0, 1.0, 250.0, [1.0, 1.0, 0.5, 0.0, 0.0]),
        EquipmentType::Insulation => (38.0, 60.0, 2600.0, [49.0, 38.0, 30.0, 19.0, 11.0]),
        EquipmentType::Windows => (0.30, 0.20, 11500.0, [0.30, 0.35, 0.50, 0.80, 1.00]),
        EquipmentType::Washer => (1.84, 2.92, 950.0, [2.40, 2.06, 1.84, 1.20, 0.90]),
        EquipmentType::Dryer => (3.73, 9.50, 1300.0, [4.30, 3.93, 3.73, 3.10, 2.50]),
    }
}

/// Industry worst-case efficiency still found in the field, per type. For
/// windows this is the highest (worst) U-factor.
pub const fn worst_case(kind: EquipmentType) -> f64 {
    match kind {
        EquipmentType::CentralAc => 8.0,
        EquipmentType::HeatPump => 8.0,
        EquipmentType::Furnace => 60.0,
        EquipmentType::WaterHeaterTank => 0.45,
        EquipmentType::WaterHeaterTankless => 0.80,
        EquipmentType::WindowUnit => 7.0,
        EquipmentType::Thermostat => 0.0,
        EquipmentType::Insulation => 5.0,
        EquipmentType::Windows => 1.2,
        EquipmentType::Washer => 0.8,
        EquipmentType::Dryer => 2.0,
    }
}

/// Annual operating cost model. Baselines are dollars per year for a
/// reference home at the type's reference efficiency; square footage and
/// climate scale the load, efficiency scales it inversely (directly for
/// U-factor, where lower is better).
#[derive(Debug, Clone, Copy)]
pub struct CostModel {
    reference_sqft: f64,
}

impl CostModel {
    pub fn standard() -> Self {
        Self {
            reference_sqft: DEFAULT_HOME_SQFT,
        }
    }

    /// Estimated annual operating cost in dollars for one piece of equipment.
    /// Non-positive efficiency input falls back to the reference efficiency,
    /// so the result is always finite.
    pub fn annual_cost(
        &self,
        kind: EquipmentType,
        efficiency: f64,
        home_sqft: f64,
        climate: ClimateZone,
    ) -> f64 {
        let (baseline, reference) = baseline_row(kind);
        let sqft = if home_sqft > 0.0 {
            home_sqft
        } else {
            self.reference_sqft
        };
        let load = baseline * (sqft / self.reference_sqft) * climate_multiplier(climate);

        let efficiency_factor = if efficiency <= 0.0 {
            1.0
        } else if kind.lower_is_better() {
            efficiency / reference
        } else {
            reference / efficiency
        };

        load * efficiency_factor
    }

    /// Annual dollars saved by moving from `current` to `target` efficiency,
    /// clamped at zero for downgrades.
    pub fn annual_savings(
        &self,
        kind: EquipmentType,
        current: f64,
        target: f64,
        home_sqft: f64,
        climate: ClimateZone,
    ) -> f64 {
        let before = self.annual_cost(kind, current, home_sqft, climate);
        let after = self.annual_cost(kind, target, home_sqft, climate);
        (before - after).max(0.0)
    }
}

/// (baseline annual dollars at reference conditions, reference efficiency)
const fn baseline_row(kind: EquipmentType) -> (f64, f64) {
    match kind {
        EquipmentType::CentralAc => (640.0, 14.0),
        EquipmentType::HeatPump => (950.0, 15.0),
        EquipmentType::Furnace => (820.0, 80.0),
        EquipmentType::WaterHeaterTank => (520.0, 0.90),
        EquipmentType::WaterHeaterTankless => (470.0, 0.95),
        EquipmentType::WindowUnit => (190.0, 12.0),
        EquipmentType::Thermostat => (120.0, 1.0),
        EquipmentType::Insulation => (480.0, 30.0),
        EquipmentType::Windows => (540.0, 0.30),
        EquipmentType::Washer => (70.0, 1.84),
        EquipmentType::Dryer => (110.0, 3.73),
    }
}

const fn climate_multiplier(zone: ClimateZone) -> f64 {
    match zone {
        ClimateZone::Hot => 1.25,
        ClimateZone::Moderate => 1.0,
        ClimateZone::Cold => 1.35,
    }
}

/// Simple payback in years. Undefined (not an error, not infinity) when the
/// upgrade never pays for itself.
pub fn payback_years(upgrade_cost: f64, annual_savings: f64) -> Option<f64> {
    if annual_savings > 0.0 {
        Some(upgrade_cost / annual_savings)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_estimates_degrade_with_age() {
        let new = lookup(EquipmentType::CentralAc, AgeRange::Years0To5);
        let old = lookup(EquipmentType::CentralAc, AgeRange::Years20Plus);
        assert!(new.estimated > old.estimated);
        assert_eq!(new.best_in_class, old.best_in_class);
        assert!(new.best_in_class > new.current_code_minimum);
    }

    #[test]
    fn window_spec_degrades_upward() {
        // U-factor: a worse (older) window has a higher number
        let new = lookup(EquipmentType::Windows, AgeRange::Years0To5);
        let old = lookup(EquipmentType::Windows, AgeRange::Years20Plus);
        assert!(old.estimated > new.estimated);
        assert!(new.best_in_class < new.current_code_minimum);
    }

    #[test]
    fn cost_is_monotonic_decreasing_in_standard_efficiency() {
        let model = CostModel::standard();
        let low = model.annual_cost(EquipmentType::CentralAc, 10.0, 1500.0, ClimateZone::Moderate);
        let high = model.annual_cost(EquipmentType::CentralAc, 18.0, 1500.0, ClimateZone::Moderate);
        assert!(low > high);
    }

    #[test]
    fn cost_is_monotonic_increasing_in_u_factor() {
        let model = CostModel::standard();
        let tight = model.annual_cost(EquipmentType::Windows, 0.20, 1500.0, ClimateZone::Moderate);
        let leaky = model.annual_cost(EquipmentType::Windows, 1.0, 1500.0, ClimateZone::Moderate);
        assert!(leaky > tight);
    }

    #[test]
    fn zero_efficiency_falls_back_to_reference_cost() {
        let model = CostModel::standard();
        let fallback =
            model.annual_cost(EquipmentType::Furnace, 0.0, 1500.0, ClimateZone::Moderate);
        let reference =
            model.annual_cost(EquipmentType::Furnace, 80.0, 1500.0, ClimateZone::Moderate);
        assert!((fallback - reference).abs() < 1e-9);
        assert!(fallback.is_finite());
    }

    #[test]
    fn savings_clamp_at_zero_for_downgrades() {
        let model = CostModel::standard();
        let savings = model.annual_savings(
            EquipmentType::CentralAc,
            18.0,
            10.0,
            1500.0,
            ClimateZone::Moderate,
        );
        assert_eq!(savings, 0.0);
    }

    #[test]
    fn payback_is_undefined_without_savings() {
        assert_eq!(payback_years(3000.0, 0.0), None);
        assert_eq!(payback_years(3000.0, -5.0), None);
        let payback = payback_years(3000.0, 600.0).expect("positive savings");
        assert!((payback - 5.0).abs() < 1e-9);
    }

    #[test]
    fn climate_scales_load() {
        let model = CostModel::standard();
        let moderate =
            model.annual_cost(EquipmentType::HeatPump, 15.0, 1500.0, ClimateZone::Moderate);
        let cold = model.annual_cost(EquipmentType::HeatPump, 15.0, 1500.0, ClimateZone::Cold);
        assert!(cold > moderate);
    }
}
