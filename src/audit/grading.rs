//! Weighted efficiency grading across a home's audited equipment.

use crate::audit::catalog;
use crate::audit::domain::Equipment;
use serde::{Deserialize, Serialize};

/// Letter grade assigned to a home's equipment efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyGrade {
    A,
    B,
    C,
    D,
    F,
}

impl EfficiencyGrade {
    pub const fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::A => "green",
            Self::B => "blue",
            Self::C => "yellow",
            Self::D => "orange",
            Self::F => "red",
        }
    }

    pub const fn summary(self) -> &'static str {
        match self {
            Self::A => "Excellent efficiency. Your home is near best-in-class.",
            Self::B => "Good efficiency with some room for improvement.",
            Self::C => "Average efficiency. Several upgrades would help.",
            Self::D => "Below average. Significant upgrades recommended.",
            Self::F => "Poor efficiency. Major upgrades needed for savings.",
        }
    }
}

/// Grade a home's equipment list. An unassessed home grades C so the report
/// neither flatters nor alarms before any data exists.
pub fn grade(equipment: &[Equipment]) -> EfficiencyGrade {
    if equipment.is_empty() {
        return EfficiencyGrade::C;
    }
    grade_from_ratio(weighted_efficiency_ratio(equipment))
}

/// Normalized efficiency ratio in [0, 1] across the equipment list, weighted
/// by each type's share of whole-home energy use. Also used standalone for
/// single-equipment detail views. Empty or zero-weight input resolves to the
/// neutral 0.5 rather than dividing by zero.
pub fn weighted_efficiency_ratio(equipment: &[Equipment]) -> f64 {
    if equipment.is_empty() {
        return 0.5;
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for item in equipment {
        let spec = catalog::lookup(item.kind, item.age_range);
        let worst = catalog::worst_case(item.kind);
        let best = spec.best_in_class;
        let current = if item.estimated_efficiency > 0.0 {
            item.estimated_efficiency
        } else {
            spec.estimated
        };

        let ratio = if item.kind.lower_is_better() {
            // U-factor: lower is better, invert the ratio
            let range = worst - best;
            if range > 0.0 {
                (worst - current) / range
            } else {
                0.5
            }
        } else {
            let range = best - worst;
            if range > 0.0 {
                (current - worst) / range
            } else {
                0.5
            }
        };

        let weight = item.kind.energy_share_weight();
        weighted_sum += ratio.clamp(0.0, 1.0) * weight;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.5
    }
}

/// Map a ratio onto the grade bands. Lower bounds are inclusive, upper
/// bounds exclusive; only a ratio of at least 0.85 earns an A.
pub fn grade_from_ratio(ratio: f64) -> EfficiencyGrade {
    if ratio >= 0.85 {
        EfficiencyGrade::A
    } else if ratio >= 0.70 {
        EfficiencyGrade::B
    } else if ratio >= 0.55 {
        EfficiencyGrade::C
    } else if ratio >= 0.40 {
        EfficiencyGrade::D
    } else {
        EfficiencyGrade::F
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::domain::{AgeRange, EquipmentType};

    fn equipment_with(kind: EquipmentType, efficiency: f64) -> Equipment {
        let mut item = Equipment::new(kind, AgeRange::Years5To10);
        item.estimated_efficiency = efficiency;
        item
    }

    #[test]
    fn empty_list_grades_neutral_c() {
        assert_eq!(grade(&[]), EfficiencyGrade::C);
        assert!((weighted_efficiency_ratio(&[]) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn old_central_ac_grades_f() {
        // SEER 10 against worst 8 / best 22 normalizes to 2/14 ~ 0.14
        let item = equipment_with(EquipmentType::CentralAc, 10.0);
        let ratio = weighted_efficiency_ratio(std::slice::from_ref(&item));
        assert!((ratio - 2.0 / 14.0).abs() < 1e-9);
        assert_eq!(grade(&[item]), EfficiencyGrade::F);
    }

    #[test]
    fn ratio_clamps_at_both_extremes() {
        let below_worst = equipment_with(EquipmentType::CentralAc, 1.0);
        let ratio = weighted_efficiency_ratio(&[below_worst]);
        assert!((0.0..=1.0).contains(&ratio));
        assert_eq!(ratio, 0.0);

        let above_best = equipment_with(EquipmentType::CentralAc, 40.0);
        let ratio = weighted_efficiency_ratio(&[above_best]);
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn u_factor_ratio_is_inverted() {
        // best possible window (U 0.20) should land at the top of the band
        let tight = equipment_with(EquipmentType::Windows, 0.20);
        assert_eq!(weighted_efficiency_ratio(&[tight]), 1.0);

        let leaky = equipment_with(EquipmentType::Windows, 1.2);
        assert_eq!(weighted_efficiency_ratio(&[leaky]), 0.0);
    }

    #[test]
    fn missing_efficiency_uses_age_band_estimate() {
        let unknown = equipment_with(EquipmentType::Furnace, 0.0);
        // 5-10yr furnace estimate is 92 AFUE against worst 60 / best 98.5
        let expected = (92.0 - 60.0) / (98.5 - 60.0);
        let ratio = weighted_efficiency_ratio(&[unknown]);
        assert!((ratio - expected).abs() < 1e-9);
    }

    #[test]
    fn grade_bands_partition_the_unit_interval() {
        assert_eq!(grade_from_ratio(1.0), EfficiencyGrade::A);
        assert_eq!(grade_from_ratio(0.85), EfficiencyGrade::A);
        assert_eq!(grade_from_ratio(0.8499), EfficiencyGrade::B);
        assert_eq!(grade_from_ratio(0.70), EfficiencyGrade::B);
        assert_eq!(grade_from_ratio(0.6999), EfficiencyGrade::C);
        assert_eq!(grade_from_ratio(0.55), EfficiencyGrade::C);
        assert_eq!(grade_from_ratio(0.5499), EfficiencyGrade::D);
        assert_eq!(grade_from_ratio(0.40), EfficiencyGrade::D);
        assert_eq!(grade_from_ratio(0.3999), EfficiencyGrade::F);
        assert_eq!(grade_from_ratio(0.0), EfficiencyGrade::F);
    }

    #[test]
    fn weighting_favors_the_heavier_share() {
        // HVAC carries 0.45 weight against the washer's 0.12, so a strong
        // heat pump pulls the average up more than a weak washer drags it
        let strong_hvac = equipment_with(EquipmentType::HeatPump, 24.0);
        let weak_washer = equipment_with(EquipmentType::Washer, 0.8);
        let ratio = weighted_efficiency_ratio(&[strong_hvac, weak_washer]);
        assert!(ratio > 0.5);
    }
}
