//! Whole-home audit report: grade, ranked upgrade list, cost totals, and
//! home-level recommendations, assembled from the other audit engines.

use crate::audit::catalog::{self, CostModel, DEFAULT_HOME_SQFT};
use crate::audit::domain::Home;
use crate::audit::grading::{self, EfficiencyGrade};
use crate::audit::upgrades::{self, Recommendation};
use crate::config::RatePlan;
use serde::Serialize;

/// Upgrades saving less than this per year are left out of the report.
const MIN_REPORTABLE_SAVINGS: f64 = 10.0;

/// One line of the report's ranked upgrade list: replace this unit with the
/// best-in-class model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeItem {
    pub equipment_id: String,
    pub equipment_label: &'static str,
    pub target_efficiency: f64,
    pub annual_savings: f64,
    pub upgrade_cost: f64,
    pub payback_years: Option<f64>,
}

/// The assembled audit report for one home.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeReport {
    pub home_id: String,
    pub home_name: String,
    pub grade: EfficiencyGrade,
    pub efficiency_ratio: f64,
    pub total_current_cost: f64,
    pub total_upgraded_cost: f64,
    pub total_annual_savings: f64,
    pub upgrades: Vec<UpgradeItem>,
    pub recommendations: Vec<Recommendation>,
}

impl HomeReport {
    /// Build the report from a home snapshot. Pure aside from the rate plan;
    /// the same home and rates always produce the same report.
    pub fn build(home: &Home, rates: &RatePlan) -> Self {
        let model = CostModel::standard();
        let sqft = match home.computed_total_sqft() {
            area if area > 0.0 => area,
            _ => DEFAULT_HOME_SQFT,
        };
        let climate = home.climate_zone;

        let mut total_current_cost = 0.0;
        let mut total_upgraded_cost = 0.0;
        let mut upgrades = Vec::new();

        for item in &home.equipment {
            let spec = catalog::lookup(item.kind, item.age_range);
            let current = if item.estimated_efficiency > 0.0 {
                item.estimated_efficiency
            } else {
                spec.estimated
            };
            let best = if item.best_in_class > 0.0 {
                item.best_in_class
            } else {
                spec.best_in_class
            };

            total_current_cost += model.annual_cost(item.kind, current, sqft, climate);
            total_upgraded_cost += model.annual_cost(item.kind, best, sqft, climate);

            let annual_savings = model.annual_savings(item.kind, current, best, sqft, climate);
            if annual_savings > MIN_REPORTABLE_SAVINGS {
                upgrades.push(UpgradeItem {
                    equipment_id: item.id.clone(),
                    equipment_label: item.kind.label(),
                    target_efficiency: best,
                    annual_savings,
                    upgrade_cost: spec.upgrade_cost,
                    payback_years: catalog::payback_years(spec.upgrade_cost, annual_savings),
                });
            }
        }

        // Shortest payback first; upgrades that never pay back sort last.
        upgrades.sort_by(|a, b| {
            let left = a.payback_years.unwrap_or(f64::INFINITY);
            let right = b.payback_years.unwrap_or(f64::INFINITY);
            left.total_cmp(&right)
        });

        Self {
            home_id: home.id.clone(),
            home_name: home.name.clone(),
            grade: grading::grade(&home.equipment),
            efficiency_ratio: grading::weighted_efficiency_ratio(&home.equipment),
            total_current_cost,
            total_upgraded_cost,
            total_annual_savings: (total_current_cost - total_upgraded_cost).max(0.0),
            upgrades,
            recommendations: upgrades::for_home(home, rates),
        }
    }

    /// Flat-text rendering for terminal output.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Energy Audit Report: {}\n", self.home_name));
        out.push_str(&format!(
            "Grade: {} ({:.0}% of best-in-class)\n",
            self.grade.letter(),
            self.efficiency_ratio * 100.0
        ));
        out.push_str(&format!("{}\n\n", self.grade.summary()));

        out.push_str(&format!(
            "Estimated annual equipment cost: ${:.0}\n",
            self.total_current_cost
        ));
        out.push_str(&format!(
            "After all upgrades:              ${:.0}\n",
            self.total_upgraded_cost
        ));
        out.push_str(&format!(
            "Potential annual savings:        ${:.0}\n",
            self.total_annual_savings
        ));

        if !self.upgrades.is_empty() {
            out.push_str("\nUpgrades by payback:\n");
            for upgrade in &self.upgrades {
                let payback = match upgrade.payback_years {
                    Some(years) => format!("{years:.1} yr payback"),
                    None => "no payback".to_string(),
                };
                out.push_str(&format!(
                    "  {} -> {:.2}: saves ${:.0}/yr, costs ${:.0} ({payback})\n",
                    upgrade.equipment_label,
                    upgrade.target_efficiency,
                    upgrade.annual_savings,
                    upgrade.upgrade_cost,
                ));
            }
        }

        if !self.recommendations.is_empty() {
            out.push_str("\nRecommendations:\n");
            for recommendation in &self.recommendations {
                out.push_str(&format!(
                    "  [{}] {}",
                    recommendation.kind.label(),
                    recommendation.title
                ));
                if let Some(savings) = &recommendation.estimated_savings {
                    out.push_str(&format!(" ({savings})"));
                }
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::domain::{AgeRange, Equipment, EquipmentType};

    fn home_with_old_hvac() -> Home {
        let mut home = Home::new("Report Home");
        home.total_sqft = Some(1500.0);
        let mut ac = Equipment::new(EquipmentType::CentralAc, AgeRange::Years15To20);
        ac.estimated_efficiency = 10.0;
        home.equipment.push(ac);
        let mut furnace = Equipment::new(EquipmentType::Furnace, AgeRange::Years20Plus);
        furnace.estimated_efficiency = 68.0;
        home.equipment.push(furnace);
        home
    }

    #[test]
    fn empty_home_reports_neutral_grade_and_no_upgrades() {
        let report = HomeReport::build(&Home::new("Empty"), &RatePlan::default());
        assert_eq!(report.grade, EfficiencyGrade::C);
        assert!(report.upgrades.is_empty());
        assert_eq!(report.total_annual_savings, 0.0);
        // the setback tip still shows up
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn upgrades_sort_by_payback_ascending() {
        let report = HomeReport::build(&home_with_old_hvac(), &RatePlan::default());
        assert_eq!(report.upgrades.len(), 2);
        let paybacks: Vec<f64> = report
            .upgrades
            .iter()
            .map(|u| u.payback_years.expect("both upgrades save money"))
            .collect();
        assert!(paybacks[0] <= paybacks[1]);
    }

    #[test]
    fn totals_are_consistent() {
        let report = HomeReport::build(&home_with_old_hvac(), &RatePlan::default());
        assert!(report.total_current_cost > report.total_upgraded_cost);
        let expected = report.total_current_cost - report.total_upgraded_cost;
        assert!((report.total_annual_savings - expected).abs() < 1e-9);
    }

    #[test]
    fn near_best_equipment_is_filtered_from_the_list() {
        let mut home = Home::new("Efficient Home");
        home.total_sqft = Some(1500.0);
        let mut ac = Equipment::new(EquipmentType::CentralAc, AgeRange::Years0To5);
        ac.estimated_efficiency = 22.0;
        home.equipment.push(ac);
        let report = HomeReport::build(&home, &RatePlan::default());
        assert!(report.upgrades.is_empty());
    }

    #[test]
    fn build_is_deterministic() {
        let home = home_with_old_hvac();
        let rates = RatePlan::default();
        let first = HomeReport::build(&home, &rates);
        let second = HomeReport::build(&home, &rates);
        assert_eq!(first, second);
    }

    #[test]
    fn render_mentions_grade_and_savings() {
        let report = HomeReport::build(&home_with_old_hvac(), &RatePlan::default());
        let text = report.render();
        assert!(text.contains("Grade: F") || text.contains("Grade: D"));
        assert!(text.contains("Potential annual savings"));
        assert!(text.contains("Upgrades by payback:"));
    }
}
