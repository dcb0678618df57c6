use chrono::NaiveDate;
use manor_audit::audit::catalog;
use manor_audit::audit::domain::{AgeRange, Appliance, ApplianceCategory, EnergyBill, Equipment, EquipmentType};
use manor_audit::audit::scan::{bill, bulb, classify, label};

fn scan_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid anchor date")
}

#[test]
fn label_scan_feeds_an_equipment_entry() {
    let text = "TRANE\nModel 4TTR6036J1000A\nSEER2 15.2\n36,000 BTU\n";
    let scan = label::parse(text);

    assert_eq!(scan.manufacturer.as_deref(), Some("Trane"));
    assert_eq!(scan.efficiency_unit, Some("SEER"));
    assert_eq!(scan.efficiency_value, Some(15.2));
    assert_eq!(scan.btu_capacity, Some(36000));

    let spec = catalog::lookup(EquipmentType::CentralAc, AgeRange::Years0To5);
    let mut equipment = Equipment::from_spec(EquipmentType::CentralAc, AgeRange::Years0To5, &spec);
    equipment.manufacturer = scan.manufacturer;
    equipment.model_number = scan.model_number;
    if let Some(value) = scan.efficiency_value {
        equipment.estimated_efficiency = value;
    }

    assert_eq!(equipment.estimated_efficiency, 15.2);
    assert_eq!(equipment.best_in_class, 22.0);
    assert_eq!(equipment.model_number.as_deref(), Some("TTR6036J1000A"));
}

#[test]
fn bill_scan_feeds_an_energy_bill() {
    let text = "Pacific Gas and Electric\n\
                Service period: Jun 12, 2026 - Jul 12, 2026\n\
                Electric usage 1,050 kWh\n\
                Amount Due: $178.50\n";
    let scan = bill::parse(text, scan_day());

    let mut record = EnergyBill::new(
        scan.total_kwh.unwrap_or(0.0),
        scan.total_cost.unwrap_or(0.0),
    );
    record.billing_period_start = scan.billing_period_start;
    record.billing_period_end = scan.billing_period_end;
    record.rate_per_kwh = scan.rate_per_kwh;
    record.utility_name = scan.utility_name;

    assert_eq!(
        record.utility_name.as_deref(),
        Some("Pacific Gas and Electric")
    );
    assert_eq!(record.billing_days(), Some(30));
    assert_eq!(record.total_kwh, 1050.0);
    let annual = record.annualized_kwh().expect("dated bill annualizes");
    assert!((annual - 1050.0 / 30.0 * 365.0).abs() < 1e-9);
    let rate = record.computed_rate(0.16);
    assert!((rate - 178.50 / 1050.0).abs() < 1e-9);
}

#[test]
fn bulb_scan_feeds_an_appliance_entry() {
    let scan = bulb::parse("GE LED Soft White 9W 800 lumens 2700K");
    let category = scan.bulb_type.expect("bulb type detected");
    assert_eq!(category, ApplianceCategory::LedBulb);

    let mut appliance = Appliance::new(category);
    if let Some(watts) = scan.wattage {
        appliance.wattage = watts;
    }
    let expected = 9.0 * 5.0 * 365.0 / 1000.0;
    assert!((appliance.annual_kwh() - expected).abs() < 1e-9);
}

#[test]
fn classifier_output_feeds_the_inventory() {
    let observations = vec![
        classify::Observation {
            identifier: "flat screen television".to_string(),
            confidence: 0.88,
        },
        classify::Observation {
            identifier: "loudspeaker".to_string(),
            confidence: 0.31,
        },
        classify::Observation {
            identifier: "coffee mug".to_string(),
            confidence: 0.25,
        },
    ];

    let matches = classify::map_observations(&observations, classify::DEFAULT_TOP_K);
    assert_eq!(matches.len(), 2);

    let appliances: Vec<Appliance> = matches
        .iter()
        .map(|found| Appliance::new(found.category))
        .collect();
    assert_eq!(appliances[0].category, ApplianceCategory::Television);
    assert_eq!(appliances[1].category, ApplianceCategory::Soundbar);
    assert!(appliances[0].annual_kwh() > 0.0);
}

#[test]
fn garbled_scans_never_panic_and_stay_empty() {
    let noise = "@@## 0x00 ~~~ lorem ipsum !!";
    let label_scan = label::parse(noise);
    assert_eq!(label_scan.efficiency_value, None);

    let bill_scan = bill::parse(noise, scan_day());
    assert_eq!(bill_scan.total_kwh, None);
    assert_eq!(bill_scan.total_cost, None);

    let bulb_scan = bulb::parse(noise);
    assert_eq!(bulb_scan.wattage, None);
    assert_eq!(bulb_scan.bulb_type, None);
}
