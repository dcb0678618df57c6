use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed catalog of appliance kinds a homeowner can register. Each variant
/// carries the constants (typical wattage, daily runtime, standby draw) used by
/// the energy calculators when the user supplies nothing better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceCategory {
    // Entertainment
    Television,
    GamingConsole,
    Soundbar,
    StreamingDevice,
    // Computing
    Desktop,
    Laptop,
    Monitor,
    Router,
    // Kitchen
    Refrigerator,
    Freezer,
    Dishwasher,
    Microwave,
    Oven,
    CoffeeMaker,
    Toaster,
    // Lighting
    LedBulb,
    CflBulb,
    IncandescentBulb,
    Floodlight,
    LampFixture,
    // Other
    CeilingFan,
    PortableHeater,
    Dehumidifier,
    PoolPump,
    EvCharger,
    Other,
}

/// Display grouping used when a room inventory is summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceGroup {
    Entertainment,
    Computing,
    Kitchen,
    Lighting,
    Other,
}

impl ApplianceGroup {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entertainment => "Entertainment",
            Self::Computing => "Computing",
            Self::Kitchen => "Kitchen",
            Self::Lighting => "Lighting",
            Self::Other => "Other",
        }
    }
}

impl ApplianceCategory {
    pub const fn all() -> [Self; 26] {
        [
            Self::Television,
            Self::GamingConsole,
            Self::Soundbar,
            Self::StreamingDevice,
            Self::Desktop,
            Self::Laptop,
            Self::Monitor,
            Self::Router,
            Self::Refrigerator,
            Self::Freezer,
            Self::Dishwasher,
            Self::Microwave,
            Self::Oven,
            Self::CoffeeMaker,
            Self::Toaster,
            Self::LedBulb,
            Self::CflBulb,
            Self::IncandescentBulb,
            Self::Floodlight,
            Self::LampFixture,
            Self::CeilingFan,
            Self::PortableHeater,
            Self::Dehumidifier,
            Self::PoolPump,
            Self::EvCharger,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Television => "Television",
            Self::GamingConsole => "Gaming Console",
            Self::Soundbar => "Soundbar",
            Self::StreamingDevice => "Streaming Device",
            Self::Desktop => "Desktop Computer",
            Self::Laptop => "Laptop",
            Self::Monitor => "Monitor",
            Self::Router => "Router/Modem",
            Self::Refrigerator => "Refrigerator",
            Self::Freezer => "Freezer",
            Self::Dishwasher => "Dishwasher",
            Self::Microwave => "Microwave",
            Self::Oven => "Oven/Range",
            Self::CoffeeMaker => "Coffee Maker",
            Self::Toaster => "Toaster/Toaster Oven",
            Self::LedBulb => "LED Bulb",
            Self::CflBulb => "CFL Bulb",
            Self::IncandescentBulb => "Incandescent Bulb",
            Self::Floodlight => "Floodlight",
            Self::LampFixture => "Lamp/Fixture",
            Self::CeilingFan => "Ceiling Fan",
            Self::PortableHeater => "Portable Heater",
            Self::Dehumidifier => "Dehumidifier",
            Self::PoolPump => "Pool Pump",
            Self::EvCharger => "EV Charger",
            Self::Other => "Other",
        }
    }

    /// Typical nameplate draw in watts while the device is in use.
    pub const fn default_wattage(self) -> f64 {
        match self {
            Self::Television => 100.0,
            Self::GamingConsole => 150.0,
            Self::Soundbar => 30.0,
            Self::StreamingDevice => 5.0,
            Self::Desktop => 200.0,
            Self::Laptop => 50.0,
            Self::Monitor => 30.0,
            Self::Router => 12.0,
            Self::Refrigerator => 150.0,
            Self::Freezer => 100.0,
            Self::Dishwasher => 1800.0,
            Self::Microwave => 1100.0,
            Self::Oven => 2500.0,
            Self::CoffeeMaker => 900.0,
            Self::Toaster => 1200.0,
            Self::LedBulb => 9.0,
            Self::CflBulb => 13.0,
            Self::IncandescentBulb => 60.0,
            Self::Floodlight => 65.0,
            Self::LampFixture => 60.0,
            Self::CeilingFan => 75.0,
            Self::PortableHeater => 1500.0,
            Self::Dehumidifier => 300.0,
            Self::PoolPump => 1500.0,
            Self::EvCharger => 7200.0,
            Self::Other => 100.0,
        }
    }

    /// Typical runtime in hours per day.
    pub const fn default_hours_per_day(self) -> f64 {
        match self {
            Self::Television => 5.0,
            Self::GamingConsole => 2.0,
            Self::Soundbar => 4.0,
            Self::StreamingDevice => 5.0,
            Self::Desktop => 6.0,
            Self::Laptop => 6.0,
            Self::Monitor => 6.0,
            Self::Router => 24.0,
            Self::Refrigerator => 24.0,
            Self::Freezer => 24.0,
            Self::Dishwasher => 1.0,
            Self::Microwave => 0.3,
            Self::Oven => 1.0,
            Self::CoffeeMaker => 0.5,
            Self::Toaster => 0.2,
            Self::LedBulb => 5.0,
            Self::CflBulb => 5.0,
            Self::IncandescentBulb => 5.0,
            Self::Floodlight => 4.0,
            Self::LampFixture => 5.0,
            Self::CeilingFan => 8.0,
            Self::PortableHeater => 4.0,
            Self::Dehumidifier => 12.0,
            Self::PoolPump => 8.0,
            Self::EvCharger => 3.0,
            Self::Other => 2.0,
        }
    }

    /// Whether the category draws standby power while nominally off.
    pub const fn is_phantom_load_relevant(self) -> bool {
        matches!(
            self,
            Self::Television
                | Self::GamingConsole
                | Self::Soundbar
                | Self::StreamingDevice
                | Self::Desktop
                | Self::Laptop
                | Self::Monitor
                | Self::Router
                | Self::Microwave
                | Self::CoffeeMaker
                | Self::Toaster
        )
    }

    pub const fn phantom_watts(self) -> f64 {
        match self {
            Self::Television => 5.0,
            Self::GamingConsole => 10.0,
            Self::Soundbar => 3.0,
            Self::StreamingDevice => 2.0,
            Self::Desktop => 5.0,
            Self::Laptop => 2.0,
            Self::Monitor => 2.0,
            // always on, no standby state
            Self::Router => 0.0,
            Self::Microwave => 3.0,
            Self::CoffeeMaker => 2.0,
            Self::Toaster => 1.0,
            _ => 0.0,
        }
    }

    pub const fn group(self) -> ApplianceGroup {
        match self {
            Self::Television | Self::GamingConsole | Self::Soundbar | Self::StreamingDevice => {
                ApplianceGroup::Entertainment
            }
            Self::Desktop | Self::Laptop | Self::Monitor | Self::Router => {
                ApplianceGroup::Computing
            }
            Self::Refrigerator
            | Self::Freezer
            | Self::Dishwasher
            | Self::Microwave
            | Self::Oven
            | Self::CoffeeMaker
            | Self::Toaster => ApplianceGroup::Kitchen,
            Self::LedBulb
            | Self::CflBulb
            | Self::IncandescentBulb
            | Self::Floodlight
            | Self::LampFixture => ApplianceGroup::Lighting,
            Self::CeilingFan
            | Self::PortableHeater
            | Self::Dehumidifier
            | Self::PoolPump
            | Self::EvCharger
            | Self::Other => ApplianceGroup::Other,
        }
    }

    pub const fn is_lighting(self) -> bool {
        matches!(self.group(), ApplianceGroup::Lighting)
    }
}

/// How an appliance entered the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Manual,
    Camera,
    Ocr,
}

impl Default for DetectionMethod {
    fn default() -> Self {
        Self::Manual
    }
}

static APPLIANCE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_appliance_id() -> String {
    let id = APPLIANCE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("appliance-{id:06}")
}

/// A registered household device. Fields are fixed after creation; every
/// energy figure is derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appliance {
    pub id: String,
    pub category: ApplianceCategory,
    pub name: String,
    pub wattage: f64,
    pub hours_per_day: f64,
    pub quantity: u32,
    pub detection_method: DetectionMethod,
    pub created_at: Option<NaiveDate>,
}

impl Appliance {
    /// Create an appliance seeded with the category defaults.
    pub fn new(category: ApplianceCategory) -> Self {
        Self {
            id: next_appliance_id(),
            category,
            name: category.label().to_string(),
            wattage: category.default_wattage(),
            hours_per_day: category.default_hours_per_day(),
            quantity: 1,
            detection_method: DetectionMethod::Manual,
            created_at: None,
        }
    }

    /// Annual energy consumption in kWh, excluding standby draw.
    pub fn annual_kwh(&self) -> f64 {
        self.wattage * self.hours_per_day * 365.0 / 1000.0 * f64::from(self.quantity)
    }

    /// Annual standby energy in kWh. Zero for categories without a
    /// phantom-relevant standby state.
    pub fn phantom_annual_kwh(&self) -> f64 {
        if !self.category.is_phantom_load_relevant() {
            return 0.0;
        }
        let standby_hours = (24.0 - self.hours_per_day).max(0.0);
        self.category.phantom_watts() * standby_hours * 365.0 / 1000.0 * f64::from(self.quantity)
    }

    /// Annual kWh including phantom load.
    pub fn total_annual_kwh(&self) -> f64 {
        self.annual_kwh() + self.phantom_annual_kwh()
    }

    /// Annual cost at the given electricity rate in $/kWh.
    pub fn annual_cost(&self, rate: f64) -> f64 {
        self.annual_kwh() * rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refrigerator_matches_reference_figures() {
        let fridge = Appliance::new(ApplianceCategory::Refrigerator);
        assert_eq!(fridge.wattage, 150.0);
        assert_eq!(fridge.hours_per_day, 24.0);
        assert!((fridge.annual_kwh() - 1314.0).abs() < 1e-9);
        assert!((fridge.annual_cost(0.16) - 210.24).abs() < 1e-9);
    }

    #[test]
    fn phantom_load_only_applies_to_relevant_categories() {
        let fridge = Appliance::new(ApplianceCategory::Refrigerator);
        assert_eq!(fridge.phantom_annual_kwh(), 0.0);

        let mut tv = Appliance::new(ApplianceCategory::Television);
        tv.hours_per_day = 5.0;
        // 5 W standby for 19 h/day
        let expected = 5.0 * 19.0 * 365.0 / 1000.0;
        assert!((tv.phantom_annual_kwh() - expected).abs() < 1e-9);
        assert!(tv.total_annual_kwh() >= tv.annual_kwh());
    }

    #[test]
    fn standby_hours_never_go_negative() {
        let mut console = Appliance::new(ApplianceCategory::GamingConsole);
        console.hours_per_day = 24.0;
        assert_eq!(console.phantom_annual_kwh(), 0.0);
    }

    #[test]
    fn quantity_scales_consumption() {
        let mut bulbs = Appliance::new(ApplianceCategory::LedBulb);
        bulbs.quantity = 4;
        let single = 9.0 * 5.0 * 365.0 / 1000.0;
        assert!((bulbs.annual_kwh() - single * 4.0).abs() < 1e-9);
    }
}
