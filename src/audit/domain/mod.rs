mod appliance;
mod bill;
mod equipment;
mod home;

pub use appliance::{Appliance, ApplianceCategory, ApplianceGroup, DetectionMethod};
pub use bill::EnergyBill;
pub use equipment::{AgeRange, Equipment, EquipmentType};
pub use home::{
    ClimateZone, EnvelopeAssessment, EnvelopeRating, Home, HomeValidationError, Room,
    YearBuiltRange,
};
