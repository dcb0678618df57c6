pub mod catalog;
pub mod domain;
pub mod grading;
pub mod report;
pub mod scan;
pub mod upgrades;
