//! Best-effort parsers over raw OCR text. Each parser is total: a field that
//! cannot be recovered is simply left unset, and malformed numbers are
//! treated the same as missing ones.

pub mod bill;
pub mod bulb;
pub mod classify;
pub mod label;

pub use bill::BillScan;
pub use bulb::BulbScan;
pub use classify::{ClassificationMatch, Observation};
pub use label::LabelScan;
