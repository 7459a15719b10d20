//! # roster-export
//!
//! Republishes the roster as JSON for the web front end: one file per
//! category, each with its own field layout, plus `total.json` where every
//! platform's activity is reduced to "posted in the last 30 days".
//!
//! Output is deterministic for identical input and each file is replaced
//! atomically.

mod error;
mod projector;
mod records;
mod writer;

pub use error::ExportError;
pub use projector::{Projection, project};
pub use records::{
    AgeRecord, AutonomiaRecord, CategoryRecord, CongresoRecord, GobiernoRecord, NATIONAL_SCOPE,
    PartidoRecord, SenadoRecord, SocialCore, TotalRecord, UniversidadRecord,
};
pub use writer::{ExportReport, FileReport, TOTAL_FILE, export, write_json};
