//! Store and export locations, checkpoint cadence.

use serde::{Deserialize, Serialize};

fn default_store_path() -> String {
    "datosfinales.xlsx".to_string()
}

fn default_sheet() -> String {
    "Sheet1".to_string()
}

fn default_data_dir() -> String {
    "src/data".to_string()
}

/// Rows processed between two checkpoint saves of the store.
const fn default_checkpoint_every() -> usize {
    25
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Spreadsheet holding the roster.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Worksheet name inside the store.
    #[serde(default = "default_sheet")]
    pub sheet: String,

    /// Directory the JSON projections are written to.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_checkpoint_every")]
    pub checkpoint_every: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            sheet: default_sheet(),
            data_dir: default_data_dir(),
            checkpoint_every: default_checkpoint_every(),
        }
    }
}
