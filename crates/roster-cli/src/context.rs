use std::path::{Path, PathBuf};

use anyhow::Context;
use roster_config::RosterConfig;
use roster_core::RosterTable;
use roster_scan::Checkpoint;
use roster_store::StoreError;

/// Everything a command needs besides its own arguments.
pub struct AppContext {
    pub config: RosterConfig,
    pub store: StoreLocation,
}

impl AppContext {
    pub fn new(config: RosterConfig, flags: &crate::cli::GlobalFlags) -> Self {
        let path = flags
            .store
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.general.store_path));
        let store = StoreLocation {
            path,
            sheet: config.general.sheet.clone(),
        };
        Self { config, store }
    }
}

/// Workbook path and worksheet name of the roster store.
#[derive(Debug, Clone)]
pub struct StoreLocation {
    pub path: PathBuf,
    pub sheet: String,
}

impl StoreLocation {
    pub fn load(&self) -> anyhow::Result<RosterTable> {
        roster_store::load(&self.path, &self.sheet)
            .with_context(|| format!("failed to load store {}", self.path.display()))
    }

    pub fn save(&self, table: &RosterTable) -> anyhow::Result<()> {
        roster_store::save(&self.path, &self.sheet, table)
            .with_context(|| format!("failed to save store {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Scanner checkpoints written straight to the store workbook.
pub struct StoreCheckpoint<'a> {
    store: &'a StoreLocation,
}

impl<'a> StoreCheckpoint<'a> {
    pub const fn new(store: &'a StoreLocation) -> Self {
        Self { store }
    }
}

impl Checkpoint for StoreCheckpoint<'_> {
    type Error = StoreError;

    fn persist(&mut self, table: &RosterTable) -> Result<(), Self::Error> {
        roster_store::save(&self.store.path, &self.store.sheet, table)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use roster_core::{Column, RosterRow};

    use super::*;
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(store: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Text,
            quiet: true,
            verbose: false,
            store: store.map(PathBuf::from),
        }
    }

    #[test]
    fn store_flag_overrides_config() {
        let config = RosterConfig::default();
        let ctx = AppContext::new(config.clone(), &flags(None));
        assert_eq!(ctx.store.path(), Path::new("datosfinales.xlsx"));
        assert_eq!(ctx.store.sheet, "Sheet1");

        let ctx = AppContext::new(config, &flags(Some("/data/roster.xlsx")));
        assert_eq!(ctx.store.path(), Path::new("/data/roster.xlsx"));
    }

    #[test]
    fn store_checkpoint_round_trips_through_the_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let store = StoreLocation {
            path: dir.path().join("roster.xlsx"),
            sheet: "Sheet1".to_string(),
        };
        let mut row = RosterRow::default();
        row.set_text(Column::Category, "Senado");
        row.set_text(Column::Name, "Luis");
        row.set_text(Column::MastodonActivity, "404");
        let table = RosterTable::new(vec![row]);

        StoreCheckpoint::new(&store).persist(&table).unwrap();

        assert_eq!(store.load().unwrap(), table);
    }
}
