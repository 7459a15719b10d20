use std::convert::Infallible;

use roster_core::RosterTable;

/// Durable storage for the whole table.
pub trait Checkpoint {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Write the entire table, replacing what was stored before.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the table could not be made durable.
    fn persist(&mut self, table: &RosterTable) -> Result<(), Self::Error>;
}

/// A sink that only counts persists. Used for dry runs and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingCheckpoint {
    pub persists: usize,
}

impl Checkpoint for CountingCheckpoint {
    type Error = Infallible;

    fn persist(&mut self, _table: &RosterTable) -> Result<(), Self::Error> {
        self.persists += 1;
        Ok(())
    }
}
