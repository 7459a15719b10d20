//! # roster-store
//!
//! Spreadsheet adapter for the roster. Everything above this crate works on
//! [`roster_core::RosterTable`]; only this crate knows about workbooks, cell
//! coordinates and styling.
//!
//! - [`load`] reads a worksheet with calamine and validates the header once.
//! - [`save`] reads the current workbook back, writes the table into the
//!   roster sheet with rust_xlsxwriter while carrying every other sheet and
//!   every untouched cell over, and replaces the file atomically.

mod error;
mod read;
mod snapshot;
mod write;

pub use error::StoreError;
pub use read::{from_range, load};
pub use write::save;
