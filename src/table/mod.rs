//! Generic sortable/filterable/resizable table state.
//!
//! `TableController` owns the interaction state (sort order, filter
//! text, column widths); rendering stays in `ui`. Rows are anything
//! implementing `TableRow` for the declared column keys.

pub mod controller;
pub mod measure;

pub use controller::{CellValue, Column, TableController, TableRow};
