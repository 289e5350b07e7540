//! # tablesheet-core
//!
//! Core data structures for turning tables into spreadsheet worksheets.
//!
//! This crate provides the types shared by the rest of tablesheet:
//! - [`CellAddress`] and [`CellRange`] - A1 addressing, in both directions
//! - [`SheetCell`] and [`CellValue`] - Typed cell values with optional styles
//! - [`Style`], [`BorderStyle`] - Cell borders
//! - [`Worksheet`], [`Workbook`] - The structures handed to an encoder
//! - [`Offset`] with [`Worksheet::translate`] and [`Worksheet::frame`] -
//!   geometry operations on finished worksheets
//!
//! ## Example
//!
//! ```rust
//! use tablesheet_core::{CellAddress, CellRange, Offset, SheetCell, Worksheet};
//!
//! let mut sheet = Worksheet::new();
//! sheet.insert_cell(CellAddress::parse("A1").unwrap(), SheetCell::new("Total"));
//! sheet.insert_cell(CellAddress::new(0, 1), SheetCell::new(42.0));
//! sheet.set_range(CellRange::parse("A1:B1").unwrap());
//! sheet.set_column_widths(vec![Some(80.0), None]);
//!
//! let moved = sheet.translate(Offset::new(1, 1)).unwrap();
//! assert_eq!(moved.range().to_string(), "A1:C2");
//! assert!(moved.cell("B2").unwrap().is_some());
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod transform;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellRange, CellType, CellValue, SheetCell};
pub use error::{Error, Result};
pub use style::{BorderEdge, BorderLineStyle, BorderSide, BorderStyle, Color, Style};
pub use transform::Offset;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Maximum number of columns a worksheet can hold widths for (A to XFD)
pub const MAX_COLS: u32 = 16_384;
