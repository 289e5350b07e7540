//! # tablesheet
//!
//! Turn tables into spreadsheet-ready worksheets.
//!
//! A table arrives as a [`Grid`]: rows of optional [`SourceCell`]s plus a
//! list of merge regions. The [`Assembler`] runs every cell through an
//! ordered list of [`TypeHandlers`], propagates the border of each merge's
//! anchor cell to the merge perimeter, and derives the bounding range and
//! column widths. The resulting [`Worksheet`] can then be moved with
//! [`Worksheet::translate`], outlined with [`Worksheet::frame`], and
//! collected into a [`Workbook`] with the [`WorkbookExporter`].
//!
//! ## Features
//!
//! - A1 addressing in both directions, with strict parsing
//! - Pluggable cell typing (numbers, dates, booleans and text by default)
//! - Merge-aware border propagation
//! - Whole-sheet translation and perimeter framing
//! - Serialization into the worksheet layout spreadsheet encoders consume
//!
//! ## Example
//!
//! ```rust
//! use tablesheet::prelude::*;
//!
//! let grid = Grid::from_text([["Item", "Qty"], ["Pens", "12"]]);
//! let sheet = assemble(&grid, &TypeHandlers::default());
//!
//! assert_eq!(sheet.range().to_string(), "A1:B2");
//! assert_eq!(sheet.cell("B2").unwrap().unwrap().value, CellValue::Number(12.0));
//!
//! let framed = sheet.translate(Offset::new(1, 0)).unwrap().frame().unwrap();
//! assert!(framed.cell("A2").unwrap().unwrap().border(BorderSide::Top).is_some());
//! ```

pub mod assemble;
pub mod export;
pub mod grid;
pub mod handlers;
pub mod prelude;

pub use assemble::{assemble, Assembler, Assembly};
pub use export::{ExportOptions, ExportReport, SheetDraft, SheetIssue, TableSource, WorkbookExporter};
pub use grid::{Grid, SourceCell};
pub use handlers::{
    BooleanHandler, DateHandler, HandlerMatch, NumberHandler, TextHandler, TypeHandler,
    TypeHandlers,
};

// Re-export core types
pub use tablesheet_core::{
    BorderEdge,
    BorderLineStyle,
    BorderSide,
    BorderStyle,
    CellAddress,
    CellRange,
    CellType,
    CellValue,
    Color,
    // Error types
    Error,
    Offset,
    Result,
    SheetCell,
    Style,
    Workbook,
    Worksheet,

    // Constants
    MAX_COLS,
    MAX_SHEET_NAME_LEN,
};
