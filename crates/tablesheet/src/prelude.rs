//! Prelude module - common imports for tablesheet users
//!
//! ```rust
//! use tablesheet::prelude::*;
//! ```

pub use crate::{
    // Assembly
    assemble,
    Assembler,
    // Style types
    BorderEdge,
    BorderLineStyle,
    BorderSide,
    BorderStyle,
    CellAddress,
    CellRange,
    // Cell types
    CellType,
    CellValue,
    Color,

    // Error types
    Error,
    // Export
    ExportOptions,
    ExportReport,
    // Source tables
    Grid,
    HandlerMatch,
    Offset,
    Result,
    SheetCell,
    SheetDraft,
    SourceCell,
    Style,
    TableSource,
    // Type handlers
    TypeHandler,
    TypeHandlers,

    // Main types
    Workbook,
    WorkbookExporter,
    Worksheet,
};
