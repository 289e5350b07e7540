//! Workbook export: many tables into one workbook
//!
//! Each table goes through the same pipeline: assemble, optionally
//! translate, optionally frame, then the `before_sheet_added` hook. A
//! failure anywhere in that pipeline drops only the affected sheet.
//!
//! # Example
//!
//! ```rust
//! use tablesheet::{ExportOptions, Grid, Offset, TableSource, WorkbookExporter};
//!
//! let exporter = WorkbookExporter::new().with_options(ExportOptions {
//!     offset: Some(Offset::new(1, 1)),
//!     frame: true,
//! });
//!
//! let report = exporter.export(vec![
//!     TableSource::named("Totals", Grid::from_text([["a", "1"], ["b", "2"]])),
//!     TableSource::new(Grid::from_text([["x"]])),
//! ]);
//!
//! assert!(report.is_complete());
//! assert_eq!(report.workbook.sheet_names(), &["Totals".to_string(), "2".to_string()]);
//! ```

use std::fmt;

use serde::Deserialize;
use tablesheet_core::{Error, Offset, Result, Workbook, Worksheet};

use crate::assemble::Assembler;
use crate::grid::Grid;
use crate::handlers::TypeHandlers;

/// Transforms applied to every exported sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    /// Shift every sheet by this offset after assembly
    pub offset: Option<Offset>,
    /// Outline the occupied cells of every sheet
    pub frame: bool,
}

/// A table to export, with an optional sheet name
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TableSource {
    /// Preferred sheet name; the 1-based position is used when absent
    #[serde(default)]
    pub name: Option<String>,
    /// Table content
    #[serde(flatten)]
    pub grid: Grid,
}

impl TableSource {
    /// An unnamed table
    pub fn new(grid: Grid) -> Self {
        Self { name: None, grid }
    }

    /// A named table
    pub fn named<S: Into<String>>(name: S, grid: Grid) -> Self {
        Self {
            name: Some(name.into()),
            grid,
        }
    }
}

/// A finished sheet about to be added to the workbook
#[derive(Debug, Clone, PartialEq)]
pub struct SheetDraft {
    /// The worksheet
    pub worksheet: Worksheet,
    /// The name it will be added under
    pub name: String,
}

/// Something that went wrong with one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetIssue {
    /// Zero-based position of the source table
    pub index: usize,
    /// Sheet name at the time of the issue
    pub name: String,
    /// What happened
    pub error: Error,
}

impl fmt::Display for SheetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sheet {} ('{}'): {}", self.index + 1, self.name, self.error)
    }
}

/// Outcome of [`WorkbookExporter::export`]
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Every sheet that made it through
    pub workbook: Workbook,
    /// Sheets that were dropped
    pub failures: Vec<SheetIssue>,
    /// Assembly anomalies on sheets that were kept
    pub warnings: Vec<SheetIssue>,
}

impl ExportReport {
    /// Check whether every table became a sheet
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

type SheetHook = Box<dyn Fn(SheetDraft, &TableSource) -> Result<SheetDraft> + Send + Sync>;

/// Builds a workbook from a list of tables
pub struct WorkbookExporter {
    assembler: Assembler,
    options: ExportOptions,
    before_sheet_added: Option<SheetHook>,
}

impl WorkbookExporter {
    /// Create an exporter with the default handlers and options
    pub fn new() -> Self {
        Self {
            assembler: Assembler::default(),
            options: ExportOptions::default(),
            before_sheet_added: None,
        }
    }

    /// Use a different handler list
    pub fn with_handlers(mut self, handlers: TypeHandlers) -> Self {
        self.assembler = Assembler::new(handlers);
        self
    }

    /// Use different export options
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Install a hook that sees every sheet right before it is added
    ///
    /// The hook may replace the worksheet, rename the sheet, or fail, in
    /// which case only that sheet is dropped.
    pub fn before_sheet_added<F>(mut self, hook: F) -> Self
    where
        F: Fn(SheetDraft, &TableSource) -> Result<SheetDraft> + Send + Sync + 'static,
    {
        self.before_sheet_added = Some(Box::new(hook));
        self
    }

    /// The options applied to every sheet
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export the tables in order
    pub fn export<I>(&self, tables: I) -> ExportReport
    where
        I: IntoIterator<Item = TableSource>,
    {
        let mut report = ExportReport::default();

        for (index, table) in tables.into_iter().enumerate() {
            let proposed = table
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| (index + 1).to_string());

            let assembly = self.assembler.assemble_with_report(&table.grid);
            report.warnings.extend(assembly.anomalies.into_iter().map(|error| SheetIssue {
                index,
                name: proposed.clone(),
                error,
            }));

            let added = self
                .finish_sheet(assembly.worksheet, proposed.clone(), &table)
                .and_then(|draft| {
                    report
                        .workbook
                        .add_worksheet(draft.name.clone(), draft.worksheet)
                        .map_err(|error| (draft.name, error))
                });

            if let Err((name, error)) = added {
                log::warn!("dropping sheet {} ('{}'): {}", index + 1, name, error);
                report.failures.push(SheetIssue { index, name, error });
            }
        }

        log::debug!(
            "exported {} sheets, {} dropped",
            report.workbook.sheet_count(),
            report.failures.len()
        );

        report
    }

    /// Apply the configured transforms and the hook to one sheet
    fn finish_sheet(
        &self,
        worksheet: Worksheet,
        name: String,
        table: &TableSource,
    ) -> std::result::Result<SheetDraft, (String, Error)> {
        let fail = |error: Error| (name.clone(), error);

        let worksheet = match self.options.offset {
            Some(offset) if !offset.is_zero() => worksheet.translate(offset).map_err(fail)?,
            _ => worksheet,
        };
        let worksheet = if self.options.frame && !worksheet.is_empty() {
            worksheet.frame().map_err(fail)?
        } else {
            worksheet
        };

        let draft = SheetDraft {
            worksheet,
            name: name.clone(),
        };
        match &self.before_sheet_added {
            Some(hook) => hook(draft, table).map_err(fail),
            None => Ok(draft),
        }
    }
}

impl Default for WorkbookExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WorkbookExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkbookExporter")
            .field("assembler", &self.assembler)
            .field("options", &self.options)
            .field("before_sheet_added", &self.before_sheet_added.is_some())
            .finish()
    }
}
