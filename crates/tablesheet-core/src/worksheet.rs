//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellRange, SheetCell};
use crate::error::{Error, Result};

/// A worksheet ready to be handed to a spreadsheet encoder
///
/// Cells are keyed by address and iterate row-major. The declared
/// bounding range, column widths and merge list are stored alongside,
/// not recomputed, so they survive exactly as assembled or transformed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Worksheet {
    /// Cell storage
    cells: BTreeMap<CellAddress, SheetCell>,
    /// Declared bounding range ("!ref")
    range: CellRange,
    /// Column widths in pixels; `None` means the encoder default
    column_widths: Vec<Option<f64>>,
    /// Merged regions
    merges: Vec<CellRange>,
}

impl Worksheet {
    /// Create an empty worksheet with range A1:A1
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a worksheet from its parts
    pub fn from_parts(
        cells: BTreeMap<CellAddress, SheetCell>,
        range: CellRange,
        column_widths: Vec<Option<f64>>,
        merges: Vec<CellRange>,
    ) -> Self {
        Self {
            cells,
            range,
            column_widths,
            merges,
        }
    }

    /// Split the worksheet into its parts
    pub fn into_parts(
        self,
    ) -> (
        BTreeMap<CellAddress, SheetCell>,
        CellRange,
        Vec<Option<f64>>,
        Vec<CellRange>,
    ) {
        (self.cells, self.range, self.column_widths, self.merges)
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&SheetCell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(&addr))
    }

    /// Get a cell by address
    pub fn cell_at(&self, addr: CellAddress) -> Option<&SheetCell> {
        self.cells.get(&addr)
    }

    /// Get a mutable cell by address
    pub fn cell_at_mut(&mut self, addr: CellAddress) -> Option<&mut SheetCell> {
        self.cells.get_mut(&addr)
    }

    /// Store a cell, returning the one it replaced
    pub fn insert_cell(&mut self, addr: CellAddress, cell: SheetCell) -> Option<SheetCell> {
        self.cells.insert(addr, cell)
    }

    /// Iterate over all cells in row order
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &SheetCell)> {
        self.cells.iter().map(|(addr, cell)| (*addr, cell))
    }

    /// Iterate over occupied addresses in row order
    pub fn addresses(&self) -> impl Iterator<Item = CellAddress> + '_ {
        self.cells.keys().copied()
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the worksheet has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // === Derived Metadata ===

    /// Get the declared bounding range
    pub fn range(&self) -> CellRange {
        self.range
    }

    /// Set the declared bounding range
    pub fn set_range(&mut self, range: CellRange) {
        self.range = range;
    }

    /// Get the bounds of the occupied cells, ignoring the declared range
    pub fn used_range(&self) -> Option<CellRange> {
        let first = self.cells.keys().next()?;
        let last = self.cells.keys().next_back()?;

        let (min_col, max_col) = self
            .cells
            .keys()
            .fold((u32::MAX, 0u32), |(lo, hi), addr| {
                (lo.min(addr.col), hi.max(addr.col))
            });

        Some(CellRange::from_indices(first.row, min_col, last.row, max_col))
    }

    /// Get column widths
    pub fn column_widths(&self) -> &[Option<f64>] {
        &self.column_widths
    }

    /// Set column widths
    pub fn set_column_widths(&mut self, widths: Vec<Option<f64>>) {
        self.column_widths = widths;
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    /// Append a merged region
    ///
    /// Overlapping merges are accepted; border propagation resolves them
    /// in the order they were added.
    pub fn add_merge(&mut self, range: CellRange) {
        self.merges.push(range);
    }

    // === Invariants ===

    /// Check that cells and merges lie within the declared range and that
    /// every occupied column has a width slot
    pub fn validate(&self) -> Result<()> {
        if let Some(addr) = self.addresses().find(|addr| !self.range.contains(addr)) {
            return Err(Error::other(format!(
                "cell {} lies outside {}",
                addr, self.range
            )));
        }

        if let Some(merge) = self.merges.iter().find(|m| !self.range.contains_range(m)) {
            return Err(Error::other(format!(
                "merge {} lies outside {}",
                merge, self.range
            )));
        }

        if let Some(max_col) = self.cells.keys().map(|addr| addr.col).max() {
            if self.column_widths.len() <= max_col as usize {
                return Err(Error::other(format!(
                    "{} column widths for cells up to column {}",
                    self.column_widths.len(),
                    CellAddress::column_to_letters(max_col)
                )));
            }
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
mod encode {
    //! Encoder layout: address keys plus "!ref", "!merges" and "!cols".

    use serde::ser::{SerializeMap, SerializeSeq, Serializer};
    use serde::Serialize;

    use super::Worksheet;
    use crate::cell::{CellAddress, CellRange, CellValue, SheetCell};

    struct CellObject<'a>(&'a SheetCell);

    impl Serialize for CellObject<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let cell = self.0;
            let mut map = serializer.serialize_map(None)?;
            map.serialize_entry("t", cell.cell_type().code())?;
            match &cell.value {
                CellValue::String(s) => map.serialize_entry("v", s)?,
                CellValue::Number(n) => map.serialize_entry("v", n)?,
                CellValue::Boolean(b) => map.serialize_entry("v", b)?,
                CellValue::Date(d) => {
                    map.serialize_entry("v", &d.format("%Y-%m-%dT%H:%M:%S").to_string())?
                }
                CellValue::Formula(text) => map.serialize_entry("f", text)?,
            }
            if let Some(style) = cell.style.as_ref().filter(|s| !s.is_empty()) {
                map.serialize_entry("s", style)?;
            }
            map.end()
        }
    }

    struct Position(CellAddress);

    impl Serialize for Position {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(2))?;
            map.serialize_entry("r", &self.0.row)?;
            map.serialize_entry("c", &self.0.col)?;
            map.end()
        }
    }

    struct MergeObject<'a>(&'a CellRange);

    impl Serialize for MergeObject<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(2))?;
            map.serialize_entry("s", &Position(self.0.start))?;
            map.serialize_entry("e", &Position(self.0.end))?;
            map.end()
        }
    }

    struct Merges<'a>(&'a [CellRange]);

    impl Serialize for Merges<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
            for merge in self.0 {
                seq.serialize_element(&MergeObject(merge))?;
            }
            seq.end()
        }
    }

    struct ColumnObject(f64);

    impl Serialize for ColumnObject {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("wpx", &self.0)?;
            map.end()
        }
    }

    struct Columns<'a>(&'a [Option<f64>]);

    impl Serialize for Columns<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
            for width in self.0 {
                seq.serialize_element(&width.map(ColumnObject))?;
            }
            seq.end()
        }
    }

    impl Serialize for Worksheet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.cells.len() + 3))?;
            for (addr, cell) in &self.cells {
                map.serialize_entry(&addr.to_a1_string(), &CellObject(cell))?;
            }
            map.serialize_entry("!ref", &self.range.to_a1_string())?;
            map.serialize_entry("!merges", &Merges(&self.merges))?;
            map.serialize_entry("!cols", &Columns(&self.column_widths))?;
            map.end()
        }
    }
}
