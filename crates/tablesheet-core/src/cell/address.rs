//! Cell address and range types

use crate::error::{Error, Result};
use crate::style::BorderSide;
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "AB12")
///
/// Rows and columns are 0-based internally; the A1 form uses bijective
/// base-26 column letters and a 1-based row number. Addresses order
/// row-major, so sorted collections of addresses read like a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., Z=25, AA=26)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Create an address from signed components
    ///
    /// Fails with [`Error::InvalidCoordinate`] if either component is
    /// negative or does not fit the 32-bit index space.
    pub fn from_signed(row: i64, col: i64) -> Result<Self> {
        match (u32::try_from(row), u32::try_from(col)) {
            (Ok(row), Ok(col)) => Ok(Self { row, col }),
            _ => Err(Error::InvalidCoordinate { row, col }),
        }
    }

    /// Shift this address by a signed offset
    pub fn offset(&self, rows: i64, cols: i64) -> Result<Self> {
        Self::from_signed(self.row as i64 + rows, self.col as i64 + cols)
    }

    /// Parse a cell address from A1-style notation
    ///
    /// The whole input must be letters followed by digits. Letters are
    /// case-insensitive; absolute markers and whitespace are rejected.
    ///
    /// # Examples
    /// ```
    /// use tablesheet_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B3").unwrap();
    /// assert_eq!(addr.row, 2);
    /// assert_eq!(addr.col, 1);
    ///
    /// assert!(CellAddress::parse("A0").is_err());
    /// assert!(CellAddress::parse("$A$1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let mut pos = 0;

        // Parse column letters
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == 0 {
            return Err(Error::MalformedAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        let col = Self::letters_to_column(&s[..pos])?;

        // Parse row number
        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::MalformedAddress(format!("no row number in '{}'", s)));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedAddress(format!(
                "unexpected characters after row number in '{}'",
                s
            )));
        }

        let row: u64 = row_str
            .parse()
            .map_err(|_| Error::MalformedAddress(format!("row number too large in '{}'", s)))?;

        // Rows are 1-based in A1 notation
        if row == 0 {
            return Err(Error::MalformedAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        let row = u32::try_from(row - 1)
            .map_err(|_| Error::MalformedAddress(format!("row number too large in '{}'", s)))?;

        Ok(Self { row, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = Vec::new();
        let mut n = col as u64 + 1; // 1-based for calculation

        while n > 0 {
            n -= 1;
            result.push((n % 26) as u8 + b'A');
            n /= 26;
        }

        result.reverse();
        // Only ASCII uppercase letters were pushed
        result.into_iter().map(char::from).collect()
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::MalformedAddress("empty column letters".into()));
        }

        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::MalformedAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            let digit = c.to_ascii_uppercase() as u64 - 'A' as u64 + 1;
            col = col
                .checked_mul(26)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| {
                    Error::MalformedAddress(format!("column '{}' too large", letters))
                })?;
        }

        // Convert to 0-based
        u32::try_from(col - 1)
            .map_err(|_| Error::MalformedAddress(format!("column '{}' too large", letters)))
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        let mut result = Self::column_to_letters(self.col);
        result.push_str(&(self.row as u64 + 1).to_string());
        result
    }

    /// Create a range from this address to another
    pub fn to(&self, other: CellAddress) -> CellRange {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<(i64, i64)> for CellAddress {
    type Error = Error;

    fn try_from((row, col): (i64, i64)) -> Result<Self> {
        Self::from_signed(row, col)
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        // Normalize so start is top-left and end is bottom-right
        Self {
            start: CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a range from row/column indices
    pub fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from A1:B10 notation
    ///
    /// Both halves are required, including for single-cell ranges ("C3:C3").
    pub fn parse(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| Error::MalformedRange(format!("missing ':' in '{}'", s)))?;

        let start = CellAddress::parse(start)
            .map_err(|e| Error::MalformedRange(format!("'{}': {}", s, e)))?;
        let end = CellAddress::parse(end)
            .map_err(|e| Error::MalformedRange(format!("'{}': {}", s, e)))?;

        Ok(Self::new(start, end))
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Check if another range lies entirely within this one
    pub fn contains_range(&self, other: &CellRange) -> bool {
        self.contains(&other.start) && self.contains(&other.end)
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u64 {
        (self.end.row - self.start.row) as u64 + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u64 {
        (self.end.col - self.start.col) as u64 + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() * self.col_count()
    }

    /// Check if this range overlaps with another
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && self.end.row >= other.start.row
            && self.start.col <= other.end.col
            && self.end.col >= other.start.col
    }

    /// The part of this range that also lies within `other`
    pub fn intersection(&self, other: &CellRange) -> Option<CellRange> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            start: CellAddress::new(
                self.start.row.max(other.start.row),
                self.start.col.max(other.start.col),
            ),
            end: CellAddress::new(
                self.end.row.min(other.end.row),
                self.end.col.min(other.end.col),
            ),
        })
    }

    /// Check whether `addr` lies on the given outer edge of this range
    pub fn is_on_edge(&self, addr: &CellAddress, side: BorderSide) -> bool {
        if !self.contains(addr) {
            return false;
        }
        match side {
            BorderSide::Top => addr.row == self.start.row,
            BorderSide::Bottom => addr.row == self.end.row,
            BorderSide::Left => addr.col == self.start.col,
            BorderSide::Right => addr.col == self.end.col,
        }
    }

    /// The outer edges of this range that `addr` touches
    ///
    /// Corner cells touch two edges, a single-cell range touches all four,
    /// interior and outside cells touch none.
    pub fn edges_at(&self, addr: CellAddress) -> impl Iterator<Item = BorderSide> + '_ {
        BorderSide::ALL
            .into_iter()
            .filter(move |side| self.is_on_edge(&addr, *side))
    }

    /// Shift both corners by a signed offset
    pub fn offset(&self, rows: i64, cols: i64) -> Result<Self> {
        Ok(Self {
            start: self.start.offset(rows, cols)?,
            end: self.end.offset(rows, cols)?,
        })
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row as u64,
            current_col: self.start.col as u64,
        }
    }

    /// Iterate over the perimeter cells of the range (row by row)
    ///
    /// Interior cells are skipped without being visited.
    pub fn perimeter(&self) -> impl Iterator<Item = CellAddress> + '_ {
        (self.start.row..=self.end.row).flat_map(move |row| {
            let whole_row = row == self.start.row || row == self.end.row;
            let cols: Vec<u32> = if whole_row {
                (self.start.col..=self.end.col).collect()
            } else if self.start.col == self.end.col {
                vec![self.start.col]
            } else {
                vec![self.start.col, self.end.col]
            };
            cols.into_iter().map(move |col| CellAddress::new(row, col))
        })
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u64,
    current_col: u64,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row > self.range.end.row as u64 {
            return None;
        }

        let addr = CellAddress::new(self.current_row as u32, self.current_col as u32);

        // Move to next cell
        self.current_col += 1;
        if self.current_col > self.range.end.col as u64 {
            self.current_col = self.range.start.col as u64;
            self.current_row += 1;
        }

        Some(addr)
    }
}
