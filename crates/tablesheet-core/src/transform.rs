//! Whole-sheet geometry operations: translation and perimeter framing
//!
//! Both operations leave the input untouched and return an independent
//! worksheet.

use std::collections::BTreeMap;

use crate::cell::CellRange;
use crate::error::{Error, Result};
use crate::style::BorderEdge;
use crate::worksheet::Worksheet;
use crate::MAX_COLS;

/// A signed (rows, columns) shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    /// Rows to move down (negative moves up)
    pub rows: i64,
    /// Columns to move right (negative moves left)
    pub cols: i64,
}

impl Offset {
    /// Create a new offset
    pub const fn new(rows: i64, cols: i64) -> Self {
        Self { rows, cols }
    }

    /// The offset that undoes this one
    pub fn inverse(&self) -> Self {
        Self {
            rows: -self.rows,
            cols: -self.cols,
        }
    }

    /// Check whether the offset moves nothing
    pub fn is_zero(&self) -> bool {
        self.rows == 0 && self.cols == 0
    }
}

impl Worksheet {
    /// Move every cell and merge by `offset`
    ///
    /// The declared range keeps its start and only moves its end, so the
    /// result always reads `A1:<shifted end>` for an assembled sheet. Column
    /// widths gain one default slot per column moved right, and lose their
    /// leading slots when moved left.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOffset`] if any cell, merge or the range end would
    ///   leave the addressable domain, or the widths would cover more than
    ///   [`MAX_COLS`] columns
    /// - [`Error::TranslationCollision`] if two cells land on one address
    pub fn translate(&self, offset: Offset) -> Result<Worksheet> {
        let out_of_bounds = |target: String| Error::InvalidOffset {
            rows: offset.rows,
            cols: offset.cols,
            target,
        };

        let mut cells = BTreeMap::new();
        for (addr, cell) in self.cells() {
            let target = addr
                .offset(offset.rows, offset.cols)
                .map_err(|_| out_of_bounds(addr.to_string()))?;
            if cells.insert(target, cell.clone()).is_some() {
                return Err(Error::TranslationCollision(target.to_string()));
            }
        }

        let merges = self
            .merges()
            .iter()
            .map(|merge| {
                merge
                    .offset(offset.rows, offset.cols)
                    .map_err(|_| out_of_bounds(merge.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let range = self.range();
        let end = range
            .end
            .offset(offset.rows, offset.cols)
            .map_err(|_| out_of_bounds(format!("range end {}", range.end)))?;
        let range = CellRange::new(range.start, end);

        let column_widths = if offset.cols >= 0 {
            let slots = self.column_widths().len() as u64 + offset.cols.unsigned_abs();
            if slots > u64::from(MAX_COLS) {
                return Err(out_of_bounds(format!("column widths ({} columns)", slots)));
            }
            let mut widths = vec![None; offset.cols.unsigned_abs() as usize];
            widths.extend_from_slice(self.column_widths());
            widths
        } else {
            let skip = offset.cols.unsigned_abs() as usize;
            self.column_widths().iter().skip(skip).copied().collect()
        };

        log::debug!(
            "translated {} cells and {} merges by ({}, {}), range now {}",
            cells.len(),
            merges.len(),
            offset.rows,
            offset.cols,
            range
        );

        Ok(Worksheet::from_parts(cells, range, column_widths, merges))
    }

    /// Draw a thin black outline around the occupied cells
    ///
    /// The outline follows the bounds of the cells actually present, not
    /// the declared range, which may be stale after [`Worksheet::translate`].
    /// Perimeter cells gain the sides they sit on unless a side already
    /// names a line style; interior cells are not touched.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyWorksheet`] if there are no cells to frame.
    pub fn frame(&self) -> Result<Worksheet> {
        let bounds = self.used_range().ok_or(Error::EmptyWorksheet)?;
        let edge = BorderEdge::thin();

        let (mut cells, range, column_widths, merges) = self.clone().into_parts();
        let mut touched = 0usize;
        for (addr, cell) in cells.iter_mut() {
            let mut sides = bounds.edges_at(*addr).peekable();
            if sides.peek().is_none() {
                continue;
            }
            let border = &mut cell.style_mut().border;
            for side in sides {
                border.complete(side, &edge);
            }
            touched += 1;
        }

        log::debug!("framed {} perimeter cells of {}", touched, bounds);

        Ok(Worksheet::from_parts(cells, range, column_widths, merges))
    }
}
