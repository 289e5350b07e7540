//! Grid to worksheet assembly
//!
//! Assembly never aborts: merges whose anchor lies outside the grid are
//! skipped and reported, perimeter positions without a cell are ignored.

use std::collections::BTreeMap;

use tablesheet_core::{BorderStyle, CellAddress, CellRange, Error, SheetCell, Worksheet};

use crate::grid::Grid;
use crate::handlers::TypeHandlers;

/// Assemble a grid into a worksheet with the given handlers
///
/// Shorthand for [`Assembler::assemble`] when the anomaly list is not
/// needed.
pub fn assemble(grid: &Grid, handlers: &TypeHandlers) -> Worksheet {
    Assembler::new(handlers.clone()).assemble(grid)
}

/// Result of [`Assembler::assemble_with_report`]
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// The assembled worksheet
    pub worksheet: Worksheet,
    /// Problems that were skipped over, in the order met
    pub anomalies: Vec<Error>,
}

impl Assembly {
    /// Check whether assembly met no anomalies
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Builds worksheets from grids
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    handlers: TypeHandlers,
}

impl Assembler {
    /// Create an assembler with an explicit handler list
    pub fn new(handlers: TypeHandlers) -> Self {
        Self { handlers }
    }

    /// The handler list used for materialization
    pub fn handlers(&self) -> &TypeHandlers {
        &self.handlers
    }

    /// Mutable handler list, for registering extra handlers
    pub fn handlers_mut(&mut self) -> &mut TypeHandlers {
        &mut self.handlers
    }

    /// Assemble a grid, discarding the anomaly list
    pub fn assemble(&self, grid: &Grid) -> Worksheet {
        self.assemble_with_report(grid).worksheet
    }

    /// Assemble a grid and report what had to be skipped
    pub fn assemble_with_report(&self, grid: &Grid) -> Assembly {
        let mut anomalies = Vec::new();

        if grid.rows.is_empty() {
            log::debug!("assembled empty grid");
            return Assembly {
                worksheet: Worksheet::new(),
                anomalies,
            };
        }

        let mut cells = BTreeMap::new();
        let mut last_column: Option<u32> = None;
        for (r, row) in grid.rows.iter().enumerate() {
            let Ok(r) = u32::try_from(r) else {
                log::warn!("grid has more rows than a worksheet can address, truncating");
                break;
            };
            for (c, source) in row.iter().enumerate() {
                let Ok(c) = u32::try_from(c) else {
                    log::warn!("row {} is wider than a worksheet can address, truncating", r + 1);
                    break;
                };
                cells.insert(CellAddress::new(r, c), self.handlers.materialize(source.as_ref()));
                last_column = Some(last_column.map_or(c, |last| last.max(c)));
            }
        }

        let last_row = u32::try_from(grid.rows.len() - 1).unwrap_or(u32::MAX);
        let range = CellRange::from_indices(0, 0, last_row, last_column.unwrap_or(0));

        for merge in &grid.merges {
            if let Err(err) = propagate_borders(&mut cells, merge, &range) {
                log::warn!("skipping border propagation for merge {}: {}", merge, err);
                anomalies.push(err);
            }
        }

        let width_slots = last_column.map_or(0, |last| last as usize + 1);
        let mut column_widths: Vec<Option<f64>> = grid
            .rows
            .first()
            .map(|header| {
                header
                    .iter()
                    .map(|cell| cell.as_ref().and_then(|c| c.width))
                    .collect()
            })
            .unwrap_or_default();
        if column_widths.len() < width_slots {
            column_widths.resize(width_slots, None);
        }

        log::debug!(
            "assembled {} cells into {} with {} merges ({} anomalies)",
            cells.len(),
            range,
            grid.merges.len(),
            anomalies.len()
        );

        Assembly {
            worksheet: Worksheet::from_parts(cells, range, column_widths, grid.merges.clone()),
            anomalies,
        }
    }
}

/// Copy the anchor's border sides onto the perimeter of `merge`
///
/// Only the part of the merge inside `bounds` is walked. Sides come from
/// the merge's own edges, not the clipped ones.
fn propagate_borders(
    cells: &mut BTreeMap<CellAddress, SheetCell>,
    merge: &CellRange,
    bounds: &CellRange,
) -> Result<(), Error> {
    let anchor = merge.start;
    let border: BorderStyle = match cells.get(&anchor) {
        Some(cell) => match &cell.style {
            Some(style) if !style.border.is_empty() => style.border.clone(),
            _ => return Ok(()),
        },
        None => return Err(Error::UndefinedAnchor(anchor.to_string())),
    };

    let Some(visible) = merge.intersection(bounds) else {
        return Ok(());
    };

    for addr in visible.perimeter() {
        let Some(cell) = cells.get_mut(&addr) else {
            continue;
        };
        for side in merge.edges_at(addr) {
            if let Some(edge) = border.get(side) {
                cell.style_mut().border.set(side, edge.clone());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SourceCell;
    use pretty_assertions::assert_eq;
    use tablesheet_core::{BorderEdge, BorderLineStyle, BorderSide, CellValue, Color, Style};

    fn range(s: &str) -> CellRange {
        CellRange::parse(s).unwrap()
    }

    fn sides(ws: &Worksheet, a: &str) -> Vec<BorderSide> {
        let cell = ws.cell(a).unwrap().unwrap();
        BorderSide::ALL
            .into_iter()
            .filter(|side| cell.border(*side).is_some())
            .collect()
    }

    fn boxed(text: &str) -> SourceCell {
        SourceCell::new(text).with_style(
            Style::new().with_border(BorderStyle::all(BorderLineStyle::Medium, Color::BLUE)),
        )
    }

    #[test]
    fn test_end_to_end_two_by_two() {
        let grid = Grid::from_text([["A", "B"], ["C", "D"]]);
        let ws = assemble(&grid, &TypeHandlers::default());

        let addresses: Vec<String> = ws.addresses().map(|a| a.to_string()).collect();
        assert_eq!(addresses, vec!["A1", "B1", "A2", "B2"]);
        assert_eq!(ws.range().to_string(), "A1:B2");
        assert_eq!(ws.column_widths().len(), 2);
        assert_eq!(ws.cell("B2").unwrap().unwrap().value, CellValue::from("D"));
        assert!(ws.merges().is_empty());
        assert!(ws.validate().is_ok());
    }

    #[test]
    fn test_full_merge_top_border_reaches_top_row_only() {
        let anchor = SourceCell::new("head").with_style(
            Style::new().with_border(BorderStyle::new().with_top(BorderLineStyle::Thick, Color::RED)),
        );
        let mut grid = Grid::new();
        grid.push_row(vec![Some(anchor), None]);
        grid.push_row(vec![None, None]);
        let grid = grid.with_merge(range("A1:B2"));

        let ws = assemble(&grid, &TypeHandlers::default());

        assert_eq!(sides(&ws, "A1"), vec![BorderSide::Top]);
        assert_eq!(sides(&ws, "B1"), vec![BorderSide::Top]);
        assert!(sides(&ws, "A2").is_empty());
        assert!(sides(&ws, "B2").is_empty());
        assert_eq!(
            ws.cell("B1").unwrap().unwrap().border(BorderSide::Top),
            Some(&BorderEdge::new(BorderLineStyle::Thick, Color::RED))
        );
        assert_eq!(ws.merges(), &[range("A1:B2")]);
    }

    #[test]
    fn test_full_merge_corners_get_their_sides() {
        let mut grid = Grid::new();
        grid.push_row(vec![Some(boxed("x")), None]);
        grid.push_row(vec![None, None]);
        let ws = assemble(&grid.with_merge(range("A1:B2")), &TypeHandlers::default());

        assert_eq!(sides(&ws, "A1"), BorderSide::ALL.to_vec());
        assert_eq!(sides(&ws, "B1"), vec![BorderSide::Top, BorderSide::Right]);
        assert_eq!(sides(&ws, "A2"), vec![BorderSide::Bottom, BorderSide::Left]);
        assert_eq!(sides(&ws, "B2"), vec![BorderSide::Bottom, BorderSide::Right]);
    }

    #[test]
    fn test_interior_untouched() {
        let mut grid = Grid::new();
        grid.push_row(vec![Some(boxed("x")), None, None]);
        grid.push_row(vec![None, None, None]);
        grid.push_row(vec![None, None, None]);
        let ws = assemble(&grid.with_merge(range("A1:C3")), &TypeHandlers::default());

        assert!(ws.cell("B2").unwrap().unwrap().style.is_none());
        assert_eq!(sides(&ws, "B1"), vec![BorderSide::Top]);
        assert_eq!(sides(&ws, "C2"), vec![BorderSide::Right]);
    }

    #[test]
    fn test_single_cell_merge_gets_all_sides() {
        let mut grid = Grid::new();
        grid.push_row(vec![Some(boxed("x")), Some(SourceCell::new("y"))]);
        let ws = assemble(&grid.with_merge(range("A1:A1")), &TypeHandlers::default());

        assert_eq!(sides(&ws, "A1"), BorderSide::ALL.to_vec());
        assert!(sides(&ws, "B1").is_empty());
    }

    #[test]
    fn test_last_merge_wins() {
        let red_top = SourceCell::new("a").with_style(
            Style::new().with_border(BorderStyle::new().with_top(BorderLineStyle::Thin, Color::RED)),
        );
        let blue_top = SourceCell::new("b").with_style(
            Style::new().with_border(BorderStyle::new().with_top(BorderLineStyle::Thin, Color::BLUE)),
        );
        let mut grid = Grid::new();
        grid.push_row(vec![Some(red_top), Some(blue_top), None]);

        let narrow_first = grid.clone().with_merge(range("B1:C1")).with_merge(range("A1:C1"));
        let ws = assemble(&narrow_first, &TypeHandlers::default());
        let top = |a: &str| ws.cell(a).unwrap().unwrap().border(BorderSide::Top).map(|e| e.color);
        assert_eq!(top("A1"), Some(Color::RED));
        assert_eq!(top("B1"), Some(Color::RED));
        assert_eq!(top("C1"), Some(Color::RED));

        // The anchor is read when its merge is applied
        let wide_first = grid.with_merge(range("A1:C1")).with_merge(range("B1:C1"));
        let ws = assemble(&wide_first, &TypeHandlers::default());
        assert_eq!(ws.cell("C1").unwrap().unwrap().border(BorderSide::Top).map(|e| e.color), Some(Color::RED));
    }

    #[test]
    fn test_undefined_anchor_is_reported_and_skipped() {
        let mut grid = Grid::new();
        grid.push_row(vec![Some(boxed("x"))]);
        let grid = grid.with_merge(range("C5:D6")).with_merge(range("A1:A1"));

        let assembly = Assembler::default().assemble_with_report(&grid);
        assert!(!assembly.is_clean());
        assert_eq!(assembly.anomalies, vec![Error::UndefinedAnchor("C5".to_string())]);
        // Merges are copied through even when skipped
        assert_eq!(assembly.worksheet.merges().len(), 2);
        assert_eq!(sides(&assembly.worksheet, "A1"), BorderSide::ALL.to_vec());
    }

    #[test]
    fn test_merge_hanging_off_the_grid() {
        let mut grid = Grid::new();
        grid.push_row(vec![Some(boxed("x"))]);
        let assembly = Assembler::default().assemble_with_report(&grid.with_merge(range("A1:B3")));

        assert!(assembly.is_clean());
        assert_eq!(assembly.worksheet.cell_count(), 1);
        assert_eq!(sides(&assembly.worksheet, "A1"), BorderSide::ALL.to_vec());
    }

    #[test]
    fn test_huge_merge_is_clipped_to_grid() {
        let mut grid = Grid::new();
        grid.push_row(vec![Some(boxed("x")), Some(SourceCell::new("y"))]);
        grid.push_row(vec![Some(SourceCell::new("z")), Some(SourceCell::new("w"))]);
        let merge = CellRange::from_indices(0, 0, u32::MAX, u32::MAX);

        let assembly = Assembler::default().assemble_with_report(&grid.with_merge(merge));

        assert!(assembly.is_clean());
        let ws = &assembly.worksheet;
        assert_eq!(ws.cell_count(), 4);
        assert_eq!(ws.merges(), &[merge]);
        // Grid bounds are not merge edges
        assert_eq!(sides(ws, "A1"), BorderSide::ALL.to_vec());
        assert_eq!(sides(ws, "B1"), vec![BorderSide::Top]);
        assert_eq!(sides(ws, "A2"), vec![BorderSide::Left]);
        assert!(sides(ws, "B2").is_empty());
    }

    #[test]
    fn test_widths_from_first_row_padded() {
        let mut grid = Grid::new();
        grid.push_row(vec![Some(SourceCell::new("a").with_width(40.0)), None]);
        grid.push_row(vec![
            Some(SourceCell::new("b").with_width(99.0)),
            Some(SourceCell::new("c")),
            Some(SourceCell::new("d").with_width(60.0)),
        ]);
        let ws = assemble(&grid, &TypeHandlers::default());

        assert_eq!(ws.column_widths(), &[Some(40.0), None, None]);
        assert_eq!(ws.range().to_string(), "A1:C2");
        assert!(ws.validate().is_ok());
    }

    #[test]
    fn test_holes_and_trailing_empty_rows() {
        let mut grid = Grid::new();
        grid.push_row(vec![None, Some(SourceCell::new("1"))]);
        grid.push_row(Vec::new());
        grid.push_row(Vec::new());
        let ws = assemble(&grid, &TypeHandlers::default());

        assert_eq!(ws.range().to_string(), "A1:B3");
        assert_eq!(ws.cell("A1").unwrap(), Some(&SheetCell::blank()));
        assert_eq!(ws.cell("B1").unwrap().unwrap().value, CellValue::Number(1.0));
        assert_eq!(ws.cell_count(), 2);
    }

    #[test]
    fn test_empty_grid() {
        let ws = assemble(&Grid::new(), &TypeHandlers::default());
        assert!(ws.is_empty());
        assert_eq!(ws.range().to_string(), "A1:A1");
        assert!(ws.column_widths().is_empty());
    }

    #[test]
    fn test_empty_handlers_give_blank_strings() {
        let grid = Grid::from_text([["1", "true"]]);
        let ws = assemble(&grid, &TypeHandlers::empty());
        assert!(ws.cells().all(|(_, cell)| *cell == SheetCell::blank()));
    }
}
