//! Source table model: the grid handed over by a table-reading adapter

use serde::{Deserialize, Deserializer};
use tablesheet_core::{CellRange, Style};

/// One cell as read from the source table
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "SourceCellRepr")]
pub struct SourceCell {
    /// Rendered text
    pub text: String,
    /// Rendered width in pixels
    pub width: Option<f64>,
    /// Presentation style picked up by the adapter
    pub style: Option<Style>,
}

impl SourceCell {
    /// Create a cell from its rendered text
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            width: None,
            style: None,
        }
    }

    /// Set the rendered width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the presentation style
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

impl From<&str> for SourceCell {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// A bare string is shorthand for a cell with only text
#[derive(Deserialize)]
#[serde(untagged)]
enum SourceCellRepr {
    Text(String),
    Full {
        #[serde(default)]
        text: String,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        style: Option<Style>,
    },
}

impl From<SourceCellRepr> for SourceCell {
    fn from(repr: SourceCellRepr) -> Self {
        match repr {
            SourceCellRepr::Text(text) => SourceCell::new(text),
            SourceCellRepr::Full { text, width, style } => SourceCell { text, width, style },
        }
    }
}

/// A jagged row-major table plus its merge regions
///
/// `None` entries are holes: positions the table covers without a cell of
/// their own (typically the shadow of a spanning cell).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Grid {
    /// Rows of optional cells
    #[serde(default)]
    pub rows: Vec<Vec<Option<SourceCell>>>,
    /// Merge regions, relative to the grid ("A1:B2")
    #[serde(default, deserialize_with = "deserialize_ranges")]
    pub merges: Vec<CellRange>,
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid where every position holds a text cell
    pub fn from_text<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|s| Some(SourceCell::new(s))).collect())
                .collect(),
            merges: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<Option<SourceCell>>) {
        self.rows.push(row);
    }

    /// Append a merge region
    pub fn with_merge(mut self, range: CellRange) -> Self {
        self.merges.push(range);
        self
    }

    /// Number of rows, including empty trailing rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the cell at a position, if the position holds one
    pub fn cell(&self, row: usize, col: usize) -> Option<&SourceCell> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Get a mutable cell at a position
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut SourceCell> {
        self.rows.get_mut(row)?.get_mut(col)?.as_mut()
    }
}

fn deserialize_ranges<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<CellRange>, D::Error> {
    let texts = Vec::<String>::deserialize(deserializer)?;
    texts
        .iter()
        .map(|text| CellRange::parse(text).map_err(serde::de::Error::custom))
        .collect()
}
