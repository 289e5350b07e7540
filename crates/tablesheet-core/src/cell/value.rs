//! Cell value types

use chrono::NaiveDateTime;
use std::fmt;

use crate::style::{BorderEdge, BorderSide, Style};

/// Type tag of a worksheet cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    String,
    Number,
    Boolean,
    Date,
    Formula,
}

impl CellType {
    /// Short tag used by spreadsheet encoders ("s", "n", "b", "d")
    ///
    /// Encoders have no formula tag: formula cells are tagged numeric and
    /// carry their text separately.
    pub fn code(&self) -> &'static str {
        match self {
            CellType::String => "s",
            CellType::Number | CellType::Formula => "n",
            CellType::Boolean => "b",
            CellType::Date => "d",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellType::String => "string",
            CellType::Number => "number",
            CellType::Boolean => "boolean",
            CellType::Date => "date",
            CellType::Formula => "formula",
        };
        f.write_str(name)
    }
}

/// Represents the value stored in a worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// String value
    String(String),

    /// Numeric value
    Number(f64),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Date/time value
    Date(NaiveDateTime),

    /// Formula text without the leading '='
    Formula(String),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Create a new formula value, stripping a leading '='
    pub fn formula<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        match text.strip_prefix('=') {
            Some(stripped) => CellValue::Formula(stripped.to_string()),
            None => CellValue::Formula(text),
        }
    }

    /// The type tag of this value
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::String(_) => CellType::String,
            CellValue::Number(_) => CellType::Number,
            CellValue::Boolean(_) => CellType::Boolean,
            CellValue::Date(_) => CellType::Date,
            CellValue::Formula(_) => CellType::Formula,
        }
    }

    /// Check for the empty string placeholder used for grid holes
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::String(s) if s.is_empty())
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a date
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the formula text if this is a formula cell
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula(text) => Some(text),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::String(String::new())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%dT%H:%M:%S")),
            CellValue::Formula(text) => write!(f, "={}", text),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(d: NaiveDateTime) -> Self {
        CellValue::Date(d)
    }
}

/// A materialized worksheet cell: a typed value and an optional style
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetCell {
    /// Cell value
    pub value: CellValue,
    /// Cell style, if any
    pub style: Option<Style>,
}

impl SheetCell {
    /// Create an unstyled cell
    pub fn new<V: Into<CellValue>>(value: V) -> Self {
        Self {
            value: value.into(),
            style: None,
        }
    }

    /// The empty string cell used for grid holes and unmatched cells
    pub fn blank() -> Self {
        Self::default()
    }

    /// Attach a style
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// The type tag of the cell value
    pub fn cell_type(&self) -> CellType {
        self.value.cell_type()
    }

    /// The border edge on one side, if the cell defines it
    pub fn border(&self, side: BorderSide) -> Option<&BorderEdge> {
        self.style.as_ref().and_then(|s| s.border.get(side))
    }

    /// Mutable style, created on first use
    pub fn style_mut(&mut self) -> &mut Style {
        self.style.get_or_insert_with(Style::default)
    }
}
