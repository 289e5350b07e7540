//! Cell type handlers and the materializer that runs them
//!
//! A handler looks at one [`SourceCell`] and either produces a typed
//! [`SheetCell`] or declines with [`HandlerMatch::NoMatch`]. Handlers are
//! tried in priority order and the first match wins; handlers added with
//! [`TypeHandlers::extend`] go to the front, so later registrations can
//! override the general defaults with more specific rules.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tablesheet_core::{CellValue, SheetCell};

use crate::grid::SourceCell;

/// Outcome of offering a cell to a handler
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerMatch {
    /// The handler recognized the cell
    Matched(SheetCell),
    /// The handler does not apply; try the next one
    NoMatch,
}

impl HandlerMatch {
    /// Check whether the handler recognized the cell
    pub fn is_match(&self) -> bool {
        matches!(self, HandlerMatch::Matched(_))
    }
}

impl From<Option<SheetCell>> for HandlerMatch {
    fn from(cell: Option<SheetCell>) -> Self {
        match cell {
            Some(cell) => HandlerMatch::Matched(cell),
            None => HandlerMatch::NoMatch,
        }
    }
}

/// Converts a source cell into a worksheet cell of a specific type
pub trait TypeHandler {
    /// Try to convert `cell`
    fn handle(&self, cell: &SourceCell) -> HandlerMatch;

    /// Name used in debug output
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> TypeHandler for F
where
    F: Fn(&SourceCell) -> HandlerMatch,
{
    fn handle(&self, cell: &SourceCell) -> HandlerMatch {
        self(cell)
    }
}

/// Build a cell carrying the source cell's style
fn typed(cell: &SourceCell, value: CellValue) -> HandlerMatch {
    HandlerMatch::Matched(SheetCell {
        value,
        style: cell.style.clone(),
    })
}

/// Recognizes finite decimal numbers ("42", "-3.5", "1e3")
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberHandler;

impl TypeHandler for NumberHandler {
    fn handle(&self, cell: &SourceCell) -> HandlerMatch {
        match cell.text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => typed(cell, CellValue::Number(n)),
            _ => HandlerMatch::NoMatch,
        }
    }

    fn name(&self) -> &str {
        "number"
    }
}

/// Recognizes dates and date-times in a configurable set of formats
#[derive(Debug, Clone)]
pub struct DateHandler {
    formats: Vec<String>,
}

impl DateHandler {
    /// Formats accepted by [`DateHandler::default`]
    pub const DEFAULT_FORMATS: [&'static str; 3] =
        ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    /// Create a handler accepting the given `chrono` format strings
    pub fn with_formats<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// Accepted format strings, in the order they are tried
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        self.formats.iter().find_map(|format| {
            NaiveDateTime::parse_from_str(text, format).ok().or_else(|| {
                NaiveDate::parse_from_str(text, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
        })
    }
}

impl Default for DateHandler {
    fn default() -> Self {
        Self::with_formats(Self::DEFAULT_FORMATS)
    }
}

impl TypeHandler for DateHandler {
    fn handle(&self, cell: &SourceCell) -> HandlerMatch {
        let text = cell.text.trim();
        if text.is_empty() {
            return HandlerMatch::NoMatch;
        }
        match self.parse(text) {
            Some(date) => typed(cell, CellValue::Date(date)),
            None => HandlerMatch::NoMatch,
        }
    }

    fn name(&self) -> &str {
        "date"
    }
}

/// Recognizes "true" and "false", ignoring case
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanHandler;

impl TypeHandler for BooleanHandler {
    fn handle(&self, cell: &SourceCell) -> HandlerMatch {
        let text = cell.text.trim();
        if text.eq_ignore_ascii_case("true") {
            typed(cell, CellValue::Boolean(true))
        } else if text.eq_ignore_ascii_case("false") {
            typed(cell, CellValue::Boolean(false))
        } else {
            HandlerMatch::NoMatch
        }
    }

    fn name(&self) -> &str {
        "boolean"
    }
}

/// Accepts every cell as a string
#[derive(Debug, Clone, Copy, Default)]
pub struct TextHandler;

impl TypeHandler for TextHandler {
    fn handle(&self, cell: &SourceCell) -> HandlerMatch {
        typed(cell, CellValue::String(cell.text.clone()))
    }

    fn name(&self) -> &str {
        "text"
    }
}

type SharedHandler = Arc<dyn TypeHandler + Send + Sync>;

/// An ordered list of type handlers, highest priority first
///
/// The list is a plain value: pass it to an [`crate::Assembler`] and clone
/// or extend it per export without affecting worksheets already built.
#[derive(Clone)]
pub struct TypeHandlers {
    handlers: Vec<SharedHandler>,
}

impl TypeHandlers {
    /// A list with no handlers; every cell degrades to an empty string
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Add a handler in front of all existing ones
    pub fn extend<H>(&mut self, handler: H) -> &mut Self
    where
        H: TypeHandler + Send + Sync + 'static,
    {
        self.handlers.insert(0, Arc::new(handler));
        self
    }

    /// Builder form of [`TypeHandlers::extend`]
    pub fn with<H>(mut self, handler: H) -> Self
    where
        H: TypeHandler + Send + Sync + 'static,
    {
        self.extend(handler);
        self
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler names in priority order
    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Convert one grid position into a worksheet cell
    ///
    /// A hole (`None`) always becomes an empty string cell. Otherwise the
    /// first matching handler decides; when none matches the cell also
    /// degrades to an empty string.
    pub fn materialize(&self, cell: Option<&SourceCell>) -> SheetCell {
        let Some(cell) = cell else {
            return SheetCell::blank();
        };

        self.handlers
            .iter()
            .find_map(|handler| match handler.handle(cell) {
                HandlerMatch::Matched(sheet_cell) => Some(sheet_cell),
                HandlerMatch::NoMatch => None,
            })
            .unwrap_or_else(SheetCell::blank)
    }
}

impl Default for TypeHandlers {
    /// Numbers, then dates, then booleans, then plain text
    fn default() -> Self {
        // Each `with` goes to the front, so register lowest priority first
        Self::empty()
            .with(TextHandler)
            .with(BooleanHandler)
            .with(DateHandler::default())
            .with(NumberHandler)
    }
}

impl fmt::Debug for TypeHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesheet_core::{BorderStyle, CellType, Style};

    fn cell(text: &str) -> SourceCell {
        SourceCell::new(text)
    }

    #[test]
    fn test_default_priority() {
        let handlers = TypeHandlers::default();
        assert_eq!(handlers.names(), vec!["number", "date", "boolean", "text"]);

        let kind = |text: &str| handlers.materialize(Some(&cell(text))).cell_type();
        assert_eq!(kind("12.5"), CellType::Number);
        assert_eq!(kind("2024-03-01"), CellType::Date);
        assert_eq!(kind("2024-03-01 08:30:00"), CellType::Date);
        assert_eq!(kind("TRUE"), CellType::Boolean);
        assert_eq!(kind("hello"), CellType::String);
        assert_eq!(kind("NaN"), CellType::String);
    }

    #[test]
    fn test_hole_is_blank_regardless_of_handlers() {
        let handlers = TypeHandlers::empty().with(|_: &SourceCell| {
            HandlerMatch::Matched(SheetCell::new("always"))
        });
        assert_eq!(handlers.materialize(None), SheetCell::blank());
    }

    #[test]
    fn test_no_match_degrades_to_blank() {
        let styled = cell("text").with_style(Style::new().with_border(BorderStyle::new()));
        assert_eq!(TypeHandlers::empty().materialize(Some(&styled)), SheetCell::blank());

        let numbers_only = TypeHandlers::empty().with(NumberHandler);
        assert_eq!(numbers_only.materialize(Some(&cell("abc"))), SheetCell::blank());
        assert_eq!(
            numbers_only.materialize(Some(&cell(" 7 "))).value,
            CellValue::Number(7.0)
        );
    }

    #[test]
    fn test_last_registered_wins() {
        let mut handlers = TypeHandlers::default();
        handlers.extend(|c: &SourceCell| {
            HandlerMatch::from(
                c.text
                    .strip_prefix('=')
                    .map(|f| SheetCell::new(CellValue::formula(f))),
            )
        });
        handlers.extend(|c: &SourceCell| {
            if c.text == "42" {
                HandlerMatch::Matched(SheetCell::new("the answer"))
            } else {
                HandlerMatch::NoMatch
            }
        });

        assert_eq!(handlers.len(), 6);
        assert_eq!(
            handlers.materialize(Some(&cell("42"))).value,
            CellValue::from("the answer")
        );
        assert_eq!(
            handlers.materialize(Some(&cell("=SUM(A1:A3)"))).cell_type(),
            CellType::Formula
        );
        assert_eq!(
            handlers.materialize(Some(&cell("43"))).value,
            CellValue::Number(43.0)
        );
    }

    #[test]
    fn test_extend_does_not_touch_clones() {
        let base = TypeHandlers::default();
        let mut extended = base.clone();
        extended.extend(|_: &SourceCell| HandlerMatch::NoMatch);
        assert_eq!(base.len(), 4);
        assert_eq!(extended.len(), 5);
    }

    #[test]
    fn test_handlers_carry_source_style() {
        let style = Style::new().with_border(BorderStyle::all(
            tablesheet_core::BorderLineStyle::Thin,
            tablesheet_core::Color::BLACK,
        ));
        let source = cell("1").with_style(style.clone());
        let materialized = TypeHandlers::default().materialize(Some(&source));
        assert_eq!(materialized.style, Some(style));
    }

    #[test]
    fn test_custom_date_formats() {
        let handler = DateHandler::with_formats(["%d.%m.%Y"]);
        assert!(handler.handle(&cell("31.12.2023")).is_match());
        assert!(!handler.handle(&cell("2023-12-31")).is_match());
        assert!(!handler.handle(&cell("")).is_match());
        assert_eq!(handler.formats(), &["%d.%m.%Y".to_string()]);
    }
}
