//! Border style types

use super::Color;
use std::fmt;
use std::str::FromStr;

/// One outer side of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl BorderSide {
    /// All four sides, in propagation order
    pub const ALL: [BorderSide; 4] = [
        BorderSide::Top,
        BorderSide::Bottom,
        BorderSide::Left,
        BorderSide::Right,
    ];
}

/// Border style for a cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderStyle {
    /// Top border
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub top: Option<BorderEdge>,
    /// Bottom border
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub bottom: Option<BorderEdge>,
    /// Left border
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub left: Option<BorderEdge>,
    /// Right border
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub right: Option<BorderEdge>,
}

impl BorderStyle {
    /// Create a new border style with no borders
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all borders to the same style
    pub fn all(style: BorderLineStyle, color: Color) -> Self {
        let edge = Some(BorderEdge::new(style, color));
        Self {
            top: edge.clone(),
            bottom: edge.clone(),
            left: edge.clone(),
            right: edge,
        }
    }

    /// Set the left border
    pub fn with_left(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.left = Some(BorderEdge::new(style, color));
        self
    }

    /// Set the right border
    pub fn with_right(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.right = Some(BorderEdge::new(style, color));
        self
    }

    /// Set the top border
    pub fn with_top(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.top = Some(BorderEdge::new(style, color));
        self
    }

    /// Set the bottom border
    pub fn with_bottom(mut self, style: BorderLineStyle, color: Color) -> Self {
        self.bottom = Some(BorderEdge::new(style, color));
        self
    }

    /// Get the edge on one side
    pub fn get(&self, side: BorderSide) -> Option<&BorderEdge> {
        self.slot(side).as_ref()
    }

    /// Replace the edge on one side
    pub fn set(&mut self, side: BorderSide, edge: BorderEdge) {
        *self.slot_mut(side) = Some(edge);
    }

    /// Set the edge on one side unless that side already names a line style
    ///
    /// An absent side, or a side present with [`BorderLineStyle::None`], is
    /// replaced by `edge`. Returns whether the side changed.
    pub fn complete(&mut self, side: BorderSide, edge: &BorderEdge) -> bool {
        let slot = self.slot_mut(side);
        if slot.as_ref().is_some_and(|existing| !existing.style.is_none()) {
            return false;
        }
        *slot = Some(edge.clone());
        true
    }

    /// Check if all borders are empty
    pub fn is_empty(&self) -> bool {
        BorderSide::ALL.iter().all(|side| self.get(*side).is_none())
    }

    fn slot(&self, side: BorderSide) -> &Option<BorderEdge> {
        match side {
            BorderSide::Top => &self.top,
            BorderSide::Bottom => &self.bottom,
            BorderSide::Left => &self.left,
            BorderSide::Right => &self.right,
        }
    }

    fn slot_mut(&mut self, side: BorderSide) -> &mut Option<BorderEdge> {
        match side {
            BorderSide::Top => &mut self.top,
            BorderSide::Bottom => &mut self.bottom,
            BorderSide::Left => &mut self.left,
            BorderSide::Right => &mut self.right,
        }
    }
}

/// A single border edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderEdge {
    /// Line style; `None` means the edge exists without a style name
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BorderLineStyle::is_none")
    )]
    pub style: BorderLineStyle,
    /// Line color
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Color,
}

impl BorderEdge {
    /// Create a new border edge
    pub fn new(style: BorderLineStyle, color: Color) -> Self {
        Self { style, color }
    }

    /// Create a thin black border
    pub fn thin() -> Self {
        Self::new(BorderLineStyle::Thin, Color::BLACK)
    }

    /// Create a medium black border
    pub fn medium() -> Self {
        Self::new(BorderLineStyle::Medium, Color::BLACK)
    }

    /// Create a thick black border
    pub fn thick() -> Self {
        Self::new(BorderLineStyle::Thick, Color::BLACK)
    }
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum BorderLineStyle {
    /// No line style named
    #[default]
    None,
    /// Thin line
    Thin,
    /// Medium line
    Medium,
    /// Thick line
    Thick,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Double line
    Double,
    /// Hair line (very thin)
    Hair,
    /// Medium dashed
    MediumDashed,
    /// Dash-dot
    DashDot,
    /// Medium dash-dot
    MediumDashDot,
    /// Dash-dot-dot
    DashDotDot,
    /// Medium dash-dot-dot
    MediumDashDotDot,
    /// Slant dash-dot
    SlantDashDot,
}

impl BorderLineStyle {
    const NAMES: [(BorderLineStyle, &'static str); 14] = [
        (BorderLineStyle::None, "none"),
        (BorderLineStyle::Thin, "thin"),
        (BorderLineStyle::Medium, "medium"),
        (BorderLineStyle::Thick, "thick"),
        (BorderLineStyle::Dashed, "dashed"),
        (BorderLineStyle::Dotted, "dotted"),
        (BorderLineStyle::Double, "double"),
        (BorderLineStyle::Hair, "hair"),
        (BorderLineStyle::MediumDashed, "mediumDashed"),
        (BorderLineStyle::DashDot, "dashDot"),
        (BorderLineStyle::MediumDashDot, "mediumDashDot"),
        (BorderLineStyle::DashDotDot, "dashDotDot"),
        (BorderLineStyle::MediumDashDotDot, "mediumDashDotDot"),
        (BorderLineStyle::SlantDashDot, "slantDashDot"),
    ];

    /// Check whether no line style is named
    pub fn is_none(&self) -> bool {
        matches!(self, BorderLineStyle::None)
    }

    /// The spreadsheet style name (e.g. "thin", "mediumDashed")
    pub fn name(&self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(style, _)| style == self)
            .map(|(_, name)| *name)
            .unwrap_or("none")
    }
}

impl fmt::Display for BorderLineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BorderLineStyle {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
            .map(|(style, _)| *style)
            .ok_or_else(|| crate::Error::other(format!("unknown border style '{}'", s)))
    }
}
