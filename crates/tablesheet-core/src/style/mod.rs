//! Cell styling types
//!
//! Only borders are modelled: they are the part of a cell's presentation
//! that the worksheet geometry operations read and write.
//! - [`Style`] - Complete cell style
//! - [`BorderStyle`] - Cell borders
//! - [`Color`] - Color representation

mod border;
mod color;

pub use border::{BorderEdge, BorderLineStyle, BorderSide, BorderStyle};
pub use color::Color;

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Border settings
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BorderStyle::is_empty")
    )]
    pub border: BorderStyle,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border settings
    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Get a mutable reference to border settings
    pub fn border_mut(&mut self) -> &mut BorderStyle {
        &mut self.border
    }

    /// Check whether the style carries no settings
    pub fn is_empty(&self) -> bool {
        self.border.is_empty()
    }
}
