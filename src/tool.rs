use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::ParseError;

/// The tools that act on the canvas under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Picker,
}

impl ToolKind {
    /// Lowercase display name
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
            ToolKind::Picker => "picker",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = ParseError;

    /// Accepts the tool names and the verbs of the batch operations
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brush" | "paint" => Ok(ToolKind::Brush),
            "eraser" | "erase" => Ok(ToolKind::Eraser),
            "picker" | "pick" => Ok(ToolKind::Picker),
            _ => Err(ParseError::Operation(s.to_owned())),
        }
    }
}

/// Tool settings owned by the interactive layer and handed to the canvas per stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolState {
    pub tool: ToolKind,
    pub color: Color,
    brush_size: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Brush,
            color: Color::BLACK,
            brush_size: 1,
        }
    }
}

impl ToolState {
    /// Creates tool settings, clamping the brush size to at least 1
    pub fn new(tool: ToolKind, color: Color, brush_size: u32) -> Self {
        Self {
            tool,
            color,
            brush_size: brush_size.max(1),
        }
    }

    /// Brush size. The stamp reaches `size / 2` pixels on each side of the center.
    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Sizes below 1 are clamped to 1
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.max(1);
    }
}

/// What a single stroke application did to the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeOutcome {
    /// Brush or eraser touched this many in-bounds pixels
    Painted { touched: usize },
    /// The picker read this color
    Picked(Color),
}
