use std::fmt;
use std::str::FromStr;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::ParseError;

/// Whole-image edits that complete instantly and form one undoable step each.
///
/// Undo is snapshot based, so commands carry no inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Mirror left to right
    FlipHorizontal,
    /// Mirror top to bottom
    FlipVertical,
    /// Quarter turn clockwise
    Rotate90,
    Blur,
    /// Recolor every pixel to the hue of the given color
    RemapHue(Color),
}

impl Command {
    /// Apply the command to the canvas
    pub fn execute(&self, canvas: &mut Canvas) {
        match self {
            Command::FlipHorizontal => canvas.flip_horizontal(),
            Command::FlipVertical => canvas.flip_vertical(),
            Command::Rotate90 => canvas.rotate_90_clockwise(),
            Command::Blur => canvas.blur(),
            Command::RemapHue(target) => canvas.remap_hue(*target),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::FlipHorizontal => "flip-x",
            Command::FlipVertical => "flip-y",
            Command::Rotate90 => "rotate",
            Command::Blur => "blur",
            Command::RemapHue(_) => "hue",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::RemapHue(color) => write!(f, "hue={color}"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    /// Parses `flip-x`, `flip-y`, `rotate`, `blur` and `hue=#RRGGBB`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "flip-x" => Ok(Command::FlipHorizontal),
            "flip-y" => Ok(Command::FlipVertical),
            "rotate" => Ok(Command::Rotate90),
            "blur" => Ok(Command::Blur),
            _ => match s.split_once('=') {
                Some(("hue", color)) => Ok(Command::RemapHue(color.parse()?)),
                _ => Err(ParseError::Operation(s.to_owned())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_agree() {
        for text in ["flip-x", "flip-y", "rotate", "blur", "hue=#00ff00"] {
            let command: Command = text.parse().unwrap();
            assert_eq!(command.to_string(), text);
        }
        assert_eq!(
            "hue=#F00".parse::<Command>().unwrap(),
            Command::RemapHue(Color::RED)
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("sharpen".parse::<Command>().is_err());
        assert!(matches!(
            "hue=blue".parse::<Command>(),
            Err(ParseError::Color(_))
        ));
    }
}
