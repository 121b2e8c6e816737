#![warn(clippy::all, rust_2018_idioms)]

//! Headless batch driver: open or create a canvas, run a list of edits
//! through the editor, and save the result.
//!
//! ```text
//! pixeleon --input sprite.png --output sprite.ico flip-x hue=#00ff00
//! pixeleon --size 16x16 --output dot.png paint=8,8,1,#ff0000 undo redo
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;

use pixeleon::canvas::TRANSPARENT;
use pixeleon::config::DEFAULT_CONFIG_FILE;
use pixeleon::{Accelerator, Action, Color, Command, Config, Editor, ParseError, StrokeOutcome, ToolKind};

#[derive(Parser, Debug)]
#[command(
    name = "pixeleon",
    about = "Pixel-art editor, headless batch mode",
    long_about = "Apply pixel edits to an image without opening a window.\n\n\
                  Operations run in order:\n  \
                  flip-x | flip-y | rotate | blur | hue=#RRGGBB\n  \
                  paint=X,Y[,SIZE[,#RRGGBB]] | erase=X,Y[,SIZE] | pick=X,Y\n  \
                  undo | redo | key=ACCEL (e.g. key=Ctrl+Z)"
)]
struct CliArgs {
    /// Image to open. Without it a blank transparent canvas is used.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Size of the blank canvas when no input is given
    #[arg(long, value_name = "WxH", value_parser = parse_size, conflicts_with = "input")]
    size: Option<(u32, u32)>,

    /// Key-binding config, created with defaults if missing
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Destination file. The extension picks the format (default PNG).
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Edits to apply, in order
    #[arg(value_name = "OP")]
    ops: Vec<Op>,

    /// Log every stroke and command
    #[arg(short, long)]
    verbose: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let h = h.trim().parse::<u32>().map_err(|e| e.to_string())?;
    Ok((w, h))
}

/// One step of the batch
#[derive(Debug, Clone, PartialEq)]
enum Op {
    Edit(Command),
    Stroke {
        tool: ToolKind,
        x: i64,
        y: i64,
        size: Option<u32>,
        color: Option<Color>,
    },
    Undo,
    Redo,
    Key(Accelerator),
}

impl FromStr for Op {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Operation(s.to_owned());
        match s.trim() {
            "undo" => return Ok(Op::Undo),
            "redo" => return Ok(Op::Redo),
            _ => {}
        }

        let Some((name, args)) = s.split_once('=') else {
            return s.parse().map(Op::Edit);
        };

        let tool = match name {
            "key" => return args.parse().map(Op::Key),
            "paint" | "erase" | "pick" => name.parse::<ToolKind>()?,
            _ => return s.parse().map(Op::Edit),
        };

        let fields: Vec<&str> = args.split(',').map(str::trim).collect();
        let max_fields = match tool {
            ToolKind::Brush => 4,
            ToolKind::Eraser => 3,
            ToolKind::Picker => 2,
        };
        if fields.len() < 2 || fields.len() > max_fields {
            return Err(err());
        }

        let x = fields[0].parse().map_err(|_| err())?;
        let y = fields[1].parse().map_err(|_| err())?;
        let size = fields
            .get(2)
            .map(|f| f.parse::<u32>().map_err(|_| err()))
            .transpose()?;
        let color = fields.get(3).map(|f| f.parse::<Color>()).transpose()?;

        Ok(Op::Stroke { tool, x, y, size, color })
    }
}

fn apply(editor: &mut Editor, config: &Config, op: &Op) {
    match op {
        Op::Edit(command) => editor.execute(*command),
        Op::Stroke { tool, x, y, size, color } => {
            editor.set_tool(*tool);
            if let Some(size) = size {
                editor.set_brush_size(*size);
            }
            if let Some(color) = color {
                editor.set_color(*color);
            }
            match editor.stroke_start(*x, *y) {
                None | Some(StrokeOutcome::Painted { touched: 0 }) => {
                    log::warn!("{} at ({}, {}) is outside the canvas", tool, x, y)
                }
                Some(_) => {}
            }
            editor.stroke_end();
            if *tool == ToolKind::Picker {
                log::info!("Current color is {}", editor.tool_state().color);
            }
        }
        Op::Undo => {
            if !editor.undo() {
                log::info!("Nothing to undo");
            }
        }
        Op::Redo => {
            if !editor.redo() {
                log::info!("Nothing to redo");
            }
        }
        Op::Key(accelerator) => match editor.trigger(accelerator, &config.keybinds) {
            Some(Action::Load | Action::Save) => {
                log::warn!("{} needs a file dialog and is ignored in batch mode", accelerator)
            }
            Some(_) => {}
            None => log::warn!("{} is not bound to anything", accelerator),
        },
    }
}

fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_create(&args.config).unwrap_or_else(|err| {
        log::warn!("Using default key bindings: {}", err);
        Config::default()
    });

    let mut editor = Editor::new();
    if let Some(input) = &args.input {
        editor.load(input)?;
    } else if let Some((width, height)) = args.size {
        editor.new_image_with(width, height, TRANSPARENT)?;
    }

    for op in &args.ops {
        apply(&mut editor, &config, op);
    }

    editor.save(&args.output)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_operations() {
        assert_eq!("undo".parse::<Op>().unwrap(), Op::Undo);
        assert_eq!("blur".parse::<Op>().unwrap(), Op::Edit(Command::Blur));
        assert_eq!(
            "hue=#00ff00".parse::<Op>().unwrap(),
            Op::Edit(Command::RemapHue(Color::GREEN))
        );
        assert_eq!(
            "paint=8,8,1,#ff0000".parse::<Op>().unwrap(),
            Op::Stroke {
                tool: ToolKind::Brush,
                x: 8,
                y: 8,
                size: Some(1),
                color: Some(Color::RED),
            }
        );
        assert_eq!(
            "pick=-1,3".parse::<Op>().unwrap(),
            Op::Stroke {
                tool: ToolKind::Picker,
                x: -1,
                y: 3,
                size: None,
                color: None,
            }
        );
        assert_eq!(
            "erase=1,2,6".parse::<Op>().unwrap(),
            Op::Stroke {
                tool: ToolKind::Eraser,
                x: 1,
                y: 2,
                size: Some(6),
                color: None,
            }
        );
        assert_eq!(
            "key=Ctrl+Z".parse::<Op>().unwrap(),
            Op::Key(Accelerator::new("z").ctrl())
        );
    }

    #[test]
    fn rejects_malformed_operations() {
        assert!("paint=1".parse::<Op>().is_err());
        assert!("erase=1,2,3,#fff".parse::<Op>().is_err());
        assert!("pick=a,b".parse::<Op>().is_err());
        assert!("smudge".parse::<Op>().is_err());
    }

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("32x16"), Ok((32, 16)));
        assert_eq!(parse_size("8X8"), Ok((8, 8)));
        assert!(parse_size("32").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
