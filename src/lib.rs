#![warn(clippy::all, rust_2018_idioms)]

pub mod canvas;
pub mod color;
pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod file_handler;
pub mod tool;

pub use canvas::Canvas;
pub use color::Color;
pub use command::{Command, History};
pub use config::{Accelerator, Action, Config, KeyBindings};
pub use editor::Editor;
pub use error::{CanvasError, CanvasResult, ParseError};
pub use file_handler::SaveFormat;
pub use tool::{StrokeOutcome, ToolKind, ToolState};
