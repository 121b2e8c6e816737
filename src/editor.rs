//! The interactive-layer controller for the pixel editor.
//!
//! The `Editor` owns the live [`Canvas`], its [`History`], the current
//! [`ToolState`] and the "stroke in progress" flag. Front ends forward pointer
//! and menu events here; every completed stroke or command becomes exactly one
//! undoable step.
//!
//! # Strokes
//!
//! - `stroke_start`: begin a drag and stamp the current tool
//! - `stroke_move`: stamp again while the drag continues
//! - `stroke_end`: finish the drag and record one snapshot
//!
//! No snapshot is taken while a stroke is in progress.
//!
//! # Example
//!
//! ```rust,no_run
//! use pixeleon::{Color, Command, Editor};
//!
//! let mut editor = Editor::new();
//! editor.set_color(Color::RED);
//! editor.stroke_start(8, 8);
//! editor.stroke_end();
//! editor.execute(Command::FlipHorizontal);
//! editor.undo();
//! ```

use std::path::Path;

use image::Rgba;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::command::{Command, History};
use crate::config::{Accelerator, Action, KeyBindings};
use crate::error::CanvasResult;
use crate::file_handler::{self, SaveFormat};
use crate::tool::{StrokeOutcome, ToolKind, ToolState};

#[derive(Debug, Clone)]
pub struct Editor {
    canvas: Canvas,
    history: History,
    tool_state: ToolState,
    drawing: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Starts with a blank transparent canvas and a history holding it as the floor
    pub fn new() -> Self {
        Self::with_canvas(Canvas::default())
    }

    /// Starts from an existing canvas, which becomes the history floor
    pub fn with_canvas(canvas: Canvas) -> Self {
        let history = History::with_initial(canvas.image());
        Self {
            canvas,
            history,
            tool_state: ToolState::default(),
            drawing: false,
        }
    }

    /// The live canvas
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The undo/redo history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current tool, color and brush size
    pub fn tool_state(&self) -> &ToolState {
        &self.tool_state
    }

    /// Select the tool used by the next stroke
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool_state.tool = tool;
    }

    /// Set the draw color for the brush
    pub fn set_color(&mut self, color: Color) {
        self.tool_state.color = color;
    }

    /// Set the stamp size. Sizes below 1 are clamped to 1.
    pub fn set_brush_size(&mut self, size: u32) {
        self.tool_state.set_brush_size(size);
    }

    /// Returns true while a stroke is in progress
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Replace the canvas with a fresh transparent default-sized one
    pub fn new_image(&mut self) {
        self.replace_canvas(Canvas::default());
        log::info!("Started new {}x{} image", self.canvas.width(), self.canvas.height());
    }

    pub fn new_image_with(&mut self, width: u32, height: u32, background: Rgba<u8>) -> CanvasResult<()> {
        let canvas = Canvas::create(width, height, background)?;
        self.replace_canvas(canvas);
        log::info!("Started new {}x{} image", width, height);
        Ok(())
    }

    /// Open an image file. On failure the current canvas and history are untouched.
    pub fn load(&mut self, path: &Path) -> CanvasResult<()> {
        let image = file_handler::load_image(path)?;
        self.replace_canvas(Canvas::from_image(image)?);
        Ok(())
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> CanvasResult<()> {
        let canvas = Canvas::load_from(bytes)?;
        self.replace_canvas(canvas);
        Ok(())
    }

    /// Save to `path`, choosing the format from its extension
    pub fn save(&self, path: &Path) -> CanvasResult<SaveFormat> {
        file_handler::save_image(self.canvas.image(), path)
    }

    fn replace_canvas(&mut self, canvas: Canvas) {
        self.drawing = false;
        self.canvas = canvas;
        self.history.reset(self.canvas.image());
    }

    /// Begin a drag at `(x, y)` and apply the current tool there
    pub fn stroke_start(&mut self, x: i64, y: i64) -> Option<StrokeOutcome> {
        self.drawing = true;
        self.apply_tool(x, y)
    }

    /// Continue the drag. Ignored when no stroke is in progress.
    pub fn stroke_move(&mut self, x: i64, y: i64) -> Option<StrokeOutcome> {
        if !self.drawing {
            return None;
        }
        self.apply_tool(x, y)
    }

    /// Finish the drag and record it as one undoable step
    pub fn stroke_end(&mut self) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        if self.history.snapshot(self.canvas.image()) {
            log::debug!("Stroke committed, history at {}", self.history.len());
        }
    }

    fn apply_tool(&mut self, x: i64, y: i64) -> Option<StrokeOutcome> {
        match self.canvas.apply_tool(&self.tool_state, x, y) {
            Ok(StrokeOutcome::Picked(color)) => {
                log::debug!("Picked {} at ({}, {})", color, x, y);
                self.tool_state.color = color;
                Some(StrokeOutcome::Picked(color))
            }
            Ok(outcome) => Some(outcome),
            Err(err) => {
                log::debug!("Tool {} ignored: {}", self.tool_state.tool, err);
                None
            }
        }
    }

    /// Apply a whole-image command and record it as one undoable step
    pub fn execute(&mut self, command: Command) {
        self.stroke_end();
        command.execute(&mut self.canvas);
        self.history.snapshot(self.canvas.image());
        log::debug!("Executed {}, history at {}", command, self.history.len());
    }

    /// Returns false when there was nothing to undo
    pub fn undo(&mut self) -> bool {
        self.stroke_end();
        match self.history.undo() {
            Some(image) => {
                self.canvas.replace(image);
                true
            }
            None => false,
        }
    }

    /// Returns false when there was nothing to redo
    pub fn redo(&mut self) -> bool {
        self.stroke_end();
        match self.history.redo() {
            Some(image) => {
                self.canvas.replace(image);
                true
            }
            None => false,
        }
    }

    /// Dispatch a keyboard shortcut.
    ///
    /// Undo and redo run immediately. Load and save need a path from the
    /// caller's file dialog, so they are only returned.
    pub fn trigger(&mut self, accelerator: &Accelerator, bindings: &KeyBindings) -> Option<Action> {
        let action = bindings.action_for(accelerator)?;
        match action {
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::Load | Action::Save => {}
        }
        Some(action)
    }
}
