use image::RgbaImage;

/// Maximum number of snapshots kept on the undo side
pub const MAX_HISTORY: usize = 50;

/// Linear undo/redo over full canvas snapshots.
///
/// The last entry of the undo stack always mirrors the live canvas after a
/// completed edit. The first entry is the floor: undo never removes it.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Snapshots, oldest first
    undo_stack: Vec<RgbaImage>,
    /// Undone snapshots, most recently undone last
    redo_stack: Vec<RgbaImage>,
}

impl History {
    /// Creates an empty history. Call [`History::reset`] to seed it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history seeded with `initial` as its floor
    pub fn with_initial(initial: &RgbaImage) -> Self {
        let mut history = Self::new();
        history.reset(initial);
        history
    }

    /// Drop everything and seed the history with one snapshot
    pub fn reset(&mut self, initial: &RgbaImage) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push(initial.clone());
    }

    /// Record the current canvas.
    ///
    /// The redo stack is cleared even when the snapshot matches the latest
    /// entry and nothing is stored. Returns whether a snapshot was added.
    pub fn snapshot(&mut self, image: &RgbaImage) -> bool {
        self.redo_stack.clear();

        if self.undo_stack.last().is_some_and(|top| same_content(top, image)) {
            log::debug!("Snapshot unchanged, history stays at {}", self.undo_stack.len());
            return false;
        }

        self.undo_stack.push(image.clone());
        while self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
        true
    }

    /// Step back one snapshot, returning the state to restore
    pub fn undo(&mut self) -> Option<RgbaImage> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let undone = self.undo_stack.pop()?;
        self.redo_stack.push(undone);
        self.undo_stack.last().cloned()
    }

    /// Re-apply the most recently undone snapshot, returning the state to restore
    pub fn redo(&mut self) -> Option<RgbaImage> {
        let redone = self.redo_stack.pop()?;
        let restored = redone.clone();
        self.undo_stack.push(redone);
        Some(restored)
    }

    /// Number of snapshots on the undo side, floor included
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Only true before the history has been seeded
    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Number of snapshots that can be redone
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Returns true if there is a snapshot above the floor
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The most recent snapshot
    pub fn current(&self) -> Option<&RgbaImage> {
        self.undo_stack.last()
    }
}

fn same_content(a: &RgbaImage, b: &RgbaImage) -> bool {
    a.dimensions() == b.dimensions() && a.as_raw() == b.as_raw()
}
