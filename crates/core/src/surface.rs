//! The 2D drawing surface seam.
//!
//! [`Surface`] mirrors the handful of immediate-mode calls a confetti frame
//! needs from a canvas: clear, push/pop transform state, translate, rotate,
//! and fill an axis-aligned rectangle in the current transform. The browser
//! host forwards these to `CanvasRenderingContext2d`; the raster crate
//! implements them in software.
//!
//! [`RecordingSurface`] keeps the calls as data, for tests and traces.

use serde::Serialize;

use crate::color::Srgb;

/// A 2D surface with a save/restore transform stack.
pub trait Surface {
    /// Current drawable size in pixels `(width, height)`.
    fn size(&self) -> (f64, f64);

    /// Resets every pixel to fully transparent.
    fn clear(&mut self);

    /// Pushes the current transform.
    fn save(&mut self);

    /// Pops the most recently saved transform. Unbalanced calls are ignored.
    fn restore(&mut self);

    fn translate(&mut self, x: f64, y: f64);

    /// Rotates subsequent drawing by `angle` radians (clockwise on screen).
    fn rotate(&mut self, angle: f64);

    /// Fills a rectangle given in the current transform's coordinates.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Srgb);
}

/// Runs `draw` between a `save()` and a matching `restore()`.
///
/// Every transform applied inside `draw` is undone before this returns, so
/// consecutive scoped draws never see each other's translation or rotation.
pub fn scoped<S: Surface + ?Sized, R>(surface: &mut S, draw: impl FnOnce(&mut S) -> R) -> R {
    surface.save();
    let out = draw(surface);
    surface.restore();
    out
}

/// A single recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { angle: f64 },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Srgb,
    },
}

/// A surface that records calls instead of drawing them.
///
/// Tracks save/restore depth so callers can assert transforms are balanced.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            depth: 0,
            max_depth: 0,
        }
    }

    /// All calls since creation or the last [`take_commands`](Self::take_commands).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded calls.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current save depth; zero when every save has been restored.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Deepest save nesting seen so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of `fill_rect` calls recorded.
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn rotate(&mut self, angle: f64) {
        self.commands.push(DrawCommand::Rotate { angle });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Srgb) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }
}
