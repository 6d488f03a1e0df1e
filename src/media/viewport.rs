//! Viewport dimensions and terminal conversions.
//!
//! Media queries are evaluated against a [`Viewport`] measured in CSS pixels.
//! Terminal hosts measure in cells; [`TerminalMetrics`] converts between the
//! two so the standard pixel breakpoints stay meaningful.

use std::io;

/// Page orientation, derived from the viewport aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Height is greater than or equal to width.
    Portrait,
    /// Width is greater than height.
    Landscape,
}

/// The visible area media queries are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given pixel size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Orientation per the CSS definition (square counts as portrait).
    pub fn orientation(&self) -> Orientation {
        if self.height >= self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Current terminal size, converted with `metrics`.
    pub fn from_terminal(metrics: TerminalMetrics) -> io::Result<Self> {
        let (columns, rows) = crossterm::terminal::size()?;
        Ok(metrics.viewport(columns, rows))
    }

    /// Viewport carried by a terminal resize event, if `event` is one.
    pub fn from_event(event: &crossterm::event::Event, metrics: TerminalMetrics) -> Option<Self> {
        match event {
            crossterm::event::Event::Resize(columns, rows) => Some(metrics.viewport(*columns, *rows)),
            _ => None,
        }
    }
}

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalMetrics {
    /// Cell width in pixels.
    pub cell_width: u16,
    /// Cell height in pixels.
    pub cell_height: u16,
}

impl Default for TerminalMetrics {
    fn default() -> Self {
        Self {
            cell_width: 8,
            cell_height: 16,
        }
    }
}

impl TerminalMetrics {
    /// Create metrics with the default 8x16 cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell size (builder).
    pub fn with_cell_size(mut self, width: u16, height: u16) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Convert a terminal size in cells to a pixel viewport.
    pub fn viewport(&self, columns: u16, rows: u16) -> Viewport {
        Viewport::new(
            f32::from(columns) * f32::from(self.cell_width),
            f32::from(rows) * f32::from(self.cell_height),
        )
    }
}
