//! Pixel buffer geometry
//!
//! A strip is split into three regions:
//!
//! ```text
//! | skip | symmetrical (panels x panel_len) | non-symmetrical |
//!        |<------------- active ------------------------->|
//! ```
//!
//! Skipped cells are never touched by patterns. Per-panel patterns render
//! the first panel and copy it over the others.

use core::fmt;

use crate::color::{BLACK, Rgb};

/// Reasons a pixel layout can be rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// More skipped cells than physical cells
    SkipExceedsPhysical,
    /// More non-symmetrical cells than active cells
    ExcludedExceedsActive,
    /// `panels * panel_len` does not cover the symmetrical region exactly
    PanelMismatch,
    /// Layout needs more cells than the buffer can hold
    ExceedsCapacity,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkipExceedsPhysical => f.write_str("skip count exceeds physical cell count"),
            Self::ExcludedExceedsActive => {
                f.write_str("non-symmetrical count exceeds active cell count")
            }
            Self::PanelMismatch => {
                f.write_str("panels do not cover the symmetrical region exactly")
            }
            Self::ExceedsCapacity => f.write_str("layout exceeds buffer capacity"),
        }
    }
}

/// Geometry and intensity settings of one pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    physical: u16,
    skip: u16,
    non_symmetrical: u16,
    panels: u8,
    panel_len: u16,
    /// Dimmer for foreground colors (0-255 = 0.0-1.0)
    pub foreground_scale: u8,
    /// Dimmer for background colors (0-255 = 0.0-1.0)
    pub background_scale: u8,
}

impl PixelLayout {
    /// Create a validated layout
    pub const fn new(
        physical: u16,
        skip: u16,
        non_symmetrical: u16,
        panels: u8,
        panel_len: u16,
    ) -> Result<Self, LayoutError> {
        if skip > physical {
            return Err(LayoutError::SkipExceedsPhysical);
        }
        let active = physical - skip;
        if non_symmetrical > active {
            return Err(LayoutError::ExcludedExceedsActive);
        }
        let symmetrical = active - non_symmetrical;
        if panel_len > symmetrical
            || panels as u32 * panel_len as u32 != symmetrical as u32
        {
            return Err(LayoutError::PanelMismatch);
        }

        Ok(Self {
            physical,
            skip,
            non_symmetrical,
            panels,
            panel_len,
            foreground_scale: 255,
            background_scale: 255,
        })
    }

    /// Unpanelled strip where every cell is active and symmetrical
    pub const fn strip(len: u16) -> Self {
        Self {
            physical: len,
            skip: 0,
            non_symmetrical: 0,
            panels: 1,
            panel_len: len,
            foreground_scale: 255,
            background_scale: 255,
        }
    }

    /// Set the foreground and background intensity factors
    #[must_use]
    pub const fn with_intensity(mut self, foreground: u8, background: u8) -> Self {
        self.foreground_scale = foreground;
        self.background_scale = background;
        self
    }

    /// Number of physical cells, including skipped ones
    pub const fn physical(&self) -> usize {
        self.physical as usize
    }

    /// Number of leading cells that patterns never write
    pub const fn skip(&self) -> usize {
        self.skip as usize
    }

    /// Number of cells patterns may write
    pub const fn active(&self) -> usize {
        (self.physical - self.skip) as usize
    }

    /// Number of active cells that belong to panels
    pub const fn symmetrical(&self) -> usize {
        self.active() - self.non_symmetrical as usize
    }

    /// Number of trailing active cells outside the panels
    pub const fn non_symmetrical(&self) -> usize {
        self.non_symmetrical as usize
    }

    /// Number of identical panels
    pub const fn panels(&self) -> usize {
        self.panels as usize
    }

    /// Number of cells per panel
    pub const fn panel_len(&self) -> usize {
        self.panel_len as usize
    }
}

/// Pixel buffer owned by one pipeline
///
/// `N` is the buffer capacity, the layout may use fewer cells.
#[derive(Debug, Clone)]
pub struct PixelSet<const N: usize> {
    layout: PixelLayout,
    cells: [Rgb; N],
}

impl<const N: usize> PixelSet<N> {
    /// Create a blank pixel set for `layout`
    pub const fn new(layout: PixelLayout) -> Result<Self, LayoutError> {
        if layout.physical() > N {
            return Err(LayoutError::ExceedsCapacity);
        }
        Ok(Self {
            layout,
            cells: [BLACK; N],
        })
    }

    pub const fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// All physical cells, including the skip region
    pub fn physical(&self) -> &[Rgb] {
        &self.cells[..self.layout.physical()]
    }

    /// Cells patterns may write, starting after the skip region
    pub fn active(&self) -> &[Rgb] {
        &self.cells[self.layout.skip()..self.layout.physical()]
    }

    /// Mutable view of the active cells
    pub fn active_mut(&mut self) -> &mut [Rgb] {
        &mut self.cells[self.layout.skip()..self.layout.physical()]
    }

    /// Turn off every physical cell, including skipped and excluded ones
    pub fn blank(&mut self) {
        self.cells[..self.layout.physical()].fill(BLACK);
    }
}

/// Copy the first panel of `active` over every other panel
pub fn replicate_panels(active: &mut [Rgb], layout: &PixelLayout) {
    let panel_len = layout.panel_len();
    if layout.panels() <= 1 || panel_len == 0 {
        return;
    }

    let (first, rest) = active[..layout.symmetrical()].split_at_mut(panel_len);
    for panel in rest.chunks_exact_mut(panel_len) {
        panel.copy_from_slice(first);
    }
}
