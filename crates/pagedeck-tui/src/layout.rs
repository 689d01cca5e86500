use pagedeck_core::{Orientation, PanelLayout, PanelOffset};
use ratatui::layout::Rect;

/// Panel geometry for a deck laid out as one strip of viewport-sized panels.
///
/// Vertical decks stack panels top to bottom, horizontal decks place them
/// side by side. Offsets are in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckLayout {
    orientation: Orientation,
    count: usize,
    viewport: Rect,
}

impl DeckLayout {
    pub fn new(orientation: Orientation, count: usize) -> Self {
        Self {
            orientation,
            count,
            viewport: Rect::default(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Returns true when the size changed
    pub fn set_viewport(&mut self, area: Rect) -> bool {
        let resized = area.width != self.viewport.width || area.height != self.viewport.height;
        self.viewport = area;
        resized
    }

    pub fn is_measured(&self) -> bool {
        self.viewport.width > 0 && self.viewport.height > 0
    }

    /// Offset of the panel along the scroll axis
    pub fn axis_offset(&self, index: usize) -> Option<u32> {
        self.offset_of(index).map(|o| o.along(self.orientation))
    }

    /// Distance between where the panel sits and where the viewport points
    pub fn measured_offset_delta(&self, index: usize, viewport_offset: u32) -> Option<i64> {
        self.axis_offset(index)
            .map(|offset| i64::from(offset) - i64::from(viewport_offset))
    }
}

impl PanelLayout for DeckLayout {
    fn offset_of(&self, index: usize) -> Option<PanelOffset> {
        if index >= self.count {
            return None;
        }
        // Offsets past u32::MAX are not representable; the strip saturates there
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        Some(match self.orientation {
            Orientation::Vertical => PanelOffset {
                top: index.saturating_mul(u32::from(self.viewport.height)),
                left: 0,
            },
            Orientation::Horizontal => PanelOffset {
                top: 0,
                left: index.saturating_mul(u32::from(self.viewport.width)),
            },
        })
    }

    fn viewport_length(&self) -> u32 {
        match self.orientation {
            Orientation::Vertical => u32::from(self.viewport.height),
            Orientation::Horizontal => u32::from(self.viewport.width),
        }
    }
}
