use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use pagedeck_core::Orientation;

/// One pagination marker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMarker {
    pub active: bool,
    /// Identifier of the panel shown next to the active marker
    pub label: String,
}

/// Pagination markers for a deck, one per panel.
///
/// Exactly one marker is active. Marker positions are arranged against the
/// deck viewport before drawing and reused for click hit-testing. When the
/// area cannot hold every marker, a window of markers around the active one
/// is arranged.
#[derive(Debug, Clone)]
pub struct Pagination {
    orientation: Orientation,
    markers: Vec<PageMarker>,
    areas: Vec<Rect>,
    /// Index of the marker placed in `areas[0]`
    first: usize,
}

impl Pagination {
    /// Markers for `count` panels with `active` marked and no label yet
    pub fn new(count: usize, active: usize, orientation: Orientation) -> Self {
        let markers = (0..count)
            .map(|i| PageMarker {
                active: i == active,
                label: String::new(),
            })
            .collect();
        Self {
            orientation,
            markers,
            areas: Vec::new(),
            first: 0,
        }
    }

    pub fn markers(&self) -> &[PageMarker] {
        &self.markers
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn active_index(&self) -> Option<usize> {
        self.markers.iter().position(|m| m.active)
    }

    /// Make `index` the only active marker and give it `label`
    pub fn activate(&mut self, index: usize, label: &str) {
        for (i, marker) in self.markers.iter_mut().enumerate() {
            marker.active = i == index;
            marker.label.clear();
            if marker.active {
                marker.label.push_str(label);
            }
        }
    }

    /// Compute marker cells inside `area`: a column along the right edge
    /// for vertical decks, a row along the bottom for horizontal ones
    pub fn arrange(&mut self, area: Rect, glyph: &str) {
        let count = self.markers.len();
        let glyph_width = u16::try_from(glyph.width()).unwrap_or(u16::MAX).max(1);
        self.areas.clear();
        self.first = 0;

        if count == 0 || area.width < glyph_width.saturating_add(2) || area.height < 3 {
            return;
        }

        match self.orientation {
            Orientation::Vertical => {
                let shown = count.min(usize::from(area.height));
                let gap: u16 = if shown.saturating_mul(2) <= usize::from(area.height) { 2 } else { 1 };
                // shown <= area.height, so these fit in u16
                let span = (shown as u16 - 1) * gap + 1;
                let x = area.right().saturating_sub(glyph_width + 2);
                let y0 = area.y + area.height.saturating_sub(span) / 2;
                self.first = self.window_start(shown);
                for i in 0..shown as u16 {
                    self.areas.push(Rect::new(x, y0 + i * gap, glyph_width, 1));
                }
            }
            Orientation::Horizontal => {
                let step = u32::from(glyph_width) + 1;
                let capacity = ((u32::from(area.width) + 1) / step) as usize;
                let shown = count.min(capacity);
                if shown == 0 {
                    return;
                }
                let span = shown as u32 * step - 1;
                let y = area.bottom().saturating_sub(2);
                let x0 = u32::from(area.x) + u32::from(area.width).saturating_sub(span) / 2;
                self.first = self.window_start(shown);
                for i in 0..shown as u32 {
                    let x = (x0 + i * step) as u16;
                    self.areas.push(Rect::new(x, y, glyph_width, 1));
                }
            }
        }
    }

    /// First marker of a `shown`-wide window that keeps the active marker in view
    fn window_start(&self, shown: usize) -> usize {
        let active = self.active_index().unwrap_or(0);
        active
            .saturating_sub(shown / 2)
            .min(self.markers.len() - shown)
    }

    /// Arranged markers paired with their cells, in panel order
    pub fn arranged(&self) -> impl Iterator<Item = (usize, &PageMarker, Rect)> + '_ {
        self.areas
            .iter()
            .enumerate()
            .map(move |(i, area)| (self.first + i, &self.markers[self.first + i], *area))
    }

    /// Arranged marker cells, in panel order starting at the first shown marker
    pub fn areas(&self) -> &[Rect] {
        &self.areas
    }

    /// Index of the marker under the given terminal cell
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        self.areas
            .iter()
            .position(|area| {
                column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
            })
            .map(|slot| self.first + slot)
    }
}
