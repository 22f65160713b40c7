//! Responsive key geometry.
//!
//! Converts a container width and the active layout mode into one rectangle
//! per key. The key unit is always derived from the letters reference row so
//! that a digit in the numbers layout is exactly as wide as a letter in the
//! letters layout. Results are recomputed from scratch on every width or
//! mode change; nothing is carried over between calls.

use serde::{Deserialize, Serialize};

use crate::layout::{LayoutMode, LayoutTable, SpecialKey};

/// Axis-aligned rectangle, origin at the keyboard's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Fixed vertical metrics and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryParams {
    pub key_height: f32,
    pub row_spacing: f32,
    pub key_spacing: f32,
    pub top_padding: f32,
    pub bottom_padding: f32,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            key_height: 42.0,
            row_spacing: 10.0,
            key_spacing: 6.0,
            top_padding: 8.0,
            bottom_padding: 8.0,
        }
    }
}

/// Placement of one key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyGeometry {
    pub row: usize,
    pub column: usize,
    pub id: String,
    pub special: Option<SpecialKey>,
    pub rect: Rect,
}

/// Horizontal extent of one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowMetrics {
    /// Left edge of the first key
    pub start_x: f32,
    /// Sum of key widths plus inter-key spacing
    pub width: f32,
    /// Top edge of the row
    pub y: f32,
}

/// All key rectangles for one width and mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardGeometry {
    pub container_width: f32,
    pub mode: LayoutMode,
    /// Width of a single letter key
    pub unit_width: f32,
    /// Total keyboard height including padding
    pub height: f32,
    pub rows: Vec<RowMetrics>,
    pub keys: Vec<KeyGeometry>,
}

impl KeyboardGeometry {
    /// Keys in row `row`, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &KeyGeometry> {
        self.keys.iter().filter(move |key| key.row == row)
    }

    /// Key under the point, if any. Gaps between keys hit nothing.
    pub fn key_at(&self, x: f32, y: f32) -> Option<&KeyGeometry> {
        self.keys.iter().find(|key| key.rect.contains(x, y))
    }

    /// Find a key by identifier.
    pub fn key(&self, id: &str) -> Option<&KeyGeometry> {
        self.keys.iter().find(|key| key.id == id)
    }
}

/// Lay out `mode`'s rows of `table` inside a container `width` wide.
///
/// Key unit: `(width - (n - 1) * key_spacing) / n` where `n` is the length of
/// the letters reference row. Each key is `unit * weight` wide, rows are
/// centered, and a row whose natural width would overflow the container is
/// shrunk uniformly to fit. A non-positive width yields zero-width keys.
pub fn compute_geometry(
    width: f32,
    mode: LayoutMode,
    table: &LayoutTable,
    params: &GeometryParams,
) -> KeyboardGeometry {
    let reference = table.reference_row_len() as f32;
    let spacing = params.key_spacing;
    let unit_width = ((width - (reference - 1.0) * spacing) / reference).max(0.0);

    let rows = table.rows(mode);
    let mut keys = Vec::new();
    let mut metrics = Vec::with_capacity(rows.len());

    for (row_index, row) in rows.iter().enumerate() {
        let y = params.top_padding + row_index as f32 * (params.key_height + params.row_spacing);
        let gaps = row.len().saturating_sub(1) as f32 * spacing;
        let total_weight: f32 = row.iter().map(|key| key.layout_weight()).sum();

        let mut row_unit = unit_width;
        if width > 0.0 && total_weight > 0.0 && total_weight * unit_width + gaps > width {
            row_unit = ((width - gaps) / total_weight).max(0.0);
        }

        let row_width = total_weight * row_unit + gaps;
        let start_x = (width - row_width) / 2.0;

        let mut x = start_x;
        for (column, key) in row.iter().enumerate() {
            let key_width = row_unit * key.layout_weight();
            keys.push(KeyGeometry {
                row: row_index,
                column,
                id: key.id.clone(),
                special: key.special,
                rect: Rect::new(x, y, key_width, params.key_height),
            });
            x += key_width + spacing;
        }

        metrics.push(RowMetrics {
            start_x,
            width: row_width,
            y,
        });
    }

    let row_count = rows.len() as f32;
    let stacked = if rows.is_empty() {
        0.0
    } else {
        row_count * params.key_height + (row_count - 1.0) * params.row_spacing
    };
    let height = stacked + params.top_padding + params.bottom_padding;

    tracing::debug!(
        width,
        ?mode,
        unit_width,
        height,
        keys = keys.len(),
        "computed keyboard geometry"
    );

    KeyboardGeometry {
        container_width: width,
        mode,
        unit_width,
        height,
        rows: metrics,
        keys,
    }
}
