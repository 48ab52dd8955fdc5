//! Shape generation for HUD and hazard primitives

use glam::Vec2;

use crate::consts::{MAX_JUMP_STRENGTH, SPIKE_COUNT};
use crate::sim::geom::Rect;
use crate::sim::state::{Spikes, Viewport};

/// Extra height of the dark band drawn behind the spikes
pub const SPIKE_BAND_OVERLAP: f32 = 10.0;

/// Evenly spaced triangles across the width, apex on the strip's top edge
pub fn spike_triangles(spikes: &Spikes, viewport: &Viewport) -> Vec<[Vec2; 3]> {
    let width = viewport.width / SPIKE_COUNT as f32;
    let base_y = spikes.top + spikes.height;
    (0..SPIKE_COUNT)
        .map(|i| {
            let left = i as f32 * width;
            [
                Vec2::new(left, base_y),
                Vec2::new(left + width, base_y),
                Vec2::new(left + width / 2.0, spikes.top),
            ]
        })
        .collect()
}

/// Dark band behind the spikes, clipped to the viewport
pub fn spike_band(spikes: &Spikes, viewport: &Viewport) -> Rect {
    let top = (spikes.top - SPIKE_BAND_OVERLAP).max(0.0);
    Rect::new(0.0, top, viewport.width, viewport.height - top)
}

/// Charge meter in the bottom-right corner: (outline, fill)
pub fn charge_bar(jump_charge: f32, viewport: &Viewport) -> (Rect, Rect) {
    const BAR_WIDTH: f32 = 30.0;
    const MARGIN: f32 = 10.0;

    let max_height = viewport.height / 6.0;
    let fraction = (jump_charge / MAX_JUMP_STRENGTH).clamp(0.0, 1.0);
    let fill_height = max_height * fraction;
    let x = viewport.width - BAR_WIDTH - MARGIN;
    let y = viewport.height - MARGIN - max_height;

    (
        Rect::new(x, y, BAR_WIDTH, max_height),
        Rect::new(x, y + max_height - fill_height, BAR_WIDTH, fill_height),
    )
}
