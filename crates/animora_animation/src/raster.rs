//! Debug grid overlay

use animora_core::{Host, Overlay};

/// Id of the grid overlay inserted by [`toggle_raster`]
pub const RASTER_ID: &str = "volt-grid";

/// Grid cell size used when none is given
pub const DEFAULT_RASTER_SIZE: u32 = 50;

const GRID_LINES: &str = "linear-gradient(to right, rgba(0,0,0,.15) 1px, transparent 1px), \
                          linear-gradient(to bottom, rgba(0,0,0,.15) 1px, transparent 1px)";

/// Build the overlay for a grid of `size` pixel cells
pub fn raster_overlay(size: u32) -> Overlay {
    Overlay::new(RASTER_ID)
        .with_style("position", "fixed")
        .with_style("inset", "0")
        .with_style("pointer-events", "none")
        .with_style("z-index", "9999")
        .with_style("background-image", GRID_LINES)
        .with_style("background-size", format!("{size}px {size}px"))
}

/// Remove the grid if shown, otherwise insert it.
///
/// Returns true if the grid is visible afterwards. When hiding, `size` is
/// ignored.
pub fn toggle_raster(host: &mut dyn Host, size: Option<u32>) -> bool {
    if host.has_overlay(RASTER_ID) {
        host.remove_overlay(RASTER_ID);
        tracing::debug!("raster hidden");
        return false;
    }
    let size = size.unwrap_or(DEFAULT_RASTER_SIZE);
    host.insert_overlay(raster_overlay(size));
    tracing::debug!("raster shown ({size}px)");
    true
}
