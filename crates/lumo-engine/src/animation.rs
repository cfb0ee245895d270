//! The per-frame contract every animation variant implements.

use crate::canvas::Canvas;

/// One self-contained simulation plus renderer.
///
/// Variants capture their speed multiplier and resolved color at
/// construction and keep an internal monotonic time accumulator advanced
/// by a fixed variant-specific increment times the speed each frame; no
/// wall-clock delta is integrated, so a late frame simply advances one
/// logical tick.
///
/// Constructed against a zero-size surface, a variant defers populating
/// its entity state until the first nonzero [`resize`](Animation::resize);
/// `update` and `render` are safe no-ops in that window.
pub trait Animation {
    /// Advance the simulation by one logical tick: advance time, move
    /// entities, spawn and recycle.
    fn update(&mut self);

    /// Draw the current state onto the (already cleared) surface.
    fn render(&self, canvas: &mut Canvas);

    /// React to a change in surface dimensions, regenerating any
    /// size-derived state.
    fn resize(&mut self, width: u32, height: u32);
}
