//! The map root transform: uniform zoom about a screen pivot plus a screen-space pan.
//!
//! Logical map space maps to the screen as `screen = pan_offset + logical * zoom`,
//! which is the same as scaling the map root about its origin and translating it.

use eframe::egui::{Pos2, Vec2};

/// Unity-style smoothstep between `from` and `to`, with `t` clamped to [0, 1].
pub fn smooth_step(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t = t * t * (3.0 - 2.0 * t);
    from * (1.0 - t) + to * t
}

/// Zoom and pan of the map root for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    pub previous_zoom: f32,
    pub current_zoom: f32,
    pub target_zoom: f32,
    /// Screen point held fixed while the current zoom settles
    pub zoom_pivot: Pos2,
    /// Screen position of the logical origin
    pub pan_offset: Vec2,
    /// Progress of the current zoom, 1.0 once settled
    pub zoom_elapsed: f32,
}

impl TransformState {
    pub fn new(zoom: f32) -> Self {
        Self {
            previous_zoom: zoom,
            current_zoom: zoom,
            target_zoom: zoom,
            zoom_pivot: Pos2::ZERO,
            pan_offset: Vec2::ZERO,
            zoom_elapsed: 1.0,
        }
    }

    pub fn to_screen(&self, logical: Vec2) -> Pos2 {
        (self.pan_offset + logical * self.current_zoom).to_pos2()
    }

    pub fn to_logical(&self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.pan_offset) / self.current_zoom
    }

    pub fn is_zooming(&self) -> bool {
        self.zoom_elapsed < 1.0
    }

    /// Restarts the zoom from the displayed value towards an already clamped target.
    pub fn begin_zoom(&mut self, target: f32, pivot: Pos2) {
        self.zoom_pivot = pivot;
        self.previous_zoom = self.current_zoom;
        self.target_zoom = target;
        self.zoom_elapsed = 0.0;
    }

    /// Advances the interpolation by `dt` seconds and rescales the pan about the pivot.
    ///
    /// A `duration` of zero settles the zoom immediately.
    pub fn advance(&mut self, dt: f32, duration: f32) {
        if duration > 0.0 {
            if self.zoom_elapsed < 1.0 {
                self.zoom_elapsed = (self.zoom_elapsed + dt / duration).min(1.0);
            }
        } else {
            self.zoom_elapsed = 1.0;
        }

        let zoom = smooth_step(self.previous_zoom, self.target_zoom, self.zoom_elapsed);
        self.apply_zoom(zoom);
    }

    fn apply_zoom(&mut self, zoom: f32) {
        if zoom == self.current_zoom {
            return;
        }
        let ratio = zoom / self.current_zoom;
        let pivot = self.zoom_pivot.to_vec2();
        self.pan_offset = pivot + (self.pan_offset - pivot) * ratio;
        self.current_zoom = zoom;
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(1.0)
    }
}
