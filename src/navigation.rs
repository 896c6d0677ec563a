//! Pointer-driven pan and zoom of the map root.

use crate::settings::NavigationSettings;
use crate::transform::TransformState;
use eframe::egui::{Pos2, Rect, Vec2};

/// Fraction of the current target zoom added per scroll unit.
pub const SCROLL_ZOOM_STEP: f32 = 0.5;

/// Input sampled for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position, `None` when the pointer is outside the map
    pub pointer: Option<Pos2>,
    /// Pointer movement while dragging the map
    pub drag_delta: Vec2,
    /// Vertical scroll in wheel notches, positive zooms in
    pub scroll_delta: f32,
    /// Primary click released over the map this frame
    pub clicked: bool,
}

/// Turns pointer input into changes of a [`TransformState`].
#[derive(Debug, Clone)]
pub struct Navigator {
    settings: NavigationSettings,
    pointer: Option<Pos2>,
    viewport: Option<Rect>,
    /// Native size of the active background, used by the boundary clamp
    content_size: Option<Vec2>,
}

impl Navigator {
    pub fn new(settings: NavigationSettings) -> Self {
        Self {
            settings,
            pointer: None,
            viewport: None,
            content_size: None,
        }
    }

    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    /// The zoom a fresh session starts with.
    pub fn initial_zoom(&self) -> f32 {
        self.settings.clamp_zoom(1.0)
    }

    /// Records the screen rectangle the map is drawn into.
    ///
    /// The first viewport a session sees centres the logical origin in it.
    pub fn set_viewport(&mut self, transform: &mut TransformState, viewport: Rect) {
        if self.viewport.is_none() {
            transform.pan_offset = viewport.center().to_vec2();
        }
        self.viewport = Some(viewport);
    }

    pub fn set_content_size(&mut self, size: Option<Vec2>) {
        self.content_size = size;
    }

    pub fn set_pointer(&mut self, pointer: Option<Pos2>) {
        self.pointer = pointer;
    }

    /// Where zooms are anchored: the live pointer, else the viewport centre.
    fn pivot(&self) -> Pos2 {
        self.pointer
            .or_else(|| self.viewport.map(|viewport| viewport.center()))
            .unwrap_or(Pos2::ZERO)
    }

    /// Starts a zoom towards `target` anchored on the live pointer.
    pub fn set_zoom(&self, transform: &mut TransformState, target: f32) {
        self.set_zoom_at(transform, target, self.pivot());
    }

    /// Starts a zoom towards `target` anchored on an explicit screen point.
    pub fn set_zoom_at(&self, transform: &mut TransformState, target: f32, pivot: Pos2) {
        let target = self.settings.clamp_zoom(target);
        log::debug!(
            "Zoom {:.2} -> {:.2} about ({:.1}, {:.1})",
            transform.current_zoom,
            target,
            pivot.x,
            pivot.y
        );
        transform.begin_zoom(target, pivot);
        if self.settings.zoom_duration <= 0.0 {
            transform.advance(0.0, 0.0);
            self.clamp_to_boundaries(transform);
        }
    }

    pub fn on_scroll(&self, transform: &mut TransformState, delta_y: f32) {
        if !self.settings.allow_zoom || delta_y == 0.0 {
            return;
        }
        let target = transform.target_zoom;
        self.set_zoom(transform, target + target * SCROLL_ZOOM_STEP * delta_y);
    }

    pub fn on_drag(&self, transform: &mut TransformState, delta: Vec2) {
        if !self.settings.allow_drag || delta == Vec2::ZERO {
            return;
        }
        transform.pan_offset += delta;
        self.clamp_to_boundaries(transform);
    }

    /// Advances any in-flight zoom.
    pub fn tick(&self, transform: &mut TransformState, dt: f32) {
        let was_zooming = transform.is_zooming();
        transform.advance(dt, self.settings.zoom_duration);
        if was_zooming {
            self.clamp_to_boundaries(transform);
        }
    }

    /// Samples one frame of input. Zoom input is taken before the interpolation step.
    pub fn update(&mut self, transform: &mut TransformState, input: &FrameInput, dt: f32) {
        self.set_pointer(input.pointer);
        self.on_scroll(transform, input.scroll_delta);
        self.on_drag(transform, input.drag_delta);
        self.tick(transform, dt);
    }

    /// Returns to the starting zoom with the logical origin at the viewport centre.
    pub fn reset(&self, transform: &mut TransformState) {
        *transform = TransformState::new(self.initial_zoom());
        if let Some(viewport) = self.viewport {
            transform.pan_offset = viewport.center().to_vec2();
        }
    }

    /// Pulls the pan back inside the boundary policy, if boundaries are enabled.
    pub fn clamp_to_boundaries(&self, transform: &mut TransformState) {
        if !self.settings.enable_boundaries {
            return;
        }
        let (Some(viewport), Some(size)) = (self.viewport, self.content_size) else {
            return;
        };
        let half = size * transform.current_zoom * 0.5;
        transform.pan_offset.x = clamp_axis(
            transform.pan_offset.x,
            half.x,
            viewport.min.x,
            viewport.max.x,
        );
        transform.pan_offset.y = clamp_axis(
            transform.pan_offset.y,
            half.y,
            viewport.min.y,
            viewport.max.y,
        );
    }
}

/// Clamps the centre of a span of half-length `half` against `[min, max]`.
///
/// A span wider than the viewport has to cover it, a narrower one has to fit inside.
fn clamp_axis(center: f32, half: f32, min: f32, max: f32) -> f32 {
    let (low, high) = if 2.0 * half >= max - min {
        (max - half, min + half)
    } else {
        (min + half, max - half)
    };
    // Rounding can cross the bounds when the span matches the viewport exactly
    if low <= high {
        center.clamp(low, high)
    } else {
        (low + high) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn free_settings(zoom_duration: f32) -> NavigationSettings {
        NavigationSettings {
            enable_boundaries: false,
            zoom_duration,
            ..Default::default()
        }
    }

    fn assert_close(actual: f32, expected: f32) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-2, "expected {expected}, got {actual} (diff: {diff})");
    }

    #[test]
    fn scroll_zoom_is_proportional_to_target() {
        let navigator = Navigator::new(free_settings(0.0));
        let mut transform = TransformState::new(2.0);
        navigator.on_scroll(&mut transform, 1.0);
        assert_eq!(transform.target_zoom, 3.0);
        navigator.on_scroll(&mut transform, 1.0);
        assert_eq!(transform.target_zoom, 4.5);
        navigator.on_scroll(&mut transform, -1.0);
        assert_eq!(transform.target_zoom, 2.25);
    }

    #[test]
    fn scroll_is_ignored_when_zoom_disabled() {
        let navigator = Navigator::new(NavigationSettings {
            allow_zoom: false,
            ..free_settings(0.0)
        });
        let mut transform = TransformState::new(1.0);
        navigator.on_scroll(&mut transform, 3.0);
        assert_eq!(transform, TransformState::new(1.0));
    }

    #[test]
    fn zoom_target_is_clamped() {
        let navigator = Navigator::new(free_settings(0.0));
        let mut transform = TransformState::new(1.0);
        navigator.set_zoom(&mut transform, 15.0);
        assert_eq!(transform.current_zoom, 10.0);
        navigator.set_zoom(&mut transform, 0.01);
        assert_eq!(transform.current_zoom, 1.0);
    }

    #[test]
    fn drag_pans_in_screen_pixels() {
        let navigator = Navigator::new(free_settings(0.0));
        let mut transform = TransformState::new(5.0);
        navigator.on_drag(&mut transform, vec2(12.0, -4.0));
        assert_eq!(transform.pan_offset, vec2(12.0, -4.0));
    }

    #[test]
    fn drag_is_ignored_when_disabled() {
        let navigator = Navigator::new(NavigationSettings {
            allow_drag: false,
            ..free_settings(0.0)
        });
        let mut transform = TransformState::new(1.0);
        navigator.on_drag(&mut transform, vec2(12.0, -4.0));
        assert_eq!(transform.pan_offset, Vec2::ZERO);
    }

    #[test]
    fn zoom_anchors_on_latest_pointer() {
        let mut navigator = Navigator::new(free_settings(1.0));
        let mut transform = TransformState::new(1.0);
        navigator.set_pointer(Some(pos2(10.0, 10.0)));
        navigator.on_scroll(&mut transform, 1.0);
        navigator.tick(&mut transform, 0.1);
        navigator.set_pointer(Some(pos2(80.0, 40.0)));
        navigator.on_scroll(&mut transform, 1.0);
        assert_eq!(transform.zoom_pivot, pos2(80.0, 40.0));
    }

    #[test]
    fn pointerless_zoom_anchors_on_viewport_centre() {
        let mut navigator = Navigator::new(free_settings(0.0));
        let mut transform = TransformState::new(1.0);
        navigator.set_viewport(
            &mut transform,
            Rect::from_min_size(Pos2::ZERO, vec2(200.0, 100.0)),
        );
        navigator.set_zoom(&mut transform, 2.0);
        assert_eq!(transform.zoom_pivot, pos2(100.0, 50.0));
        // Origin was centred, so it stays put
        assert_eq!(transform.pan_offset, vec2(100.0, 50.0));
    }

    #[test]
    fn first_viewport_centres_origin_only_once() {
        let mut navigator = Navigator::new(free_settings(0.0));
        let mut transform = TransformState::new(1.0);
        navigator.set_viewport(
            &mut transform,
            Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0)),
        );
        assert_eq!(transform.pan_offset, vec2(200.0, 150.0));
        navigator.on_drag(&mut transform, vec2(10.0, 0.0));
        navigator.set_viewport(
            &mut transform,
            Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0)),
        );
        assert_eq!(transform.pan_offset, vec2(210.0, 150.0));
    }

    #[test]
    fn boundaries_keep_large_background_covering_viewport() {
        let mut navigator = Navigator::new(NavigationSettings {
            enable_boundaries: true,
            zoom_duration: 0.0,
            ..Default::default()
        });
        let mut transform = TransformState::new(1.0);
        navigator.set_viewport(
            &mut transform,
            Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0)),
        );
        navigator.set_content_size(Some(vec2(800.0, 600.0)));

        navigator.on_drag(&mut transform, vec2(1000.0, -1000.0));
        // Left edge of the background stops at the viewport's left edge
        assert_eq!(transform.pan_offset.x, 400.0);
        // Bottom edge stops at the viewport's bottom edge
        assert_eq!(transform.pan_offset.y, 0.0);
    }

    fn bounded_navigator(zoom_duration: f32) -> (Navigator, TransformState) {
        let mut navigator = Navigator::new(NavigationSettings {
            enable_boundaries: true,
            zoom_duration,
            ..Default::default()
        });
        let mut transform = TransformState::new(3.0);
        navigator.set_viewport(
            &mut transform,
            Rect::from_min_size(Pos2::ZERO, vec2(400.0, 300.0)),
        );
        // Same size as the viewport, so at zoom 1 there is no slack at all
        navigator.set_content_size(Some(vec2(400.0, 300.0)));
        (navigator, transform)
    }

    fn assert_covers_viewport(transform: &TransformState) {
        let half = vec2(400.0, 300.0) * transform.current_zoom * 0.5;
        let pan = transform.pan_offset;
        assert!(pan.x - half.x <= 1e-3 && pan.x + half.x >= 400.0 - 1e-3, "{transform:?}");
        assert!(pan.y - half.y <= 1e-3 && pan.y + half.y >= 300.0 - 1e-3, "{transform:?}");
    }

    #[test]
    fn boundaries_hold_on_every_tick_of_an_edge_zoom_out() {
        let (navigator, mut transform) = bounded_navigator(0.5);
        navigator.set_zoom_at(&mut transform, 1.0, Pos2::ZERO);

        for _ in 0..20 {
            navigator.tick(&mut transform, 0.05);
            assert_covers_viewport(&transform);
        }
        assert_eq!(transform.current_zoom, 1.0);
        // Keeping the corner pivot fixed would leave the pan at a third of the centre
        assert_eq!(transform.pan_offset, vec2(200.0, 150.0));
    }

    #[test]
    fn instant_zoom_out_is_clamped_immediately() {
        let (navigator, mut transform) = bounded_navigator(0.0);
        navigator.set_zoom_at(&mut transform, 1.0, pos2(400.0, 300.0));
        assert_eq!(transform.current_zoom, 1.0);
        assert_eq!(transform.pan_offset, vec2(200.0, 150.0));
    }

    #[test]
    fn boundaries_keep_small_background_inside_viewport() {
        assert_eq!(clamp_axis(500.0, 50.0, 0.0, 400.0), 350.0);
        assert_eq!(clamp_axis(-20.0, 50.0, 0.0, 400.0), 50.0);
        assert_eq!(clamp_axis(200.0, 50.0, 0.0, 400.0), 200.0);
    }

    #[test]
    fn reset_restores_initial_view() {
        let mut navigator = Navigator::new(free_settings(0.0));
        let mut transform = TransformState::new(1.0);
        navigator.set_viewport(
            &mut transform,
            Rect::from_min_size(Pos2::ZERO, vec2(200.0, 200.0)),
        );
        navigator.on_drag(&mut transform, vec2(30.0, 30.0));
        navigator.set_zoom(&mut transform, 6.0);
        navigator.reset(&mut transform);
        assert_eq!(transform.current_zoom, 1.0);
        assert_eq!(transform.pan_offset, vec2(100.0, 100.0));
    }

    #[test]
    fn in_flight_zoom_keeps_animating_without_input() {
        let mut navigator = Navigator::new(free_settings(0.5));
        let mut transform = TransformState::new(1.0);
        navigator.update(
            &mut transform,
            &FrameInput {
                pointer: Some(pos2(0.0, 0.0)),
                scroll_delta: 2.0,
                ..Default::default()
            },
            0.1,
        );
        assert_close(transform.zoom_elapsed, 0.2);
        for _ in 0..6 {
            navigator.update(&mut transform, &FrameInput::default(), 0.1);
        }
        assert_eq!(transform.current_zoom, 2.0);
    }
}
