//! Background and location markers of the active map.
//!
//! Markers live in the same logical space as the background, so pan and zoom move
//! them for free: a marker's screen rectangle is always derived from the current
//! [`TransformState`] and never cached.

use crate::transform::TransformState;
use crate::{ImageHandle, Location, Map};
use eframe::egui::{Pos2, Rect, Vec2, vec2};

/// Identifies a marker of one particular map set.
///
/// Ids from a previous [`MapRenderer::set_map`] never resolve again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId {
    generation: u32,
    index: usize,
}

/// A placed location.
#[derive(Debug, Clone)]
pub struct Marker {
    pub id: MarkerId,
    /// Index of the location in the active map
    pub location_index: usize,
    /// Logical position of the marker centre
    pub position: Vec2,
    pub image: ImageHandle,
}

/// Pointer interaction with markers, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEvent {
    /// The pointer entered a marker
    Hovered(MarkerId),
    /// The pointer left the previously hovered marker
    Unhovered(MarkerId),
    Clicked(MarkerId),
}

/// Owns the active map and its markers.
pub struct MapRenderer {
    default_marker: ImageHandle,
    /// Unscaled marker edge length times the marker scale
    marker_extent: f32,
    map: Option<Map>,
    markers: Vec<Marker>,
    generation: u32,
    hovered: Option<MarkerId>,
    events: Vec<MarkerEvent>,
}

impl MapRenderer {
    pub fn new(default_marker: ImageHandle, marker_size: f32, marker_scale: f32) -> Self {
        Self {
            default_marker,
            marker_extent: marker_size * marker_scale,
            map: None,
            markers: Vec::new(),
            generation: 0,
            hovered: None,
            events: Vec::new(),
        }
    }

    pub fn map(&self) -> Option<&Map> {
        self.map.as_ref()
    }

    /// Background image and its native size.
    pub fn background(&self) -> Option<(&ImageHandle, Vec2)> {
        self.map
            .as_ref()
            .map(|map| (&map.background, vec2(map.size[0], map.size[1])))
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        if id.generation != self.generation {
            return None;
        }
        self.markers.get(id.index)
    }

    pub fn location(&self, id: MarkerId) -> Option<&Location> {
        let marker = self.marker(id)?;
        self.map.as_ref()?.locations.get(marker.location_index)
    }

    /// First marker placed for a location name.
    pub fn find_marker(&self, name: &str) -> Option<MarkerId> {
        let map = self.map.as_ref()?;
        self.markers
            .iter()
            .find(|marker| map.locations[marker.location_index].name == name)
            .map(|marker| marker.id)
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    /// Replaces the active map, destroying every marker of the previous one first.
    pub fn set_map(&mut self, map: Map) {
        self.clear();

        for name in map.duplicate_location_names() {
            log::warn!(
                "Map '{}' has several locations named '{}', lookups use the first one",
                map.name,
                name
            );
        }

        self.markers = map
            .locations
            .iter()
            .enumerate()
            .map(|(index, location)| {
                let position = location.position.unwrap_or_else(|| {
                    log::warn!(
                        "Location '{}' on map '{}' has no position, placing it at the origin",
                        location.name,
                        map.name
                    );
                    [0.0, 0.0]
                });
                Marker {
                    id: MarkerId {
                        generation: self.generation,
                        index,
                    },
                    location_index: index,
                    position: vec2(position[0], position[1]),
                    image: location
                        .custom_marker
                        .clone()
                        .unwrap_or_else(|| self.default_marker.clone()),
                }
            })
            .collect();

        log::info!(
            "Showing map '{}' with {} markers",
            map.name,
            self.markers.len()
        );
        self.map = Some(map);
    }

    fn clear(&mut self) {
        self.markers.clear();
        self.generation = self.generation.wrapping_add(1);
        self.hovered = None;
        // Events still queued refer to markers that no longer exist
        self.events.clear();
    }

    /// Screen rectangle of the background.
    pub fn background_rect(&self, transform: &TransformState) -> Option<Rect> {
        let (_, size) = self.background()?;
        Some(Rect::from_center_size(
            transform.to_screen(Vec2::ZERO),
            size * transform.current_zoom,
        ))
    }

    /// Screen rectangle of a marker; markers scale with the map root.
    pub fn marker_rect(&self, marker: &Marker, transform: &TransformState) -> Rect {
        Rect::from_center_size(
            transform.to_screen(marker.position),
            Vec2::splat(self.marker_extent * transform.current_zoom),
        )
    }

    pub fn marker_screen_position(&self, id: MarkerId, transform: &TransformState) -> Option<Pos2> {
        self.marker(id)
            .map(|marker| transform.to_screen(marker.position))
    }

    /// Top-most marker under the pointer. Later markers draw over earlier ones.
    pub fn hit_test(&self, pointer: Pos2, transform: &TransformState) -> Option<MarkerId> {
        self.markers
            .iter()
            .rev()
            .find(|marker| self.marker_rect(marker, transform).contains(pointer))
            .map(|marker| marker.id)
    }

    /// Re-evaluates the hovered marker and queues hover and click events.
    pub fn update_hover(&mut self, pointer: Option<Pos2>, clicked: bool, transform: &TransformState) {
        let hit = pointer.and_then(|pointer| self.hit_test(pointer, transform));

        if hit != self.hovered {
            if let Some(previous) = self.hovered {
                self.events.push(MarkerEvent::Unhovered(previous));
            }
            if let Some(current) = hit {
                self.events.push(MarkerEvent::Hovered(current));
            }
            self.hovered = hit;
        }

        if clicked && let Some(current) = hit {
            self.events.push(MarkerEvent::Clicked(current));
        }
    }

    /// Takes every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<MarkerEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn renderer() -> MapRenderer {
        MapRenderer::new(ImageHandle::new("default.png"), 100.0, 0.5)
    }

    fn two_location_map() -> Map {
        Map {
            name: "Continent".to_owned(),
            background: ImageHandle::new("continent.png"),
            size: [400.0, 300.0],
            locations: vec![
                Location::new("A", [0.0, 0.0]),
                Location {
                    custom_marker: Some(ImageHandle::new("imgX.png")),
                    ..Location::new("B", [5.0, 5.0])
                },
            ],
        }
    }

    #[test]
    fn one_marker_per_location_with_image_fallback() {
        let mut renderer = renderer();
        renderer.set_map(two_location_map());
        let markers = renderer.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].image, ImageHandle::new("default.png"));
        assert_eq!(markers[1].image, ImageHandle::new("imgX.png"));
        assert_eq!(markers[1].position, vec2(5.0, 5.0));
    }

    #[test]
    fn empty_map_has_background_but_no_markers() {
        let mut renderer = renderer();
        renderer.set_map(Map {
            locations: Vec::new(),
            ..two_location_map()
        });
        assert!(renderer.markers().is_empty());
        let (image, size) = renderer.background().expect("background");
        assert_eq!(image.path(), "continent.png");
        assert_eq!(size, vec2(400.0, 300.0));
    }

    #[test]
    fn swapping_maps_invalidates_old_ids() {
        let mut renderer = renderer();
        renderer.set_map(two_location_map());
        let old = renderer.markers()[0].id;
        renderer.set_map(two_location_map());
        assert!(renderer.marker(old).is_none());
        assert!(renderer.location(old).is_none());
        assert!(renderer.marker(renderer.markers()[0].id).is_some());
    }

    #[test]
    fn missing_position_is_placed_at_origin() {
        let mut renderer = renderer();
        let mut map = two_location_map();
        map.locations[1].position = None;
        renderer.set_map(map);
        assert_eq!(renderer.markers()[1].position, Vec2::ZERO);
    }

    #[test]
    fn duplicate_names_resolve_to_first_marker() {
        let mut renderer = renderer();
        let mut map = two_location_map();
        map.locations.push(Location::new("A", [50.0, 50.0]));
        assert_eq!(map.duplicate_location_names(), vec!["A"]);
        renderer.set_map(map);
        let id = renderer.find_marker("A").expect("marker");
        assert_eq!(renderer.marker(id).map(|m| m.location_index), Some(0));
    }

    #[test]
    fn marker_rect_follows_pan_and_zoom() {
        let mut renderer = renderer();
        renderer.set_map(two_location_map());
        let mut transform = TransformState::new(2.0);
        transform.pan_offset = vec2(100.0, 50.0);
        let rect = renderer.marker_rect(&renderer.markers()[1], &transform);
        assert_eq!(rect.center(), pos2(110.0, 60.0));
        assert_eq!(rect.width(), 100.0);
    }

    #[test]
    fn hover_and_click_events_are_queued_once() {
        let mut renderer = renderer();
        renderer.set_map(Map {
            locations: vec![Location::new("Far", [200.0, 0.0])],
            ..two_location_map()
        });
        let transform = TransformState::new(1.0);
        let id = renderer.markers()[0].id;

        renderer.update_hover(Some(pos2(201.0, 1.0)), false, &transform);
        renderer.update_hover(Some(pos2(202.0, 2.0)), true, &transform);
        renderer.update_hover(Some(pos2(0.0, 0.0)), false, &transform);

        assert_eq!(
            renderer.drain_events(),
            vec![
                MarkerEvent::Hovered(id),
                MarkerEvent::Clicked(id),
                MarkerEvent::Unhovered(id),
            ]
        );
        assert!(renderer.drain_events().is_empty());
    }

    #[test]
    fn top_most_marker_wins_hit_test() {
        let mut renderer = renderer();
        renderer.set_map(two_location_map());
        let transform = TransformState::new(1.0);
        // Both markers cover (2, 2); B is drawn last
        let hit = renderer.hit_test(pos2(2.0, 2.0), &transform);
        assert_eq!(hit, Some(renderer.markers()[1].id));
    }
}
