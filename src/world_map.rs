//! One navigation session over a set of maps.

use crate::info_panel::{InfoPanel, InfoPresenter};
use crate::markers::{MapRenderer, MarkerEvent, MarkerId};
use crate::navigation::{FrameInput, Navigator};
use crate::settings::{ConfigError, Settings};
use crate::transform::TransformState;
use crate::{Location, Map, World, WorldMaps};
use eframe::egui::{Pos2, Rect, Vec2};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("no map named '{0}'")]
    UnknownMap(String),
}

/// Ties navigation, markers and the info panel together and drives them per frame.
pub struct WorldMap {
    settings: Settings,
    maps: WorldMaps,
    transform: TransformState,
    navigator: Navigator,
    renderer: MapRenderer,
    presenter: InfoPresenter,
    ui_visible: bool,
}

impl WorldMap {
    /// Validates the settings and opens the starting map, if any.
    pub fn new(settings: Settings, maps: WorldMaps) -> Result<Self, ConfigError> {
        let default_marker = settings.validate(&maps)?.clone();
        let navigator = Navigator::new(settings.navigation.clone());

        let mut world_map = Self {
            transform: TransformState::new(navigator.initial_zoom()),
            navigator,
            renderer: MapRenderer::new(default_marker, settings.marker_size, settings.marker_scale),
            presenter: InfoPresenter::new(settings.location_info_is_popup),
            ui_visible: settings.open_on_start,
            settings,
            maps,
        };

        if let Some(name) = world_map.settings.starting_map.clone() {
            // Checked by `validate`
            world_map
                .open_map(&name)
                .map_err(|_| ConfigError::UnknownStartingMap(name))?;
        }

        Ok(world_map)
    }

    pub fn from_world(world: World) -> Result<Self, ConfigError> {
        Self::new(world.settings, world.maps)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn maps(&self) -> &WorldMaps {
        &self.maps
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn renderer(&self) -> &MapRenderer {
        &self.renderer
    }

    pub fn info_panel(&self) -> &InfoPanel {
        self.presenter.panel()
    }

    pub fn current_map(&self) -> Option<&Map> {
        self.renderer.map()
    }

    pub fn ui_visible(&self) -> bool {
        self.ui_visible
    }

    pub fn show_ui(&mut self) {
        self.ui_visible = true;
    }

    pub fn hide_ui(&mut self) {
        self.ui_visible = false;
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.navigator.set_viewport(&mut self.transform, viewport);
        self.navigator.clamp_to_boundaries(&mut self.transform);
    }

    /// Shows `map`. Pan and zoom carry over from the previous map.
    pub fn set_map(&mut self, map: Map) {
        self.presenter.forget_markers();
        let size = Vec2::new(map.size[0], map.size[1]);
        self.renderer.set_map(map);
        self.navigator.set_content_size(Some(size));
        self.navigator.clamp_to_boundaries(&mut self.transform);
    }

    /// Shows the map with the given name.
    pub fn open_map(&mut self, name: &str) -> Result<(), MapError> {
        let map = self
            .maps
            .iter()
            .find(|map| map.name == name)
            .cloned()
            .ok_or_else(|| MapError::UnknownMap(name.to_owned()))?;
        self.set_map(map);
        Ok(())
    }

    pub fn set_zoom(&mut self, target: f32) {
        self.navigator.set_zoom(&mut self.transform, target);
    }

    pub fn set_zoom_at(&mut self, target: f32, pivot: Pos2) {
        self.navigator.set_zoom_at(&mut self.transform, target, pivot);
    }

    pub fn on_scroll(&mut self, delta_y: f32) {
        self.navigator.on_scroll(&mut self.transform, delta_y);
    }

    pub fn on_drag(&mut self, delta: Vec2) {
        self.navigator.on_drag(&mut self.transform, delta);
    }

    pub fn reset_view(&mut self) {
        self.navigator.reset(&mut self.transform);
    }

    /// Advances in-flight zooms and keeps the popup on its marker.
    pub fn tick(&mut self, dt: f32) {
        self.navigator.tick(&mut self.transform, dt);
        self.presenter.refresh(&self.renderer, &self.transform);
    }

    /// Runs one frame: navigation, marker hit testing, then the info panel.
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        self.navigator.update(&mut self.transform, input, dt);
        self.renderer
            .update_hover(input.pointer, input.clicked, &self.transform);
        for event in self.renderer.drain_events() {
            self.handle_marker_event(event);
        }
        self.presenter.refresh(&self.renderer, &self.transform);
    }

    /// Shows info for a location of the current map, pinned to its first marker.
    pub fn show_location_info(&mut self, location: &Location) {
        let marker = self.renderer.find_marker(&location.name);
        self.presenter.show_location_info(location, marker);
        self.presenter.refresh(&self.renderer, &self.transform);
    }

    pub fn hide_location_info(&mut self) {
        self.presenter.hide_location_info();
    }

    fn handle_marker_event(&mut self, event: MarkerEvent) {
        match event {
            MarkerEvent::Hovered(id) => self.show_marker_info(id),
            MarkerEvent::Unhovered(_) => {}
            MarkerEvent::Clicked(id) => {
                self.show_marker_info(id);
                if !self.settings.open_sub_maps_automatically {
                    return;
                }
                let Some(sub_map) = self
                    .renderer
                    .location(id)
                    .and_then(|location| location.sub_map.clone())
                else {
                    return;
                };
                if let Err(err) = self.open_map(&sub_map) {
                    log::warn!("Cannot open sub-map: {err}");
                }
            }
        }
    }

    fn show_marker_info(&mut self, id: MarkerId) {
        // Stale once a click earlier in the same frame swapped maps
        let Some(location) = self.renderer.location(id) else {
            return;
        };
        self.presenter.show_location_info(location, Some(id));
    }
}
