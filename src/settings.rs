//! Navigation and presentation settings for a world map session.

use crate::{ImageHandle, WorldMaps};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that prevent a world map session from starting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("no default marker image configured")]
    MissingDefaultMarker,
    #[error("invalid zoom bounds: min {min} must be positive and not above max {max}")]
    InvalidZoomBounds { min: f32, max: f32 },
    #[error("zoom duration must not be negative (got {0})")]
    NegativeZoomDuration(f32),
    #[error("marker scale and size must be positive (scale {scale}, size {size})")]
    InvalidMarkerSize { scale: f32, size: f32 },
    #[error("starting map '{0}' is not part of the world")]
    UnknownStartingMap(String),
}

/// Pan and zoom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationSettings {
    pub allow_drag: bool,
    /// Keep the background covering the viewport while panning and zooming
    pub enable_boundaries: bool,
    pub allow_zoom: bool,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Seconds a zoom step takes to settle, 0 zooms instantly
    pub zoom_duration: f32,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            allow_drag: true,
            enable_boundaries: true,
            allow_zoom: true,
            min_zoom: 1.0,
            max_zoom: 10.0,
            zoom_duration: 1.0,
        }
    }
}

impl NavigationSettings {
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub navigation: NavigationSettings,
    /// Marker image for locations without a custom one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_marker: Option<ImageHandle>,
    /// Uniform scale applied to every marker
    pub marker_scale: f32,
    /// Edge length of an unscaled marker in logical units
    pub marker_size: f32,
    /// Popup follows the hovered marker, otherwise the panel is a fixed dock
    pub location_info_is_popup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_map: Option<String>,
    /// Whether the map UI is visible when the session starts
    pub open_on_start: bool,
    /// Clicking a location with a sub-map opens it
    pub open_sub_maps_automatically: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            navigation: NavigationSettings::default(),
            default_marker: None,
            marker_scale: 0.3,
            marker_size: 100.0,
            location_info_is_popup: true,
            starting_map: None,
            open_on_start: true,
            open_sub_maps_automatically: true,
        }
    }
}

impl Settings {
    /// Checks everything a session needs before navigation starts.
    pub fn validate(&self, maps: &WorldMaps) -> Result<&ImageHandle, ConfigError> {
        let nav = &self.navigation;
        if !(nav.min_zoom > 0.0 && nav.min_zoom <= nav.max_zoom) {
            return Err(ConfigError::InvalidZoomBounds {
                min: nav.min_zoom,
                max: nav.max_zoom,
            });
        }
        if nav.zoom_duration < 0.0 || nav.zoom_duration.is_nan() {
            return Err(ConfigError::NegativeZoomDuration(nav.zoom_duration));
        }
        if !(self.marker_scale > 0.0 && self.marker_size > 0.0) {
            return Err(ConfigError::InvalidMarkerSize {
                scale: self.marker_scale,
                size: self.marker_size,
            });
        }
        if let Some(name) = &self.starting_map
            && !maps.iter().any(|map| &map.name == name)
        {
            return Err(ConfigError::UnknownStartingMap(name.clone()));
        }
        self.default_marker
            .as_ref()
            .ok_or(ConfigError::MissingDefaultMarker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Map;

    fn valid_settings() -> Settings {
        Settings {
            default_marker: Some(ImageHandle::new("markers/default.png")),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.navigation.min_zoom, 1.0);
        assert_eq!(settings.navigation.max_zoom, 10.0);
        assert_eq!(settings.navigation.zoom_duration, 1.0);
        assert_eq!(settings.marker_scale, 0.3);
        assert!(settings.location_info_is_popup);
    }

    #[test]
    fn missing_default_marker_is_rejected() {
        let settings = Settings::default();
        assert_eq!(
            settings.validate(&Vec::new()),
            Err(ConfigError::MissingDefaultMarker)
        );
    }

    #[test]
    fn inverted_zoom_bounds_are_rejected() {
        let mut settings = valid_settings();
        settings.navigation.min_zoom = 5.0;
        settings.navigation.max_zoom = 2.0;
        assert!(matches!(
            settings.validate(&Vec::new()),
            Err(ConfigError::InvalidZoomBounds { .. })
        ));
    }

    #[test]
    fn negative_zoom_duration_is_rejected() {
        let mut settings = valid_settings();
        settings.navigation.zoom_duration = -0.5;
        assert_eq!(
            settings.validate(&Vec::new()),
            Err(ConfigError::NegativeZoomDuration(-0.5))
        );
    }

    #[test]
    fn unknown_starting_map_is_rejected() {
        let mut settings = valid_settings();
        settings.starting_map = Some("Atlantis".to_owned());
        let maps = vec![Map {
            name: "Continent".to_owned(),
            background: ImageHandle::new("maps/continent.png"),
            size: [100.0, 100.0],
            locations: Vec::new(),
        }];
        assert_eq!(
            settings.validate(&maps),
            Err(ConfigError::UnknownStartingMap("Atlantis".to_owned()))
        );
        settings.starting_map = Some("Continent".to_owned());
        assert!(settings.validate(&maps).is_ok());
    }

    #[test]
    fn partial_ron_fills_in_defaults() {
        let settings: Settings =
            ron::from_str("(navigation: (zoomDuration: 0.0), defaultMarker: Some(\"m.png\"))")
                .expect("parse settings");
        assert_eq!(settings.navigation.zoom_duration, 0.0);
        assert!(settings.navigation.allow_drag);
        assert_eq!(settings.default_marker, Some(ImageHandle::new("m.png")));
    }
}
