use serde::{Deserialize, Serialize};

pub mod info_panel;
pub mod markers;
pub mod navigation;
pub mod settings;
pub mod transform;
pub mod world_map;

pub use info_panel::{InfoContent, InfoPanel, InfoPresenter, PanelMode};
pub use markers::{MapRenderer, Marker, MarkerEvent, MarkerId};
pub use navigation::{FrameInput, Navigator};
pub use settings::{ConfigError, NavigationSettings, Settings};
pub use transform::TransformState;
pub use world_map::{MapError, WorldMap};

/// Path of an image asset. The engine never decodes it, it only hands it back to
/// whoever draws the map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(pub String);

impl ImageHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single map: one background image and the locations placed on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Map {
    /// Unique name of the map, used for sub-map links and the starting map
    pub name: String,
    /// Background image
    pub background: ImageHandle,
    /// Native size of the background in logical units [width, height]
    pub size: [f32; 2],
    /// Locations in draw order
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl Map {
    /// Returns the first location with the given name.
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.name == name)
    }

    /// Names that appear on more than one location, in first-seen order.
    pub fn duplicate_location_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for location in &self.locations {
            if !seen.insert(location.name.as_str()) && !duplicates.contains(&location.name.as_str())
            {
                duplicates.push(location.name.as_str());
            }
        }
        duplicates
    }
}

/// A named point of interest on a map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Display name, unique within its map
    pub name: String,
    /// Free-form category (e.g. "Town", "Dungeon")
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    /// Position in logical map space: origin at the background centre, +y down
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 2]>,
    /// Marker image overriding the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_marker: Option<ImageHandle>,
    /// Name of a map opened when this location is clicked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_map: Option<String>,
}

impl Location {
    pub fn new(name: impl Into<String>, position: [f32; 2]) -> Self {
        Self {
            name: name.into(),
            kind: String::new(),
            description: String::new(),
            position: Some(position),
            custom_marker: None,
            sub_map: None,
        }
    }
}

/// Contents of a world file: the settings and every map they can reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct World {
    #[serde(default)]
    pub settings: Settings,
    pub maps: WorldMaps,
}

/// Root type for the maps of a world file
pub type WorldMaps = Vec<Map>;
