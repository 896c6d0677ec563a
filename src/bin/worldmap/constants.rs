/// Width of the sidebar panel in pixels.
pub const SIDEBAR_WIDTH: f32 = 200.0;

/// Width of the docked location info panel in pixels.
pub const INFO_DOCK_WIDTH: f32 = 240.0;

/// Scroll distance in points that counts as one wheel notch.
pub const SCROLL_NOTCH: f32 = 50.0;

/// Fraction of the target zoom added or removed per keyboard zoom step.
pub const KEY_ZOOM_STEP: f32 = 0.5;

/// Longest frame time fed into the zoom animation, in seconds.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Gap between a marker and its info popup in pixels.
pub const POPUP_OFFSET: f32 = 12.0;

/// Storage key for the last opened map.
pub const LAST_MAP_KEY: &str = "last_map";
