//! Color constants for the map view and location info.

use eframe::egui::Color32;

// Shown while a background is loading or failed to load
pub const BACKGROUND_PLACEHOLDER: Color32 = Color32::from_rgb(40, 44, 52);

// Markers whose image is not available
pub const MARKER_FALLBACK_FILL: Color32 = Color32::from_rgb(220, 60, 50);
pub const MARKER_FALLBACK_STROKE: Color32 = Color32::from_rgb(90, 20, 15);

pub const MARKER_HOVER_STROKE: Color32 = Color32::from_rgb(255, 230, 120);

// Text colors
pub const LOCATION_KIND_TEXT: Color32 = Color32::from_rgb(170, 170, 170);
pub const HINT_TEXT: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 160);
