//! Location info panel, either a popup pinned to a marker or a fixed dock.

use crate::Location;
use crate::markers::{MapRenderer, MarkerId};
use crate::transform::TransformState;
use eframe::egui::Pos2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    /// Follows its marker every frame and can be hidden
    Popup,
    /// Placed by the surrounding layout, always visible, only the text changes
    Dock,
}

/// Text shown for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoContent {
    pub name: String,
    pub kind: String,
    pub description: String,
}

impl From<&Location> for InfoContent {
    fn from(location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            kind: location.kind.clone(),
            description: location.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub visible: bool,
    /// Marker the popup is pinned to
    pub tracked: Option<MarkerId>,
    pub mode: PanelMode,
    pub content: Option<InfoContent>,
    /// Screen position of the tracked marker as of the last refresh
    pub anchor: Option<Pos2>,
}

#[derive(Debug, Clone)]
pub struct InfoPresenter {
    panel: InfoPanel,
}

impl InfoPresenter {
    pub fn new(popup: bool) -> Self {
        let mode = if popup {
            PanelMode::Popup
        } else {
            PanelMode::Dock
        };
        Self {
            panel: InfoPanel {
                visible: mode == PanelMode::Dock,
                tracked: None,
                mode,
                content: None,
                anchor: None,
            },
        }
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    /// A popup needs a marker to pin to; without one the request is dropped.
    pub fn show_location_info(&mut self, location: &Location, marker: Option<MarkerId>) {
        if self.panel.mode == PanelMode::Popup && marker.is_none() {
            log::warn!(
                "Location '{}' has no marker on the current map, not showing a popup",
                location.name
            );
            return;
        }
        self.panel.content = Some(InfoContent::from(location));
        if self.panel.mode == PanelMode::Popup {
            self.panel.visible = true;
            self.panel.tracked = marker;
            self.panel.anchor = None;
        }
    }

    pub fn hide_location_info(&mut self) {
        if self.panel.mode == PanelMode::Dock {
            return;
        }
        self.panel.visible = false;
        self.panel.tracked = None;
        self.panel.anchor = None;
    }

    /// Drops every marker reference; called whenever the marker set is rebuilt.
    pub fn forget_markers(&mut self) {
        match self.panel.mode {
            PanelMode::Popup => self.hide_location_info(),
            PanelMode::Dock => self.panel.content = None,
        }
    }

    /// Moves the popup onto its marker's current screen position.
    pub fn refresh(&mut self, renderer: &MapRenderer, transform: &TransformState) {
        let Some(tracked) = self.panel.tracked else {
            return;
        };
        match renderer.marker_screen_position(tracked, transform) {
            Some(position) => self.panel.anchor = Some(position),
            None => {
                log::debug!("Tracked marker is gone, hiding location info");
                self.hide_location_info();
            }
        }
    }
}
