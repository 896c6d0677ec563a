//! Drawing functions for the background, location markers and location info.

use crate::colors;
use crate::constants::{INFO_DOCK_WIDTH, POPUP_OFFSET};
use eframe::egui::{self, TextureHandle};
use std::collections::HashMap;
use worldmap_navigator::{InfoContent, PanelMode, WorldMap};

/// Full texture UV rectangle.
const UV: egui::Rect = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

/// Draws the background of the current map at its native size under the current zoom.
pub fn draw_background(
    painter: &egui::Painter,
    world_map: &WorldMap,
    textures: &HashMap<String, TextureHandle>,
) {
    let renderer = world_map.renderer();
    let (Some((image, _)), Some(rect)) = (
        renderer.background(),
        renderer.background_rect(world_map.transform()),
    ) else {
        return;
    };

    if let Some(texture) = textures.get(image.path()) {
        painter.image(texture.id(), rect, UV, egui::Color32::WHITE);
    } else {
        painter.rect_filled(rect, 0.0, colors::BACKGROUND_PLACEHOLDER);
    }
}

/// Draws one marker per location. Markers without a loaded image get a plain pin.
pub fn draw_markers(
    painter: &egui::Painter,
    world_map: &WorldMap,
    textures: &HashMap<String, TextureHandle>,
) {
    let renderer = world_map.renderer();
    let transform = world_map.transform();
    let clip = painter.clip_rect();

    for marker in renderer.markers() {
        let rect = renderer.marker_rect(marker, transform);
        if !clip.intersects(rect) {
            continue;
        }

        if let Some(texture) = textures.get(marker.image.path()) {
            painter.image(texture.id(), rect, UV, egui::Color32::WHITE);
        } else {
            painter.circle(
                rect.center(),
                rect.width() * 0.4,
                colors::MARKER_FALLBACK_FILL,
                egui::Stroke::new(1.5, colors::MARKER_FALLBACK_STROKE),
            );
        }

        if renderer.hovered() == Some(marker.id) {
            painter.rect_stroke(
                rect.expand(2.0),
                4.0,
                egui::Stroke::new(2.0, colors::MARKER_HOVER_STROKE),
                egui::StrokeKind::Outside,
            );
        }
    }
}

fn location_details(ui: &mut egui::Ui, content: &InfoContent) {
    if !content.kind.is_empty() {
        ui.colored_label(colors::LOCATION_KIND_TEXT, &content.kind);
    }
    ui.separator();
    ui.label(&content.description);
}

/// Shows the popup next to its marker. Returns true when the user closed it.
pub fn show_location_popup(ctx: &egui::Context, world_map: &WorldMap) -> bool {
    let panel = world_map.info_panel();
    if panel.mode != PanelMode::Popup || !panel.visible {
        return false;
    }
    let (Some(anchor), Some(content)) = (panel.anchor, &panel.content) else {
        return false;
    };

    let mut closed = false;
    egui::Area::new(egui::Id::new("location_popup"))
        .fixed_pos(anchor + egui::vec2(POPUP_OFFSET, POPUP_OFFSET))
        .order(egui::Order::Foreground)
        .interactable(true)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(260.0);
                ui.horizontal(|ui| {
                    ui.strong(&content.name);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Close").on_hover_text("Esc").clicked() {
                            closed = true;
                        }
                    });
                });
                location_details(ui, content);
            });
        });
    closed
}

/// Shows the docked info panel on the right side of the window.
pub fn show_location_dock(ctx: &egui::Context, world_map: &WorldMap) {
    let panel = world_map.info_panel();
    if panel.mode != PanelMode::Dock {
        return;
    }

    egui::SidePanel::right("location_info")
        .exact_width(INFO_DOCK_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            match &panel.content {
                Some(content) => {
                    ui.strong(&content.name);
                    location_details(ui, content);
                }
                None => {
                    ui.strong("Location");
                    ui.separator();
                    ui.label("Hover a location to see its details.");
                }
            }
        });
}
