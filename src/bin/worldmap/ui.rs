//! UI rendering methods for the world map viewer.

use crate::WorldmapApp;
use crate::colors;
use crate::constants::{KEY_ZOOM_STEP, MAX_FRAME_DT, SCROLL_NOTCH, SIDEBAR_WIDTH};
use crate::overlays::{draw_background, draw_markers, show_location_dock, show_location_popup};
use eframe::egui;
use worldmap_navigator::FrameInput;

impl WorldmapApp {
    /// Handles keyboard shortcuts for zoom, view reset and panel toggles.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let Some(world_map) = &mut self.world_map else {
            return;
        };
        let (zoom_in, zoom_out, reset, close_info, toggle_ui) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
                i.key_pressed(egui::Key::Minus),
                i.key_pressed(egui::Key::Num0),
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::M),
            )
        });

        let center = world_map.renderer().map().and(
            self.map_viewport.map(|viewport| viewport.center()),
        );
        if let Some(center) = center {
            let target = world_map.transform().target_zoom;
            if zoom_in {
                world_map.set_zoom_at(target * (1.0 + KEY_ZOOM_STEP), center);
            }
            if zoom_out {
                world_map.set_zoom_at(target * (1.0 - KEY_ZOOM_STEP), center);
            }
        }
        if reset {
            world_map.reset_view();
        }
        if close_info {
            world_map.hide_location_info();
        }
        if toggle_ui {
            if world_map.ui_visible() {
                world_map.hide_ui();
            } else {
                world_map.show_ui();
            }
        }
    }

    /// Renders the bottom status bar with controls hint and zoom level.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Scroll: Zoom | Drag: Pan | +/-: Zoom | 0: Reset | Esc: Close info | M: Map");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(world_map) = &self.world_map {
                        ui.label(format!("Zoom: {:.2}x", world_map.transform().current_zoom));
                    }
                });
            });
        });
    }

    /// Renders the left sidebar panel.
    pub fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_sidebar_content(ui);
                });
            });
    }

    /// Renders the sidebar content: the map selector.
    fn show_sidebar_content(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);

        ui.strong("Maps");
        ui.separator();

        let Some(world_map) = &mut self.world_map else {
            ui.label("No world loaded");
            return;
        };

        if world_map.maps().is_empty() {
            ui.label("No maps in this world");
            return;
        }

        let current = world_map.current_map().map(|map| map.name.clone());
        let mut selected = None;
        for map in world_map.maps() {
            let is_current = current.as_deref() == Some(map.name.as_str());
            if ui.selectable_label(is_current, &map.name).clicked() && !is_current {
                selected = Some(map.name.clone());
            }
        }

        if let Some(name) = selected
            && let Err(err) = world_map.open_map(&name)
        {
            log::warn!("{err}");
        }
    }

    /// Renders the docked location panel, if the world uses one.
    pub fn show_info_dock(&self, ctx: &egui::Context) {
        if let Some(world_map) = &self.world_map
            && world_map.ui_visible()
        {
            show_location_dock(ctx, world_map);
        }
    }

    /// Renders the central panel containing the map view.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(world_map) = &self.world_map else {
                ui.centered_and_justified(|ui| {
                    ui.label("No world loaded.\nPass a world file with `--world <path>`.");
                });
                return;
            };
            if !world_map.ui_visible() {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(colors::HINT_TEXT, "Map hidden. Press M to show it.");
                });
                return;
            }
            if world_map.current_map().is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label("Select a map on the left.");
                });
                return;
            }

            let panel_rect = ui.max_rect();
            self.show_map(ui);
            self.show_zoom_controls(ctx, panel_rect);
        });

        if let Some(world_map) = &mut self.world_map
            && world_map.ui_visible()
            && show_location_popup(ctx, world_map)
        {
            world_map.hide_location_info();
        }
    }

    /// Renders the floating zoom controls panel.
    fn show_zoom_controls(&mut self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let Some(world_map) = &mut self.world_map else {
            return;
        };
        let margin = 12.0;
        let panel_width = 160.0;
        let panel_height = 36.0;

        let anchor_pos = egui::pos2(
            panel_rect.right() - panel_width - margin,
            panel_rect.bottom() - panel_height - margin,
        );
        let navigation = world_map.settings().navigation.clone();
        let center = panel_rect.center();

        egui::Area::new(egui::Id::new("zoom_controls"))
            .fixed_pos(anchor_pos)
            .interactable(true)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(ui.style().visuals.window_fill.gamma_multiply(0.95))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let mut zoom = world_map.transform().target_zoom;
                            let slider = ui.add_enabled(
                                navigation.allow_zoom,
                                egui::Slider::new(&mut zoom, navigation.min_zoom..=navigation.max_zoom)
                                    .logarithmic(true)
                                    .show_value(false),
                            );
                            if slider.changed() {
                                world_map.set_zoom_at(zoom, center);
                            }
                            if ui.button("Fit").on_hover_text("Reset view (0)").clicked() {
                                world_map.reset_view();
                            }
                        });
                    });
            });
    }

    /// Samples pointer input, advances the session and draws the current map.
    fn show_map(&mut self, ui: &mut egui::Ui) {
        let Some(world_map) = &mut self.world_map else {
            return;
        };

        let (viewport_rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        world_map.set_viewport(viewport_rect);
        self.map_viewport = Some(viewport_rect);

        let scroll_delta = if response.hovered() {
            ui.input(|i| i.raw_scroll_delta.y) / SCROLL_NOTCH
        } else {
            0.0
        };
        let input = FrameInput {
            pointer: response.hover_pos(),
            drag_delta: if response.dragged() {
                response.drag_delta()
            } else {
                egui::Vec2::ZERO
            },
            scroll_delta,
            clicked: response.clicked(),
        };
        let dt = ui.input(|i| i.stable_dt).min(MAX_FRAME_DT);
        world_map.update(&input, dt);

        if world_map.transform().is_zooming() {
            ui.ctx().request_repaint();
        }
        if world_map.renderer().hovered().is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        let painter = ui.painter_at(viewport_rect);
        draw_background(&painter, world_map, &self.texture_cache);
        draw_markers(&painter, world_map, &self.texture_cache);
    }
}
