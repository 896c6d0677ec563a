#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod assets;
mod colors;
mod constants;
mod overlays;
mod ui;

use assets::{AssetLoadState, AssetRoot, load_and_decode_image, load_embedded_world, load_world_file};
use clap::Parser;
use constants::LAST_MAP_KEY;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::thread;
use worldmap_navigator::{World, WorldMap};

/// Pan and zoom around a world map and inspect its locations.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// World file (RON) to open instead of the built-in demo world
    #[arg(short, long)]
    world: Option<PathBuf>,
}

/// Main application state for the world map viewer.
pub struct WorldmapApp {
    world_map: Option<WorldMap>,
    /// Screen rectangle the map was drawn into last frame
    map_viewport: Option<egui::Rect>,
    asset_cache: HashMap<String, AssetLoadState>,
    texture_cache: HashMap<String, TextureHandle>,
    toasts: Toasts,
}

fn error_toast(toasts: &mut Toasts, text: String, seconds: f64) {
    toasts.add(Toast {
        kind: ToastKind::Error,
        text: text.into(),
        options: ToastOptions::default()
            .duration_in_seconds(seconds)
            .show_icon(true),
        ..Default::default()
    });
}

/// Every image a world can show, without duplicates.
fn world_images(world: &World) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    if let Some(marker) = &world.settings.default_marker {
        paths.insert(marker.path().to_owned());
    }
    for map in &world.maps {
        paths.insert(map.background.path().to_owned());
        for location in &map.locations {
            if let Some(marker) = &location.custom_marker {
                paths.insert(marker.path().to_owned());
            }
        }
    }
    paths
}

impl WorldmapApp {
    fn new(cc: &eframe::CreationContext<'_>, args: Args) -> Self {
        let mut toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let loaded = match &args.world {
            Some(path) => load_world_file(path),
            None => load_embedded_world(),
        };
        let (world, asset_root) = match loaded {
            Ok((world, root)) => (Some(world), root),
            Err(err) => {
                log::error!("{err}");
                error_toast(&mut toasts, err.to_string(), 10.0);
                (None, AssetRoot::Embedded)
            }
        };

        let mut asset_cache = HashMap::new();

        // Preload all images in background threads
        for path in world.iter().flat_map(world_images) {
            let (tx, rx) = mpsc::channel();
            let ctx = cc.egui_ctx.clone();
            let root = asset_root.clone();
            let asset_path = path.clone();

            thread::spawn(move || {
                let result = load_and_decode_image(&root, &asset_path);
                let _ = tx.send(result);
                ctx.request_repaint();
            });

            asset_cache.insert(path, AssetLoadState::Loading(rx));
        }

        let mut world_map = world.and_then(|world| match WorldMap::from_world(world) {
            Ok(world_map) => Some(world_map),
            Err(err) => {
                log::error!("Invalid world settings: {err}");
                error_toast(&mut toasts, format!("Invalid world settings: {err}"), 10.0);
                None
            }
        });

        // Reopen the map that was showing when the app last closed
        let last_map: Option<String> = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, LAST_MAP_KEY));
        if let (Some(world_map), Some(name)) = (&mut world_map, last_map)
            && let Err(err) = world_map.open_map(&name)
        {
            log::info!("Not restoring last map: {err}");
        }

        Self {
            world_map,
            map_viewport: None,
            asset_cache,
            texture_cache: HashMap::new(),
            toasts,
        }
    }

    /// Polls all loading assets and creates textures for ready ones.
    fn poll_all_assets(&mut self, ctx: &egui::Context) {
        let mut updates: Vec<(String, AssetLoadState)> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for (path, state) in &mut self.asset_cache {
            if let AssetLoadState::Loading(rx) = state {
                match rx.try_recv() {
                    Ok(Ok(decoded)) => {
                        updates.push((path.clone(), AssetLoadState::Ready(decoded)));
                    }
                    Ok(Err(err)) => {
                        let msg = err.to_string();
                        errors.push(msg.clone());
                        updates.push((path.clone(), AssetLoadState::Error(msg)));
                    }
                    Err(mpsc::TryRecvError::Disconnected) => {
                        let msg = format!("{}: channel disconnected", path);
                        errors.push(msg.clone());
                        updates.push((path.clone(), AssetLoadState::Error(msg)));
                    }
                    Err(mpsc::TryRecvError::Empty) => {}
                }
            }
        }

        for (path, new_state) in updates {
            self.asset_cache.insert(path, new_state);
        }

        // A missing marker image only affects that marker, it falls back to a plain pin
        for err in errors {
            log::warn!("{err}");
            error_toast(&mut self.toasts, err, 8.0);
        }

        // Create textures for ready assets
        let ready_paths: Vec<_> = self
            .asset_cache
            .iter()
            .filter(|(path, state)| {
                matches!(state, AssetLoadState::Ready(_)) && !self.texture_cache.contains_key(*path)
            })
            .map(|(path, _)| path.clone())
            .collect();

        for path in ready_paths {
            if let Some(AssetLoadState::Ready(decoded)) = self.asset_cache.get(&path) {
                let image = ColorImage::from_rgba_unmultiplied(
                    [decoded.width as usize, decoded.height as usize],
                    &decoded.pixels,
                );
                let texture = ctx.load_texture(&path, image, TextureOptions::LINEAR);
                self.texture_cache.insert(path, texture);
            }
        }
    }
}

impl eframe::App for WorldmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_all_assets(ctx);
        self.handle_keyboard_input(ctx);

        self.show_status_bar(ctx);
        self.show_sidebar(ctx);
        self.show_info_dock(ctx);
        self.show_central_panel(ctx);

        // Show toasts
        self.toasts.show(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(map) = self.world_map.as_ref().and_then(WorldMap::current_map) {
            eframe::set_value(storage, LAST_MAP_KEY, &map.name);
        }
    }
}

fn load_icon() -> egui::IconData {
    let icon_bytes = include_bytes!("../../../assets/worldmap-icon.ico");
    let icon_dir =
        ico::IconDir::read(std::io::Cursor::new(icon_bytes)).expect("Failed to read icon");
    let entry = &icon_dir.entries()[0];
    let image = entry.decode().expect("Failed to decode icon");
    egui::IconData {
        rgba: image.rgba_data().to_vec(),
        width: image.width(),
        height: image.height(),
    }
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_icon(Arc::new(load_icon())),
        ..Default::default()
    };

    eframe::run_native(
        "World Map",
        options,
        Box::new(|cc| Ok(Box::new(WorldmapApp::new(cc, args)))),
    )
}
