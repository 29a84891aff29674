// src/ui/status_bar.rs

use std::sync::Arc;
use eframe::egui::{self, Color32, Context};
use parking_lot::RwLock;

use crate::editor::CaveMap;
use crate::ui::tile_scene::PaintedScene;

pub struct StatusBar {
    cave: Arc<RwLock<CaveMap<PaintedScene>>>,
}

impl StatusBar {
    pub fn new(cave: Arc<RwLock<CaveMap<PaintedScene>>>) -> Self {
        Self { cave }
    }

    pub fn update(&mut self, ctx: &Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let cave = self.cave.read(); // Keep the read lock short.
            let remaining = cave.synchronizer().remaining();

            ui.horizontal(|ui| {
                ui.label(&cave.status_message);
                if let Some(err) = &cave.error_message {
                    ui.colored_label(Color32::RED, err);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Tiles: {}", cave.placement().len()));
                    if remaining > 0 {
                        ui.label(format!("Updating: {} left", remaining));
                    } else {
                        ui.label(format!("{:?}", cave.sync_state()));
                    }
                });
            });
        });
    }
}
