// src/ui/side_panel.rs

use std::sync::Arc;
use eframe::egui::{self, Context, Ui};
use parking_lot::RwLock;

use crate::editor::CaveMap;
use crate::ui::tile_scene::PaintedScene;

/// Actions the side panel asks the main window to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    None,
    Regenerate,
    CancelUpdate,
    ResetView,
}

/// Manages the left-side panel with the generation settings and map stats.
pub struct SidePanel {
    cave: Arc<RwLock<CaveMap<PaintedScene>>>,
    pub show_side_panel: bool, // Whether this panel is currently visible
    /// Spread tile updates over several frames.
    pub paced: bool,
    /// Cells visited per frame while a paced update runs.
    pub cells_per_frame: usize,
}

impl SidePanel {
    pub fn new(cave: Arc<RwLock<CaveMap<PaintedScene>>>, cells_per_frame: usize) -> Self {
        Self {
            cave,
            show_side_panel: true,
            paced: true,
            cells_per_frame,
        }
    }

    /// Called each frame, updates the side panel UI if it's visible.
    pub fn update(&mut self, ctx: &Context) -> PanelAction {
        if !self.show_side_panel {
            return PanelAction::None; // Early exit if user has hidden it
        }

        let mut action = PanelAction::None;
        egui::SidePanel::left("settings_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.show_settings(ui);
                ui.separator();
                action = self.show_actions(ui);
                ui.separator();
                self.show_stats(ui);
            });
        action
    }

    /// Width, height, seed, fill and passes.
    fn show_settings(&mut self, ui: &mut Ui) {
        ui.heading("Generation");

        let mut cave = self.cave.write();
        let locked = cave.dimensions_locked();
        let config = cave.config_mut();

        ui.add_enabled(!locked, egui::DragValue::new(&mut config.width).clamp_range(3..=400).prefix("Width: "));
        ui.add_enabled(!locked, egui::DragValue::new(&mut config.height).clamp_range(3..=400).prefix("Height: "));
        if locked {
            ui.small("Size is fixed once the map has been placed.");
        }

        ui.horizontal(|ui| {
            ui.label("Seed");
            ui.text_edit_singleline(&mut config.seed);
        });
        ui.checkbox(&mut config.use_random_seed, "Use random seed");
        ui.add(egui::Slider::new(&mut config.fill_percent, 0..=100).text("Fill %"));
        ui.add(egui::Slider::new(&mut config.passes, 1..=10).text("Passes"));
    }

    fn show_actions(&mut self, ui: &mut Ui) -> PanelAction {
        ui.heading("Update");
        ui.checkbox(&mut self.paced, "Paced tile updates");
        ui.add_enabled(self.paced, egui::Slider::new(&mut self.cells_per_frame, 1..=2000).text("Cells / frame"));

        let busy = !self.cave.read().is_idle();
        let mut action = PanelAction::None;
        ui.horizontal(|ui| {
            if ui.add_enabled(!busy, egui::Button::new("Regenerate (M)")).clicked() {
                action = PanelAction::Regenerate;
            }
            if ui.add_enabled(busy, egui::Button::new("Cancel")).clicked() {
                action = PanelAction::CancelUpdate;
            }
        });
        if ui.button("Reset view").clicked() {
            action = PanelAction::ResetView;
        }
        action
    }

    /// Region analysis of the last map.
    fn show_stats(&self, ui: &mut Ui) {
        ui.heading("Map");

        let cave = self.cave.read();
        match cave.last_report() {
            Some(report) => {
                ui.label(format!("Map #{}  ({}x{})", report.generation, report.width, report.height));
                ui.label(format!("Seed value: {:#018x}", report.seed_value));
                ui.label(format!("Open cells: {}", report.regions.open_cells));
                ui.label(format!(
                    "Regions: {} (largest {})",
                    report.regions.region_count, report.regions.largest_region
                ));
                ui.label(format!("Smoothing flips: {}", report.smoothing_changes));
                ui.label(format!("Cells changed: {}", report.cells_changed));
                if let Some(sync) = report.sync {
                    ui.label(format!("Placed {} / swapped {}", sync.created, sync.replaced));
                }
            }
            None => {
                ui.label("No map generated yet.");
            }
        }
    }
}
