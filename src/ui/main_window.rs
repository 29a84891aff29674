//! # Main Window Module
//!
//! The cave viewer built on eframe/egui. It wires three panels around one
//! shared [`CaveMap`]:
//! - A left side panel with the generation settings.
//! - A central canvas painting the placed tiles.
//! - A bottom status bar for messages.
//!
//! Pressing `M` (or the Regenerate button) builds a new map. Tile updates
//! are spread over frames when pacing is enabled, so a large patch does not
//! stall the render loop.

use eframe::egui;
use log::{error, info};
use parking_lot::RwLock;
use std::error::Error;
use std::sync::Arc;

use crate::editor::CaveMap;
use crate::presentation::SyncProgress;
use crate::ui::central_panel::CentralPanel;
use crate::ui::side_panel::{PanelAction, SidePanel};
use crate::ui::status_bar::StatusBar;
use crate::ui::tile_scene::PaintedScene;

/// Holds the shared map and the panels that look at it.
pub struct MainWindow {
    cave: Arc<RwLock<CaveMap<PaintedScene>>>,
    side_panel: SidePanel,
    central_panel: CentralPanel,
    status_bar: StatusBar,
}

impl MainWindow {
    pub fn new(cave: CaveMap<PaintedScene>, cells_per_frame: usize) -> Self {
        let cave = Arc::new(RwLock::new(cave));
        MainWindow {
            side_panel: SidePanel::new(Arc::clone(&cave), cells_per_frame.max(1)),
            central_panel: CentralPanel::new(Arc::clone(&cave)),
            status_bar: StatusBar::new(Arc::clone(&cave)),
            cave,
        }
    }

    /// Starts a regeneration using the panel's pacing choice.
    fn regenerate(&mut self) {
        self.cave.write().regenerate_wrapper(self.side_panel.paced);
    }

    /// Advances a paced sweep by one frame's budget.
    fn pump_sync(&mut self, ctx: &egui::Context) {
        let mut cave = self.cave.write();
        if cave.is_idle() {
            return;
        }
        match cave.advance(self.side_panel.cells_per_frame) {
            Ok(SyncProgress::Done(stats)) => {
                info!("Paced update finished: {} swapped", stats.replaced);
            }
            Ok(_) => {}
            Err(e) => {
                error!("Tile update failed: {}", e);
                cave.error_message = Some(format!("Tile update failed: {}", e));
                cave.cancel_sync();
            }
        }
        ctx.request_repaint();
    }

    /// Draws the complete UI layout.
    pub fn update(&mut self, ctx: &egui::Context) {
        self.cave.write().placement_mut().tick();

        if !ctx.wants_keyboard_input() && ctx.input().key_pressed(egui::Key::M) {
            self.regenerate();
        }

        match self.side_panel.update(ctx) {
            PanelAction::Regenerate => self.regenerate(),
            PanelAction::CancelUpdate => {
                self.cave.write().cancel_sync();
            }
            PanelAction::ResetView => self.central_panel.reset_view(),
            PanelAction::None => {}
        }

        self.pump_sync(ctx);
        self.status_bar.update(ctx);
        self.central_panel.update(ctx);
    }
}

/// A wrapper to integrate MainWindow into an eframe App.
struct MainWindowApp {
    window: MainWindow,
}

impl eframe::App for MainWindowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.window.update(ctx);
    }
}

/// Runs the viewer until its window is closed.
pub fn run_main_window(cave: CaveMap<PaintedScene>, cells_per_frame: usize) -> Result<(), Box<dyn Error>> {
    let native_options = eframe::NativeOptions::default();
    let window = MainWindow::new(cave, cells_per_frame);
    eframe::run_native(
        "Cave Generator",
        native_options,
        Box::new(move |_cc| Box::new(MainWindowApp { window })),
    );
    // Since run_native returns (), we simply return Ok.
    Ok(())
}
