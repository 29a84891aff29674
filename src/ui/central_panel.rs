//! Central panel UI module: handles zoom, pan and painting the placed tiles.

use std::sync::Arc;
use parking_lot::RwLock;
use eframe::egui::{self, Color32, Context, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::editor::CaveMap;
use crate::presentation::WorldPosition;
use crate::ui::tile_scene::PaintedScene;

/// Frames during which a freshly swapped tile is outlined.
const FLASH_FRAMES: u64 = 20;

/// The `CentralPanel` struct provides the main viewport. It fits the map to
/// the available area, then applies the user's zoom and pan on top.
pub struct CentralPanel {
    cave: Arc<RwLock<CaveMap<PaintedScene>>>,

    /// Zoom factor on top of the fit-to-panel scale.
    zoom: f32,

    /// Current pan offset (in screen coordinates).
    pan: Vec2,

    /// Outline tiles created in the last few frames.
    pub highlight_changes: bool,
}

impl CentralPanel {
    /// Create a new central panel instance.
    pub fn new(cave: Arc<RwLock<CaveMap<PaintedScene>>>) -> Self {
        Self {
            cave,
            zoom: 1.0,
            pan: Vec2::ZERO,
            highlight_changes: true,
        }
    }

    /// Resets zoom and pan.
    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
    }

    /// Called each frame to update the central panel.
    pub fn update(&mut self, ctx: &Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                let response = ui.interact(rect, ui.id(), Sense::drag());
                self.handle_zoom(ui, &response);
                self.handle_pan(&response);

                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, Color32::BLACK);
                self.draw_tiles(&painter, rect);
            });
    }

    // ============================================================
    // Zoom and Pan Handling
    // ============================================================

    fn handle_zoom(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let scroll = ui.input().scroll_delta.y;
        if response.hovered() && scroll.abs() > 0.0 {
            let zoom_sensitivity = 0.001;
            self.zoom = (self.zoom * (1.0 + scroll * zoom_sensitivity)).clamp(0.25, 16.0);
            ui.ctx().request_repaint();
        }
    }

    fn handle_pan(&mut self, response: &egui::Response) {
        if response.dragged() {
            self.pan += response.drag_delta();
            response.ctx.request_repaint();
        }
    }

    // ============================================================
    // Drawing
    // ============================================================

    /// Paints every live tile of the scene.
    fn draw_tiles(&self, painter: &Painter, rect: Rect) {
        let cave = self.cave.read();
        let Some((width, height)) = cave.synchronizer().registry().dimensions() else {
            return;
        };
        let layout = *cave.synchronizer().layout();
        let world_w = width as f32 * layout.cell_size;
        let world_h = height as f32 * layout.cell_size;
        let scale = (rect.width() / world_w).min(rect.height() / world_h) * self.zoom;
        let tile_size = Vec2::splat(layout.cell_size * scale);

        let scene = cave.placement();
        let frame = scene.frame();
        for tile in scene.tiles() {
            let min = self.world_to_screen(tile.position, layout.origin, rect, scale);
            let tile_rect = Rect::from_min_size(min, tile_size);
            if !rect.intersects(tile_rect) {
                continue;
            }
            painter.rect_filled(tile_rect, 0.0, tile.style.color);
            if self.highlight_changes && frame.saturating_sub(tile.born) < FLASH_FRAMES && tile.born > 0 {
                painter.rect_stroke(tile_rect, 0.0, Stroke::new(1.0, Color32::YELLOW));
            }
        }
    }

    /// Projects the x/z plane of the world onto the panel.
    fn world_to_screen(&self, world: WorldPosition, origin: WorldPosition, rect: Rect, scale: f32) -> Pos2 {
        let center = rect.center() + self.pan;
        Pos2::new(
            center.x + (world.x - origin.x) * scale,
            center.y + (world.z - origin.z) * scale,
        )
    }
}
