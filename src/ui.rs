use egui::Context;

use crate::controller::config::CONTROL_STRIP_HEIGHT;
use crate::controller::{Field, FieldBuffers, FrameStats};
use crate::view::egui_painter;
use crate::view::DrawCommand;

/// What the user asked for this frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiActions {
    pub update_requested: bool,
}

/// Build the native UI: drawing area, parameter strip and debug window
pub fn build_ui(ctx: &Context, fields: &mut FieldBuffers, frame: &[DrawCommand], stats: FrameStats) -> UiActions {
    let mut actions = UiActions::default();

    egui::TopBottomPanel::bottom("parameters")
        .exact_height(CONTROL_STRIP_HEIGHT as f32)
        .show(ctx, |ui| {
            actions.update_requested = draw_parameter_strip(ui, fields);
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
            painter.extend(egui_painter::to_shapes(frame, response.rect.min));
        });

    draw_debug_window(ctx, stats);
    actions
}

// Returns true when "Update" was clicked or Enter was pressed in a field
fn draw_parameter_strip(ui: &mut egui::Ui, fields: &mut FieldBuffers) -> bool {
    let mut submitted = false;
    ui.add_space(8.0);
    egui::Grid::new("parameter_grid")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for field in Field::ALL {
                ui.label(field.label());
                let response = ui.add(egui::TextEdit::singleline(fields.get_mut(field)).desired_width(80.0));
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
                ui.end_row();
            }
        });
    if ui.button("Update").clicked() {
        submitted = true;
    }
    submitted
}

fn draw_debug_window(ctx: &Context, stats: FrameStats) {
    egui::Window::new("Debug")
        .default_pos([8.0, 8.0])
        .default_size([140.0, 80.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(format!("FPS: {:.0}", stats.fps())).small());
            ui.label(egui::RichText::new(format!("Ticks: {}", stats.ticks)).small());
            ui.label(egui::RichText::new(format!("Lag skips: {}", stats.lag_skips)).small());
        });
}
