use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::series::{direction_label, speed_label};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Styled data table (bottom panel)
// ---------------------------------------------------------------------------

/// Time / TWS / TWD / Gust; TWS cells shaded by the current speed scale.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    ui.strong("Data");

    let rows = &state.table.rows;
    if rows.is_empty() {
        ui.label("No data to display.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(130.0))
        .columns(Column::auto().at_least(60.0), 3)
        .min_scrolled_height(120.0)
        .header(20.0, |mut header| {
            for title in ["Time", "TWS", "TWD", "Gust"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &rows[row.index()];

                row.col(|ui| {
                    ui.label(&r.time);
                });
                row.col(|ui| {
                    let text = RichText::new(speed_label(r.tws));
                    match state.speed_scale {
                        Some(scale) => {
                            ui.painter().rect_filled(ui.max_rect(), 0.0, scale.color_for(r.tws));
                            ui.label(text.color(Color32::BLACK));
                        }
                        None => {
                            ui.label(text);
                        }
                    }
                });
                row.col(|ui| {
                    ui.label(direction_label(r.twd));
                });
                row.col(|ui| {
                    ui.label(speed_label(r.gust));
                });
            });
        });
}
