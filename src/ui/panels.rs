use chrono::{NaiveDateTime, NaiveTime, Timelike};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::filter::{end_of_minute, FilterInputs, FilterMode};
use crate::data::series::{from_plot_x, to_plot_x};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let (span, headers) = match &state.dataset {
        Some(ds) => (FilterInputs::spanning(&ds.timed), ds.table.headers.clone()),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let mut changed = false;
    let mode = state.config.filter_mode;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            match mode {
                FilterMode::DateOnly => {
                    changed |= date_range_editor(ui, &mut state.filters);
                }
                FilterMode::DateAndTimeOfDay => {
                    changed |= date_range_editor(ui, &mut state.filters);
                    ui.add_space(6.0);
                    ui.strong("Time of day");
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label("From");
                        changed |= time_editor(ui, "start_time", &mut state.filters.start_time, Bound::Start);
                    });
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label("To");
                        changed |= time_editor(ui, "end_time", &mut state.filters.end_time, Bound::End);
                    });
                }
                FilterMode::InstantRange => {
                    ui.strong("Time range");
                    changed |= instant_slider(ui, "From", &mut state.filters.start_instant, &span);
                    changed |= instant_slider(ui, "To", &mut state.filters.end_instant, &span);
                }
            }

            ui.add_space(6.0);
            if ui.small_button("Reset").clicked() {
                state.filters = span;
                changed = true;
            }

            ui.separator();

            // Columns as read from the file, after header repair.
            egui::CollapsingHeader::new(RichText::new(format!("Columns in the CSV  ({})", headers.len())).strong())
                .id_salt("columns")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for h in &headers {
                        ui.monospace(h);
                    }
                });
        });

    if changed {
        state.refilter();
    }
}

fn date_range_editor(ui: &mut Ui, filters: &mut FilterInputs) -> bool {
    let mut changed = false;
    ui.strong("Date range");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("From");
        changed |= ui
            .add(DatePickerButton::new(&mut filters.start_date).id_salt("start_date"))
            .changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("To");
        changed |= ui
            .add(DatePickerButton::new(&mut filters.end_date).id_salt("end_date"))
            .changed();
    });
    changed
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Hour / minute drag values for one time-of-day bound.
///
/// An end bound covers its whole minute; the stored time is only replaced
/// when a drag value actually changed.
fn time_editor(ui: &mut Ui, id: &str, time: &mut NaiveTime, bound: Bound) -> bool {
    let mut hour = time.hour();
    let mut minute = time.minute();
    let mut changed = false;

    ui.push_id(id, |ui: &mut Ui| {
        changed |= ui
            .add(egui::DragValue::new(&mut hour).range(0..=23).suffix(" h"))
            .changed();
        ui.label(":");
        changed |= ui
            .add(egui::DragValue::new(&mut minute).range(0..=59).suffix(" min"))
            .changed();
    });

    if changed {
        let edited = match bound {
            Bound::Start => NaiveTime::from_hms_opt(hour, minute, 0),
            Bound::End => end_of_minute(hour, minute),
        };
        if let Some(t) = edited {
            *time = t;
        }
    }
    changed
}

/// Slider over the dataset's full time span for one instant bound.
fn instant_slider(ui: &mut Ui, label: &str, value: &mut NaiveDateTime, span: &FilterInputs) -> bool {
    let lo = to_plot_x(span.start_instant) as i64;
    let hi = to_plot_x(span.end_instant) as i64;
    let mut secs = to_plot_x(*value) as i64;

    let response = ui.add(
        egui::Slider::new(&mut secs, lo..=hi)
            .text(label)
            .step_by(60.0)
            .custom_formatter(|v, _| {
                from_plot_x(v)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default()
            }),
    );

    if response.changed() {
        if let Some(t) = from_plot_x(secs as f64) {
            *value = t;
        }
    }
    response.changed()
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label("Model");
        ui.add(egui::TextEdit::singleline(&mut state.config.model_name).desired_width(120.0));

        ui.checkbox(&mut state.config.show_table, "Table");

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!("{} rows read, {} shown", ds.rows_read(), view.records.len()))
                .on_hover_text(format!("Dropped: {}", view.dropped));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open weather model export")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
