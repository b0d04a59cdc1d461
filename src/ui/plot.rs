use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{
    AxisHints, GridInput, GridMark, HPlacement, Legend, Line, LineStyle, MarkerShape, Plot,
    PlotPoint, PlotPoints, Points, Text,
};

use crate::color::{GUST_COLOR, TWD_COLOR, TWS_COLOR};
use crate::data::series::{
    direction_label, format_time_tick, speed_label, ChartSeries, DIRECTION_LABEL_OFFSET,
    SPEED_LABEL_OFFSET,
};
use crate::state::AppState;

const HOUR: f64 = 3600.0;

// ---------------------------------------------------------------------------
// Dual-axis wind chart (central panel)
// ---------------------------------------------------------------------------

/// Maps degrees onto the speed axis so both share one plot.
///
/// The right axis shows `0..=360` over the same height as `0..=top` knots.
#[derive(Debug, Clone, Copy)]
struct DirectionAxis {
    top: f64,
}

impl DirectionAxis {
    fn for_series(series: &ChartSeries) -> Self {
        let peak = series
            .tws
            .iter()
            .chain(&series.gust)
            .map(|p| p[1])
            .fold(0.0_f64, f64::max);
        Self {
            top: (peak * 1.15).max(1.0),
        }
    }

    fn to_plot(self, deg: f64) -> f64 {
        deg / 360.0 * self.top
    }

    fn to_degrees(self, y: f64) -> f64 {
        y / self.top * 360.0
    }
}

/// Render the chart in the central panel.
pub fn wind_chart(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload a CSV file to visualize the weather data  (File → Open…)");
        });
        return;
    }

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(state.title());
    });

    let series = &state.series;
    if series.is_empty() {
        ui.label(RichText::new("No records in the selected range.").italics());
    }

    let dir = DirectionAxis::for_series(series);
    let span = series.span_secs();

    let y_axes = vec![
        AxisHints::new_y().label("TWS / Gust (kt)"),
        AxisHints::new_y()
            .label("TWD (°)")
            .placement(HPlacement::Right)
            .formatter(move |mark: GridMark, _range| format!("{:.0}", dir.to_degrees(mark.value))),
    ];

    Plot::new("wind_chart")
        .legend(Legend::default())
        .x_axis_label("Time")
        .x_axis_formatter(move |mark: GridMark, _range| format_time_tick(mark.value, span))
        .x_grid_spacer(hour_grid)
        .custom_y_axes(y_axes)
        .include_y(0.0)
        .include_y(dir.top)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // TWS: solid with dots.
            plot_ui.line(
                Line::new(PlotPoints::from(series.tws.clone()))
                    .name("TWS")
                    .color(TWS_COLOR)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(series.tws.clone()))
                    .name("TWS")
                    .color(TWS_COLOR)
                    .shape(MarkerShape::Circle)
                    .radius(2.0),
            );

            // Gust: dashed with crosses.
            plot_ui.line(
                Line::new(PlotPoints::from(series.gust.clone()))
                    .name("Gust")
                    .color(GUST_COLOR)
                    .style(LineStyle::dashed_loose())
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(series.gust.clone()))
                    .name("Gust")
                    .color(GUST_COLOR)
                    .shape(MarkerShape::Cross)
                    .radius(3.0),
            );

            // TWD: scaled onto the speed axis, read off the right axis.
            let twd: Vec<[f64; 2]> = series.twd.iter().map(|p| [p[0], dir.to_plot(p[1])]).collect();
            plot_ui.line(
                Line::new(PlotPoints::from(twd.clone()))
                    .name("TWD")
                    .color(TWD_COLOR)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(twd))
                    .name("TWD")
                    .color(TWD_COLOR)
                    .shape(MarkerShape::Circle)
                    .radius(2.0),
            );

            // Value annotations just above each point.
            for p in &series.tws {
                plot_ui.text(label(p[0], p[1] + SPEED_LABEL_OFFSET, speed_label(p[1]), TWS_COLOR));
            }
            for p in &series.gust {
                plot_ui.text(label(p[0], p[1] + SPEED_LABEL_OFFSET, speed_label(p[1]), GUST_COLOR));
            }
            for p in &series.twd {
                let y = dir.to_plot(p[1] + DIRECTION_LABEL_OFFSET);
                plot_ui.text(label(p[0], y, direction_label(p[1]), TWD_COLOR));
            }
        });
}

fn label(x: f64, y: f64, text: String, color: eframe::egui::Color32) -> Text {
    Text::new(PlotPoint::new(x, y), RichText::new(text).size(10.0).color(color))
        .anchor(Align2::CENTER_BOTTOM)
}

/// Grid lines on whole hours: every 1, 3, 6, 12 or 24 h, whichever keeps the
/// visible range to about a dozen lines.
fn hour_grid(input: GridInput) -> Vec<GridMark> {
    let (min, max) = input.bounds;
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }

    let step = [1.0, 3.0, 6.0, 12.0, 24.0]
        .iter()
        .map(|h| h * HOUR)
        .find(|step| span / step <= 12.0)
        .unwrap_or_else(|| (span / 12.0 / (24.0 * HOUR)).ceil() * 24.0 * HOUR);

    let mut marks = Vec::new();
    let mut value = (min / step).ceil() * step;
    while value <= max {
        marks.push(GridMark {
            value,
            step_size: step,
        });
        value += step;
    }
    marks
}
